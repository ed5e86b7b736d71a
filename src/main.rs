use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    blueprint::cli::run()
}
