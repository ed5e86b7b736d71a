//! CLI module for Blueprint

mod args;

pub use args::{Args, Command};

use crate::config::{Config, ExportFormat};
use crate::error::{Error, Result};
use crate::export::{ExportOptions, Exporter};
use crate::importer::{ArchitectureImporter, DirectoryImporter};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Export {
            path,
            output,
            minimal,
            packages,
            format,
            config,
            force,
            verbose,
        } => {
            // Load config file if it exists
            let mut cfg = if let Some(config_path) = &config {
                Config::load_or_default(config_path)
            } else {
                Config::load_or_default(Path::new("blueprint.toml"))
            };

            // Merge CLI arguments (CLI takes precedence)
            let format = format.map(|f| f.parse::<ExportFormat>()).transpose()?;
            cfg.merge_cli(format, minimal, packages);

            if verbose {
                println!("Source: {}", path.display());
                println!("Format: {}", cfg.export.format);
                println!("Minimal: {}", cfg.export.minimal);
                println!("Group by package: {}", cfg.export.group_by_package);
                println!("Include: {:?}", cfg.import.include);
                println!("Exclude: {:?}", cfg.import.exclude);
            }

            if !path.exists() {
                return Err(Error::PathNotFound(path));
            }

            let destination =
                output.unwrap_or_else(|| cfg.output.destination(cfg.export.format));

            if destination.is_file() && !force && !confirm_overwrite(&destination)? {
                println!("Aborted.");
                return Ok(());
            }

            println!("Importing class descriptors...");
            let importer = DirectoryImporter::new(&cfg.import)?;
            let model = importer.import(&path)?;
            println!("Imported {} classes", model.len());

            let exporter = Exporter::new(ExportOptions {
                minimal: cfg.export.minimal,
                group_by_package: cfg.export.group_by_package,
                format: cfg.export.format,
            });
            let report = exporter.export(&model, &destination)?;

            println!("{}", report.summary());
            println!("Architecture written to: {}", destination.display());
            Ok(())
        }

        Command::Version => {
            println!("blueprint {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Ask before clobbering an existing destination file. EOF counts as no.
fn confirm_overwrite(path: &Path) -> Result<bool> {
    let stdin = std::io::stdin();
    loop {
        print!(
            "Destination file '{}' already exists; overwrite? (y/n) ",
            path.display()
        );
        std::io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(false);
        }
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}
