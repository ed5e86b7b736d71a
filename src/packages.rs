// Package aggregation over an imported class set

use crate::model::{ArchitectureModel, Package, PACKAGE_DESCRIPTOR};
use std::collections::HashSet;
use tracing::debug;

/// Derives the distinct packages of a model together with the annotations
/// carried by each package's `package-info` descriptor, when one exists.
#[derive(Debug, Default)]
pub struct PackageAggregator;

impl PackageAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Single pass over the class set; each package is resolved exactly once
    /// no matter how many classes it contains. A package without a descriptor
    /// pseudo-class keeps an empty annotation set.
    pub fn aggregate(&self, model: &ArchitectureModel) -> Vec<Package> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut packages = Vec::new();

        for class in model.classes() {
            if !seen.insert(&class.package) {
                continue;
            }
            let mut package = Package::new(&class.package);
            match model.class_in_package(&class.package, PACKAGE_DESCRIPTOR) {
                Some(descriptor) => {
                    package.annotations = descriptor.annotations.clone();
                }
                None => {
                    // Expected for most packages, never an error.
                    debug!(package = %class.package, "no package descriptor");
                }
            }
            packages.push(package);
        }

        packages
    }
}
