//! Dataset Preparation CLI Tool
//!
//! Command-line interface for normalizing image corpora into canonical
//! dataset trees and checking train/test split structure.

#[cfg(feature = "cli")]
use dataset_prep::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
