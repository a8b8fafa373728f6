//! Service layer: image I/O and progress reporting

pub mod io;
pub mod progress;

pub use io::ImageIOService;
pub use progress::{NoOpProgressReporter, ProgressReporter};
