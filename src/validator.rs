//! Train/test dataset structure validation
//!
//! A dataset root encodes labels as its first-level subdirectories. The
//! validator extracts the label set of the train and test splits, removes
//! known filesystem noise, flags anything else that is not a label
//! directory, and reports the set asymmetries between the two splits.

use crate::error::Result;
use crate::utils::PathValidator;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Hidden metadata entry recognized (case-insensitively) as filesystem noise.
///
/// This is the only name the validator ever deletes; every other unexpected
/// entry is reported and left untouched.
pub const NOISE_ENTRY_NAME: &str = ".DS_Store";

/// Result of comparing the label taxonomies of two dataset splits
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureReport {
    /// Labels found in the train split
    pub train_labels: BTreeSet<String>,
    /// Labels found in the test split
    pub test_labels: BTreeSet<String>,
    /// Labels present in train but absent from test
    pub only_in_train: BTreeSet<String>,
    /// Labels present in test but absent from train
    pub only_in_test: BTreeSet<String>,
    /// Noise entries deleted during the scan
    pub removed_noise: Vec<PathBuf>,
    /// Non-directory entries found at the label level and left untouched
    pub invalid_entries: Vec<PathBuf>,
}

impl StructureReport {
    /// True iff both splits use exactly the same label set
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.only_in_train.is_empty() && self.only_in_test.is_empty()
    }
}

/// Outcome of scanning the direct children of one dataset root
#[derive(Debug, Default)]
struct LabelScan {
    labels: BTreeSet<String>,
    removed_noise: Vec<PathBuf>,
    invalid_entries: Vec<PathBuf>,
}

/// Validates that two label-partitioned directory trees agree structurally
pub struct StructureValidator;

impl StructureValidator {
    /// Compare the label sets of a train and a test root
    ///
    /// Fails fast with [`crate::PrepError::MissingRoot`] if either root does
    /// not exist or is not a directory. Label asymmetry is never an error:
    /// it is reported in the returned [`StructureReport`] and as warnings.
    pub fn validate<P: AsRef<Path>, Q: AsRef<Path>>(
        train_root: P,
        test_root: Q,
    ) -> Result<StructureReport> {
        let train_root = train_root.as_ref();
        let test_root = test_root.as_ref();

        PathValidator::validate_is_directory(train_root)?;
        PathValidator::validate_is_directory(test_root)?;

        let train = Self::scan_labels(train_root)?;
        let test = Self::scan_labels(test_root)?;

        info!("Train labels: {:?}", train.labels);
        info!("Test labels:  {:?}", test.labels);

        // Case-sensitive set difference in both directions
        let only_in_test: BTreeSet<String> = test
            .labels
            .difference(&train.labels)
            .cloned()
            .collect();
        let only_in_train: BTreeSet<String> = train
            .labels
            .difference(&test.labels)
            .cloned()
            .collect();

        for label in &only_in_test {
            warn!("Test split contains a label missing from train: {label}");
        }
        for label in &only_in_train {
            warn!("Train split contains a label missing from test: {label}");
        }

        let report = StructureReport {
            train_labels: train.labels,
            test_labels: test.labels,
            only_in_train,
            only_in_test,
            removed_noise: [train.removed_noise, test.removed_noise].concat(),
            invalid_entries: [train.invalid_entries, test.invalid_entries].concat(),
        };

        if report.is_consistent() {
            info!("Structure OK: identical label sets in train and test");
        }

        Ok(report)
    }

    /// Enumerate the direct children of one root into a label scan
    ///
    /// Children are materialized before any deletion so noise removal is a
    /// discrete step, never interleaved with a live directory iterator.
    fn scan_labels(root: &Path) -> Result<LabelScan> {
        let mut scan = LabelScan::default();

        let mut children = Vec::new();
        for entry in fs::read_dir(root)? {
            children.push(entry?.path());
        }

        // Pass 1: delete known noise entries
        children.retain(|path| {
            if is_noise_entry(path) {
                warn!("Removing noise entry: {}", path.display());
                if remove_entry(path) {
                    scan.removed_noise.push(path.clone());
                }
                false
            } else {
                true
            }
        });

        // Pass 2: classify the surviving children
        for path in children {
            if path.is_dir() {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                scan.labels.insert(name);
            } else {
                warn!("Invalid entry at label level: {}", path.display());
                scan.invalid_entries.push(path);
            }
        }

        Ok(scan)
    }
}

/// Case-insensitive match against the known noise name
fn is_noise_entry(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(OsStr::new(NOISE_ENTRY_NAME)))
}

/// Delete a noise entry in directory or file form
///
/// Deleting an already-missing entry is a no-op. Returns whether the entry
/// was actually removed.
fn remove_entry(path: &Path) -> bool {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Failed to remove noise entry {}: {}", path.display(), e);
            false
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use std::fs;
    use tempfile::TempDir;

    fn make_labels(root: &Path, labels: &[&str]) {
        for label in labels {
            fs::create_dir_all(root.join(label)).unwrap();
        }
    }

    #[test]
    fn test_missing_root_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        fs::create_dir(&train).unwrap();

        let result = StructureValidator::validate(&train, &test);
        assert!(matches!(result, Err(PrepError::MissingRoot(_))));
    }

    #[test]
    fn test_identical_label_sets_are_consistent() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["car", "sign", "empty"]);
        make_labels(&test, &["car", "sign", "empty"]);

        let report = StructureValidator::validate(&train, &test).unwrap();
        assert!(report.is_consistent());
        assert!(report.only_in_train.is_empty());
        assert!(report.only_in_test.is_empty());
        assert_eq!(report.train_labels, report.test_labels);
    }

    #[test]
    fn test_asymmetric_label_sets() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["a", "b"]);
        make_labels(&test, &["b", "c"]);

        let report = StructureValidator::validate(&train, &test).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(
            report.only_in_train,
            BTreeSet::from(["a".to_string()])
        );
        assert_eq!(
            report.only_in_test,
            BTreeSet::from(["c".to_string()])
        );
    }

    #[test]
    fn test_noise_directory_is_removed() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["car", "sign", "empty"]);
        make_labels(&test, &["car", "sign", "empty"]);

        let noise_dir = train.join(".DS_Store");
        fs::create_dir(&noise_dir).unwrap();
        fs::write(noise_dir.join("junk"), b"x").unwrap();

        let report = StructureValidator::validate(&train, &test).unwrap();

        assert!(!noise_dir.exists());
        assert_eq!(report.removed_noise, vec![noise_dir]);
        assert_eq!(
            report.train_labels,
            BTreeSet::from([
                "car".to_string(),
                "sign".to_string(),
                "empty".to_string()
            ])
        );
    }

    #[test]
    fn test_noise_match_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["car"]);
        make_labels(&test, &["car"]);

        let noise_file = test.join(".ds_store");
        fs::write(&noise_file, b"junk").unwrap();

        let report = StructureValidator::validate(&train, &test).unwrap();

        assert!(!noise_file.exists());
        assert_eq!(report.removed_noise, vec![noise_file]);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_invalid_entries_are_flagged_but_kept() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["car"]);
        make_labels(&test, &["car"]);

        let stray = train.join("notes.txt");
        fs::write(&stray, b"do not delete").unwrap();

        let report = StructureValidator::validate(&train, &test).unwrap();

        assert!(stray.exists());
        assert_eq!(report.invalid_entries, vec![stray]);
        assert!(!report.train_labels.contains("notes.txt"));
    }

    #[test]
    fn test_label_comparison_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        make_labels(&train, &["Car"]);
        make_labels(&test, &["car"]);

        let report = StructureValidator::validate(&train, &test).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.only_in_train, BTreeSet::from(["Car".to_string()]));
        assert_eq!(report.only_in_test, BTreeSet::from(["car".to_string()]));
    }

    #[test]
    fn test_empty_roots_are_consistent() {
        let temp_dir = TempDir::new().unwrap();
        let train = temp_dir.path().join("train");
        let test = temp_dir.path().join("test");
        fs::create_dir(&train).unwrap();
        fs::create_dir(&test).unwrap();

        let report = StructureValidator::validate(&train, &test).unwrap();
        assert!(report.is_consistent());
        assert!(report.train_labels.is_empty());
        assert!(report.test_labels.is_empty());
    }
}
