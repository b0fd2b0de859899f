//! This module provides the `ProgramLoader` struct, responsible for loading rule
//! text from files and directories. Parsing is left to the caller so one loader
//! serves machines with any configuration.

use crate::types::MachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension recognized for rule files.
const RULES_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading rule text.
/// It provides methods to read a single rule file and to discover and read all
/// rule files within a directory.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Reads rule text from the specified file path.
    ///
    /// # Errors
    ///
    /// * `MachineError::File` if the file cannot be read.
    pub fn load_rules(path: &Path) -> Result<String, MachineError> {
        fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("failed to read file {}: {}", path.display(), e))
        })
    }

    /// Reads all `.tm` rule files from a directory.
    ///
    /// Directories and files with other extensions are skipped. Each element of
    /// the result is the outcome for one file, so a single unreadable file does
    /// not hide the rest.
    pub fn load_rules_dir(directory: &Path) -> Vec<Result<(PathBuf, String), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();
                if path.is_dir() || path.extension().is_none_or(|ext| ext != RULES_EXTENSION) {
                    return None;
                }

                match Self::load_rules(&path) {
                    Ok(text) => Some(Ok((path, text))),
                    Err(e) => Some(Err(e)),
                }
            })
            .collect()
    }
}
