// src/retention/age_filter.rs
//
// Non-recursive directory listing. Nothing is cached; every call hits the
// filesystem again.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::{CandidateFile, FilePattern};
use crate::core::from_system_time;

/// Regular files directly inside `dir` whose name matches `pattern`.
/// A missing directory yields nothing.
pub fn matching_files<'a>(
    dir: &Path,
    pattern: &'a FilePattern,
) -> impl Iterator<Item = CandidateFile> + 'a {
    let entries = match fs::read_dir(dir) {
        Ok(e) => Some(e),
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                log::warn!("[age_filter] cannot list {:?}: {}", dir, err);
            }
            None
        }
    };

    entries
        .into_iter()
        .flatten()
        .filter_map(move |entry| {
            let entry = entry.ok()?;
            // lossy: non-UTF-8 names still match on their ASCII extension
            if !pattern.matches(&entry.file_name().to_string_lossy()) {
                return None;
            }

            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    log::debug!("[age_filter] skipping {:?}: {}", entry.path(), err);
                    return None;
                }
            };
            if !meta.is_file() {
                return None;
            }

            Some(CandidateFile {
                path: entry.path(),
                modified: from_system_time(meta.modified().ok()?),
                size: meta.len(),
                read_only: meta.permissions().readonly(),
            })
        })
}

/// Matching files last modified strictly before `cutoff`.
pub fn select<'a>(
    dir: &Path,
    pattern: &'a FilePattern,
    cutoff: DateTime<Utc>,
) -> impl Iterator<Item = CandidateFile> + 'a {
    matching_files(dir, pattern).filter(move |file| file.modified < cutoff)
}
