// src/retention/size.rs

use std::path::Path;

use humansize::{WINDOWS, format_size_i};

use super::{FilePattern, age_filter};

/// Total size of all pattern-matching files in `dir`, regardless of age.
pub fn directory_size(dir: &Path, pattern: &FilePattern) -> u64 {
    age_filter::matching_files(dir, pattern)
        .map(|f| f.size)
        .sum()
}

/// Base 1024 with `kB`/`MB`/`GB` suffixes and two decimals, e.g. `1.50 kB`.
/// Negative values keep their sign.
pub fn format_file_size(bytes: i64) -> String {
    format_size_i(bytes, WINDOWS)
}

pub fn delta(before: u64, after: u64) -> i64 {
    let delta = i128::from(before) - i128::from(after);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_directory_size_counts_matching_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.log"), vec![0u8; 1000]).unwrap();
        fs::write(tmp.path().join("b.log"), vec![0u8; 500]).unwrap();
        fs::write(tmp.path().join("c.dat"), vec![0u8; 700]).unwrap();

        assert_eq!(directory_size(tmp.path(), &FilePattern::default()), 1500);
    }

    #[test]
    fn test_directory_size_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(directory_size(&tmp.path().join("gone"), &FilePattern::default()), 0);
    }

    #[test]
    fn test_format_file_size() {
        let small = format_file_size(1000);
        assert!(small.starts_with("1000"), "{}", small);
        assert!(small.ends_with('B'), "{}", small);

        assert_eq!(format_file_size(1536), "1.50 kB");
        assert_eq!(format_file_size(1024), "1 kB");

        let mb = format_file_size(5 * 1024 * 1024);
        assert!(mb.starts_with('5'), "{}", mb);
        assert!(mb.ends_with("MB"), "{}", mb);
    }

    #[test]
    fn test_format_negative_size() {
        assert_eq!(format_file_size(-2048), "-2 kB");
    }

    #[test]
    fn test_delta() {
        assert_eq!(delta(1500, 500), 1000);
        assert_eq!(delta(500, 1500), -1000);
        assert_eq!(delta(u64::MAX, 0), i64::MAX);
    }
}
