// src/report.rs
//
// One human-readable line per invocation.

use crate::retention::size::format_file_size;
use crate::retention::{FileError, Preview, RetentionSummary, RetentionWindow};

pub fn summary_line(summary: &RetentionSummary, window: RetentionWindow) -> String {
    format!(
        "deleted {} log(s) older than {} with a total size of {}",
        summary.files_deleted,
        window,
        format_file_size(summary.bytes_reclaimed)
    )
}

pub fn directory_missing_line() -> &'static str {
    "couldn't find directory, please check the configuration"
}

pub fn error_line(error: &FileError) -> String {
    format!("error deleting {}: {}", error.file_name, error.message)
}

pub fn preview_line(preview: &Preview, window: RetentionWindow) -> String {
    let bytes = i64::try_from(preview.bytes).unwrap_or(i64::MAX);
    format!(
        "logs older than {}: {} file(s) - {}",
        window,
        preview.files,
        format_file_size(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let summary = RetentionSummary {
            candidates: 1,
            files_deleted: 1,
            bytes_reclaimed: 1000,
            ..Default::default()
        };
        let line = summary_line(&summary, RetentionWindow::Thirty);

        assert!(line.starts_with("deleted 1 log(s) older than 30 days with a total size of 1000"));
        assert!(line.ends_with('B'));

        let summary = RetentionSummary { bytes_reclaimed: 1536, ..summary };
        assert_eq!(
            summary_line(&summary, RetentionWindow::Thirty),
            "deleted 1 log(s) older than 30 days with a total size of 1.50 kB"
        );
    }

    #[test]
    fn test_summary_line_negative_delta() {
        let summary = RetentionSummary {
            candidates: 2,
            files_deleted: 2,
            bytes_reclaimed: -4096,
            ..Default::default()
        };
        let line = summary_line(&summary, RetentionWindow::Seven);

        assert!(line.contains("older than 7 days"));
        assert!(line.contains("total size of -"));
    }

    #[test]
    fn test_error_line() {
        let err = FileError {
            file_name: "Network_20240101.log".into(),
            message: "Permission denied (os error 13)".into(),
        };
        assert_eq!(
            error_line(&err),
            "error deleting Network_20240101.log: Permission denied (os error 13)"
        );
    }

    #[test]
    fn test_preview_line() {
        let line = preview_line(&Preview { files: 3, bytes: 3 * 1024 * 1024 }, RetentionWindow::Ninety);
        assert!(line.starts_with("logs older than 90 days: 3 file(s) - 3"));
        assert!(line.ends_with("MB"));
    }

    #[test]
    fn test_directory_missing_line() {
        assert_eq!(
            directory_missing_line(),
            "couldn't find directory, please check the configuration"
        );
    }
}
