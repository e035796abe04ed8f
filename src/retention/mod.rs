// src/retention/mod.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

pub mod age_filter;
pub mod engine;
pub mod size;

pub use engine::{FsRemover, FsSweep, Remover, RetentionEngine, Sweep};

pub const DEFAULT_PATTERN: &str = "*.log";

// ---------- RetentionWindow ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionWindow {
    Seven,
    Fourteen,
    #[default]
    Thirty,
    Sixty,
    Ninety,
}

impl RetentionWindow {
    pub const ALL: [RetentionWindow; 5] = [
        RetentionWindow::Seven,
        RetentionWindow::Fourteen,
        RetentionWindow::Thirty,
        RetentionWindow::Sixty,
        RetentionWindow::Ninety,
    ];

    pub fn days(self) -> i64 {
        match self {
            RetentionWindow::Seven => 7,
            RetentionWindow::Fourteen => 14,
            RetentionWindow::Thirty => 30,
            RetentionWindow::Sixty => 60,
            RetentionWindow::Ninety => 90,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::days(self.days())
    }

    pub fn name(self) -> String {
        format!("{} days", self.days())
    }

    pub fn from_days(days: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.days() == days)
    }
}

impl fmt::Display for RetentionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for RetentionWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(days) = s.parse::<i64>() {
            return Self::from_days(days)
                .ok_or_else(|| format!("unsupported retention window: {} days", days));
        }
        match s.to_ascii_lowercase().as_str() {
            "seven" => Ok(RetentionWindow::Seven),
            "fourteen" => Ok(RetentionWindow::Fourteen),
            "thirty" => Ok(RetentionWindow::Thirty),
            "sixty" => Ok(RetentionWindow::Sixty),
            "ninety" => Ok(RetentionWindow::Ninety),
            other => Err(format!("unknown retention window '{}'", other)),
        }
    }
}

// ---------- FilePattern ----------

/// Simple glob on file names. Matching is case-insensitive on every platform.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePattern {
    raw: String,
    pattern: Pattern,
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl FilePattern {
    pub fn new(raw: &str) -> Result<Self> {
        let pattern = Pattern::new(raw).map_err(|source| Error::InvalidPattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches_with(file_name, MATCH_OPTIONS)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for FilePattern {
    /// `*.log`. The literal always parses; the fallback is never taken.
    fn default() -> Self {
        Self {
            raw: DEFAULT_PATTERN.to_string(),
            pattern: Pattern::new(DEFAULT_PATTERN).unwrap_or_default(),
        }
    }
}

// ---------- TargetDirectory ----------

/// One log source: a directory plus the file names that count as its logs.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDirectory {
    pub path: PathBuf,
    pub pattern: FilePattern,
}

impl TargetDirectory {
    pub fn new(path: impl Into<PathBuf>, pattern: &str) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            pattern: FilePattern::new(pattern)?,
        })
    }

    pub fn logs(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pattern: FilePattern::default(),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }
}

// ---------- CandidateFile ----------

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
    pub size: u64,
    pub read_only: bool,
}

impl CandidateFile {
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------- DeletionResult ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    /// Vanished between selection and deletion.
    SkippedMissing,
    /// Still present but marked read-only. Not reported as an error.
    SkippedReadOnly,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletionResult {
    pub file: CandidateFile,
    pub outcome: DeletionOutcome,
}

impl DeletionResult {
    pub fn succeeded(&self) -> bool {
        self.outcome == DeletionOutcome::Deleted
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            DeletionOutcome::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

// ---------- RetentionSummary ----------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RetentionSummary {
    /// Files selected by the age filter in this run.
    pub candidates: usize,
    pub files_deleted: usize,
    /// Skipped because missing or read-only at delete time.
    pub skipped: usize,
    /// Size before minus size after. Negative when the directories grew meanwhile.
    pub bytes_reclaimed: i64,
    pub errors: Vec<FileError>,
}

impl RetentionSummary {
    pub fn from_results(results: &[DeletionResult], bytes_reclaimed: i64) -> Self {
        let mut summary = RetentionSummary {
            candidates: results.len(),
            bytes_reclaimed,
            ..Default::default()
        };

        for result in results {
            match &result.outcome {
                DeletionOutcome::Deleted => summary.files_deleted += 1,
                DeletionOutcome::SkippedMissing | DeletionOutcome::SkippedReadOnly => {
                    summary.skipped += 1
                }
                DeletionOutcome::Failed(message) => summary.errors.push(FileError {
                    file_name: result.file.file_name(),
                    message: message.clone(),
                }),
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.candidates == 0
    }
}

/// What a run would delete, without touching anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub files: usize,
    pub bytes: u64,
}
