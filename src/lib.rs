// src/lib.rs
pub mod config;
pub mod core;
pub mod report;
pub mod retention;
pub mod trigger;

// Re-export die wichtigsten Typen
pub use config::Config;
pub use core::{Error, Result};
pub use retention::{
    CandidateFile, DeletionOutcome, DeletionResult, FileError, FilePattern, Preview,
    RetentionEngine, RetentionSummary, RetentionWindow, TargetDirectory,
};
pub use trigger::{CleanupSession, LogNotifier, NotificationKind, Notifier};
