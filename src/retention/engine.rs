// src/retention/engine.rs

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::thread;

use chrono::{DateTime, Utc};

use super::size::{delta, directory_size};
use super::{
    CandidateFile, DeletionOutcome, DeletionResult, Preview, RetentionSummary, RetentionWindow,
    TargetDirectory, age_filter,
};
use crate::core::{ComponentLogger, Error, LogContext, Result, age_days, cutoff, utc_now};

/// Measures the whole log footprint of a set of targets.
pub trait Sweep: Send + Sync {
    fn total_size(&self, targets: &[TargetDirectory]) -> u64;
}

/// Removes a single file.
pub trait Remover: Send + Sync {
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Sweeps every directory on its own scoped thread and sums after all joins.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSweep;

impl Sweep for FsSweep {
    fn total_size(&self, targets: &[TargetDirectory]) -> u64 {
        thread::scope(|scope| {
            let handles: Vec<_> = targets
                .iter()
                .map(|t| scope.spawn(move || directory_size(&t.path, &t.pattern)))
                .collect();

            handles
                .into_iter()
                .map(|h| {
                    h.join().unwrap_or_else(|_| {
                        log::warn!("[sweep] size worker panicked, counting 0");
                        0
                    })
                })
                .sum()
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Stateless; every call is an independent run against the filesystem.
#[derive(Debug, Default, Clone)]
pub struct RetentionEngine<S = FsSweep, R = FsRemover> {
    sweep: S,
    remover: R,
}

impl RetentionEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Sweep, R: Remover> RetentionEngine<S, R> {
    pub fn with_parts(sweep: S, remover: R) -> Self {
        Self { sweep, remover }
    }

    pub fn run(&self, targets: &[TargetDirectory], window: RetentionWindow) -> Result<RetentionSummary> {
        self.run_at(targets, window, utc_now())
    }

    pub fn run_at(
        &self,
        targets: &[TargetDirectory],
        window: RetentionWindow,
        now: DateTime<Utc>,
    ) -> Result<RetentionSummary> {
        let cut = cutoff(now, window);
        let primary = Self::check_primary(targets)?;
        let ctx = LogContext::new("retention", &primary.path.display().to_string());

        let size_before = self.sweep.total_size(targets);

        let candidates = Self::candidates(targets, cut);
        if candidates.is_empty() {
            ctx.info(&format!("nothing older than {}", window));
            return Ok(RetentionSummary::default());
        }

        ctx.info(&format!(
            "{} candidate(s) older than {} ({} bytes on disk)",
            candidates.len(),
            window,
            size_before
        ));

        // strictly sequential
        let results: Vec<DeletionResult> = candidates
            .into_iter()
            .map(|file| {
                ctx.debug(&format!(
                    "deleting {:?} ({} days old, {} bytes)",
                    file.path,
                    age_days(file.modified, now),
                    file.size
                ));
                let result = self.delete(file);
                if let Some(message) = result.error() {
                    ctx.warn(&format!("failed {:?}: {}", result.file.path, message));
                }
                result
            })
            .collect();

        let size_after = self.sweep.total_size(targets);
        let summary = RetentionSummary::from_results(&results, delta(size_before, size_after));

        ctx.info(&format!(
            "deleted={} skipped={} errors={} reclaimed={} bytes",
            summary.files_deleted,
            summary.skipped,
            summary.errors.len(),
            summary.bytes_reclaimed
        ));

        Ok(summary)
    }

    pub fn preview(&self, targets: &[TargetDirectory], window: RetentionWindow) -> Result<Preview> {
        self.preview_at(targets, window, utc_now())
    }

    pub fn preview_at(
        &self,
        targets: &[TargetDirectory],
        window: RetentionWindow,
        now: DateTime<Utc>,
    ) -> Result<Preview> {
        Self::check_primary(targets)?;

        let candidates = Self::candidates(targets, cutoff(now, window));
        Ok(Preview {
            files: candidates.len(),
            bytes: candidates.iter().map(|f| f.size).sum(),
        })
    }

    fn check_primary(targets: &[TargetDirectory]) -> Result<&TargetDirectory> {
        let primary = targets.first().ok_or(Error::NoTargets)?;
        if !primary.exists() {
            return Err(Error::directory_not_found(&primary.path));
        }
        // an unlistable primary would otherwise look like an empty run
        fs::read_dir(&primary.path).map_err(|source| Error::DirectoryUnreadable {
            path: primary.path.clone(),
            source,
        })?;
        Ok(primary)
    }

    // Target order first, then enumeration order. No sorting.
    fn candidates(targets: &[TargetDirectory], cut: DateTime<Utc>) -> Vec<CandidateFile> {
        targets
            .iter()
            .flat_map(|t| age_filter::select(&t.path, &t.pattern, cut))
            .collect()
    }

    fn delete(&self, file: CandidateFile) -> DeletionResult {
        let outcome = match fs::metadata(&file.path) {
            Err(err) if err.kind() == ErrorKind::NotFound => DeletionOutcome::SkippedMissing,
            Err(err) => DeletionOutcome::Failed(err.to_string()),
            Ok(meta) if meta.permissions().readonly() => DeletionOutcome::SkippedReadOnly,
            Ok(_) => match self.remover.remove(&file.path) {
                Ok(()) => DeletionOutcome::Deleted,
                Err(err) if err.kind() == ErrorKind::NotFound => DeletionOutcome::SkippedMissing,
                Err(err) => DeletionOutcome::Failed(err.to_string()),
            },
        };

        DeletionResult { file, outcome }
    }
}
