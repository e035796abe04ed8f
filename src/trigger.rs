// src/trigger.rs
//
// Manual and once-per-session startup triggers. Cleanups always run on a
// background thread so the caller's event/UI thread never blocks on I/O.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::core::{ComponentLogger, Error, LogContext, Result};
use crate::report;
use crate::retention::{
    FsRemover, FsSweep, Remover, RetentionEngine, RetentionSummary, RetentionWindow, Sweep,
    TargetDirectory,
};

/// Kinds of host notifications a session listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The first of these marks the end of the host's startup.
    Notice,
    Other,
}

/// The user-visible output channel.
pub trait Notifier: Send + Sync {
    fn notify(&self, line: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, line: &str) {
        log::info!("[logsweep] {}", line);
    }
}

pub type CleanupHandle = JoinHandle<Result<RetentionSummary>>;

pub struct CleanupSession<S = FsSweep, R = FsRemover> {
    engine: Arc<RetentionEngine<S, R>>,
    targets: Arc<[TargetDirectory]>,
    window: RetentionWindow,
    notifier: Arc<dyn Notifier>,
    cleaned_on_startup: bool,
}

impl CleanupSession {
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> anyhow::Result<Self> {
        Ok(Self::new(
            RetentionEngine::new(),
            config.targets()?,
            config.window,
            notifier,
        ))
    }
}

impl<S, R> CleanupSession<S, R>
where
    S: Sweep + 'static,
    R: Remover + 'static,
{
    pub fn new(
        engine: RetentionEngine<S, R>,
        targets: Vec<TargetDirectory>,
        window: RetentionWindow,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            targets: targets.into(),
            window,
            notifier,
            cleaned_on_startup: false,
        }
    }

    pub fn cleaned_on_startup(&self) -> bool {
        self.cleaned_on_startup
    }

    /// Fires the startup cleanup for the first `Notice` of the session only.
    pub fn on_notification(&mut self, kind: NotificationKind) -> Option<CleanupHandle> {
        if kind != NotificationKind::Notice || self.cleaned_on_startup {
            return None;
        }
        self.cleaned_on_startup = true;
        self.info("startup cleanup dispatched");
        Some(self.dispatch())
    }

    pub fn run_manual(&self) -> CleanupHandle {
        self.info("manual cleanup dispatched");
        self.dispatch()
    }

    fn dispatch(&self) -> CleanupHandle {
        let engine = Arc::clone(&self.engine);
        let targets = Arc::clone(&self.targets);
        let notifier = Arc::clone(&self.notifier);
        let window = self.window;

        thread::spawn(move || cleanup(&engine, &targets, window, notifier.as_ref()))
    }
}

impl<S, R> ComponentLogger for CleanupSession<S, R> {
    fn log_context(&self) -> LogContext {
        let primary = self
            .targets
            .first()
            .map(|t| t.path.display().to_string())
            .unwrap_or_default();
        LogContext::new("session", &primary)
    }
}

fn cleanup<S: Sweep, R: Remover>(
    engine: &RetentionEngine<S, R>,
    targets: &[TargetDirectory],
    window: RetentionWindow,
    notifier: &dyn Notifier,
) -> Result<RetentionSummary> {
    match engine.run(targets, window) {
        Ok(summary) => {
            for error in &summary.errors {
                notifier.notify(&report::error_line(error));
            }
            // nothing selected -> stay quiet
            if !summary.is_empty() {
                notifier.notify(&report::summary_line(&summary, window));
            }
            Ok(summary)
        }
        Err(err @ Error::DirectoryNotFound { .. }) => {
            log::warn!("[logsweep] {}", err);
            notifier.notify(report::directory_missing_line());
            Err(err)
        }
        Err(err) => {
            log::error!("[logsweep] cleanup failed: {}", err);
            notifier.notify(&format!("cleanup failed: {}", err));
            Err(err)
        }
    }
}
