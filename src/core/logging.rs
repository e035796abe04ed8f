// src/core/logging.rs
use std::sync::atomic::{AtomicU64, Ordering};

// Globale Sequenznummer fuer Korrelation
static LOG_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Initialise env_logger from `RUST_LOG`, falling back to `default_filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}

#[derive(Debug, Clone)]
pub struct LogContext {
    pub component: String,
    pub instance_id: String,
    pub sequence: u64,
}

impl LogContext {
    pub fn new(component: &str, instance_id: &str) -> Self {
        Self {
            component: component.to_string(),
            instance_id: instance_id.to_string(),
            sequence: LOG_SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn format(&self, message: &str) -> String {
        format!(
            "[seq={:06}][{}:{}] {}",
            self.sequence, self.component, self.instance_id, message
        )
    }
}

// Helper Trait fuer einheitliches Logging
pub trait ComponentLogger {
    fn log_context(&self) -> LogContext;

    fn debug(&self, message: &str) {
        log::debug!("{}", self.log_context().format(message));
    }

    fn info(&self, message: &str) {
        log::info!("{}", self.log_context().format(message));
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", self.log_context().format(message));
    }

    fn error(&self, message: &str) {
        log::error!("{}", self.log_context().format(message));
    }
}

impl ComponentLogger for LogContext {
    fn log_context(&self) -> LogContext {
        self.clone()
    }
}
