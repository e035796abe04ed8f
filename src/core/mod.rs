pub mod error;
pub mod logging;
pub mod timestamp;

pub use error::{Error, Result};
pub use logging::{ComponentLogger, LogContext};
pub use timestamp::*;
