//! Keep repeated log lines from flooding the output. Each call carries a log
//! id and a minimum interval, a message only gets through if nothing with the
//! same id got through within that interval.
//!
//! ```
//! use throttled_logger::ThrottledEmitter;
//!
//! let logger = ThrottledEmitter::default();
//! for attempt in 0..100 {
//!     // only the first attempt is logged
//!     let Ok(()) = logger.warn(format_args!("retrying, attempt {attempt}"), "retry", 5.0);
//! }
//! ```

mod emitter;
mod severity;
pub mod sink;

pub use emitter::ThrottledEmitter;
pub use severity::Severity;
pub use sink::{ConsoleSink, Sink, TracingSink};

/// Format and emit at debug. Evaluates to the sink's `Result`.
///
/// `debug!(emitter, "log_id", 5.0; "value is {}", 5)`
#[macro_export]
macro_rules! debug {
    ($emitter:expr, $log_id:expr, $min_interval_secs:expr; $($arg:tt)*) => {
        $emitter.debug(format_args!($($arg)*), $log_id, $min_interval_secs)
    };
}

#[macro_export]
macro_rules! info {
    ($emitter:expr, $log_id:expr, $min_interval_secs:expr; $($arg:tt)*) => {
        $emitter.info(format_args!($($arg)*), $log_id, $min_interval_secs)
    };
}

#[macro_export]
macro_rules! log {
    ($emitter:expr, $log_id:expr, $min_interval_secs:expr; $($arg:tt)*) => {
        $emitter.log(format_args!($($arg)*), $log_id, $min_interval_secs)
    };
}

#[macro_export]
macro_rules! warn {
    ($emitter:expr, $log_id:expr, $min_interval_secs:expr; $($arg:tt)*) => {
        $emitter.warn(format_args!($($arg)*), $log_id, $min_interval_secs)
    };
}

#[macro_export]
macro_rules! error {
    ($emitter:expr, $log_id:expr, $min_interval_secs:expr; $($arg:tt)*) => {
        $emitter.error(format_args!($($arg)*), $log_id, $min_interval_secs)
    };
}
