use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use governor::clock::{Clock, DefaultClock, Reference};

use crate::sink::{Sink, TracingSink};
use crate::Severity;

/// Lets a log message through at most once per caller chosen interval.
///
/// Every call names a log id. Calls sharing an id share a throttle bucket
/// that remembers when a message last passed. No id (`None`) and the empty
/// id are the same bucket. The interval is given per call and in seconds,
/// an interval of zero or less never suppresses anything.
///
/// Create one and hand out references (or an `Arc`) to everything that
/// should share buckets.
#[derive(Debug)]
pub struct ThrottledEmitter<S = TracingSink, C: Clock = DefaultClock> {
    sink: S,
    clock: C,
    last_emit: Mutex<HashMap<String, C::Instant>>,
}

impl Default for ThrottledEmitter {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl<S> ThrottledEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            clock: DefaultClock::default(),
            last_emit: Mutex::default(),
        }
    }
}

impl<S, C: Clock> ThrottledEmitter<S, C> {
    /// Measure intervals with another clock. Any recorded emissions are
    /// forgotten, they were measured with the old clock.
    pub fn with_clock<Other: Clock>(self, clock: Other) -> ThrottledEmitter<S, Other> {
        ThrottledEmitter {
            sink: self.sink,
            clock,
            last_emit: Mutex::default(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of throttle buckets, one for every log id that ever passed.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forward `message` to the sink at `severity` unless a message with
    /// the same `log_id` passed less than `min_interval_secs` ago.
    ///
    /// The message is handed to the sink as is, what it may be depends on
    /// the sink. Errors from the sink are returned as is. A message the sink
    /// failed to write does not count as emitted.
    #[track_caller]
    pub fn emit<'a, M>(
        &self,
        severity: Severity,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        let log_id = log_id.into().unwrap_or_default();

        // held across the sink call so check and update are one step
        let mut last_emit = self.lock();
        let now = self.clock.now();
        if let Some(last) = last_emit.get(log_id) {
            let elapsed = Duration::from(now.duration_since(*last));
            if elapsed.as_secs_f64() < min_interval_secs {
                return Ok(());
            }
        }

        self.sink.write(severity, &message)?;
        last_emit.insert(log_id.to_owned(), now);
        Ok(())
    }

    #[track_caller]
    pub fn debug<'a, M>(
        &self,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        self.emit(Severity::Debug, message, log_id, min_interval_secs)
    }

    #[track_caller]
    pub fn info<'a, M>(
        &self,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        self.emit(Severity::Info, message, log_id, min_interval_secs)
    }

    #[track_caller]
    pub fn log<'a, M>(
        &self,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        self.emit(Severity::Log, message, log_id, min_interval_secs)
    }

    #[track_caller]
    pub fn warn<'a, M>(
        &self,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        self.emit(Severity::Warn, message, log_id, min_interval_secs)
    }

    #[track_caller]
    pub fn error<'a, M>(
        &self,
        message: M,
        log_id: impl Into<Option<&'a str>>,
        min_interval_secs: f64,
    ) -> Result<(), S::Error>
    where
        S: Sink<M>,
    {
        self.emit(Severity::Error, message, log_id, min_interval_secs)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, C::Instant>> {
        // the map is valid even if a sink panicked while we held the lock
        self.last_emit.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
