use std::convert::Infallible;
use std::fmt;
use std::io;
use std::io::Write;
use std::panic::Location;
use std::sync::{Arc, Mutex, PoisonError};

use crate::Severity;

/// Destination for messages of type `M` that made it past the throttle.
///
/// The sink decides what each [`Severity`] means for it. Any error it
/// returns is handed back to whoever called the emitter, untouched. The
/// emitter calls `write` with caller tracking intact, so
/// [`Location::caller`] inside `write` points at the code that called the
/// emitter.
pub trait Sink<M: ?Sized> {
    type Error;

    #[track_caller]
    fn write(&self, severity: Severity, message: &M) -> Result<(), Self::Error>;
}

impl<M: ?Sized, T: Sink<M> + ?Sized> Sink<M> for &T {
    type Error = T::Error;

    #[track_caller]
    fn write(&self, severity: Severity, message: &M) -> Result<(), Self::Error> {
        (**self).write(severity, message)
    }
}

impl<M: ?Sized, T: Sink<M> + ?Sized> Sink<M> for Arc<T> {
    type Error = T::Error;

    #[track_caller]
    fn write(&self, severity: Severity, message: &M) -> Result<(), Self::Error> {
        (**self).write(severity, message)
    }
}

/// Forwards messages as `tracing` events. Every event carries a `severity`
/// field, `log` has no level of its own in tracing and shares info with
/// `info`, and a `caller` field with the file and line that called the
/// emitter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<M: fmt::Display + ?Sized> Sink<M> for TracingSink {
    type Error = Infallible;

    #[track_caller]
    fn write(&self, severity: Severity, message: &M) -> Result<(), Self::Error> {
        let caller = Location::caller();
        match severity {
            Severity::Debug => tracing::debug!(%severity, %caller, "{message}"),
            Severity::Info => tracing::info!(%severity, %caller, "{message}"),
            Severity::Log => tracing::info!(%severity, %caller, "{message}"),
            Severity::Warn => tracing::warn!(%severity, %caller, "{message}"),
            Severity::Error => tracing::error!(%severity, %caller, "{message}"),
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Could not write message to stdout: {0}")]
    Stdout(io::Error),
    #[error("Could not write message to stderr: {0}")]
    Stderr(io::Error),
}

/// Writes one line per message, like a javascript console: debug, info and
/// log go to `out`, warn and error go to `err`.
#[derive(Debug)]
pub struct ConsoleSink<O, E> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl ConsoleSink<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (
            self.out.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.err.into_inner().unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl<M, O, E> Sink<M> for ConsoleSink<O, E>
where
    M: fmt::Display + ?Sized,
    O: Write,
    E: Write,
{
    type Error = ConsoleError;

    fn write(&self, severity: Severity, message: &M) -> Result<(), Self::Error> {
        if severity.is_diagnostic() {
            let mut err = self.err.lock().unwrap_or_else(PoisonError::into_inner);
            writeln!(err, "{message}").map_err(ConsoleError::Stderr)
        } else {
            let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
            writeln!(out, "{message}").map_err(ConsoleError::Stdout)
        }
    }
}
