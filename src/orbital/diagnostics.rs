//! Structured diagnostics from the orbital core.
//!
//! The core never fails a frame. Anything worth knowing about (skipped
//! registrations, non-finite output, misuse of the lifecycle) is handed to a
//! [`DiagnosticSink`] chosen by whoever constructs the core.

use std::fmt;

use bevy::log::{debug, info, warn};

/// Why a body was not registered.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("the sun is the orbit centre and is never registered")]
    Sun,

    #[error("planet record has no name")]
    MissingName,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    Initialized,
    RegistrationSkipped {
        name: String,
        reason: RegistrationError,
    },
    BodyReplaced {
        key: String,
    },
    /// A computed position came out non-finite and was not written.
    NonFinitePosition {
        key: String,
    },
    /// `update` was called before `init` (or after `dispose`).
    UpdateBeforeInit,
    PositionsReset {
        bodies: usize,
    },
    PathsRebuilt {
        paths: usize,
        segments: u32,
    },
    Disposed,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::RegistrationSkipped {
                reason: RegistrationError::MissingName,
                ..
            }
            | Diagnostic::NonFinitePosition { .. }
            | Diagnostic::UpdateBeforeInit => Severity::Warning,
            Diagnostic::Initialized | Diagnostic::PositionsReset { .. } | Diagnostic::Disposed => {
                Severity::Info
            }
            Diagnostic::RegistrationSkipped { .. }
            | Diagnostic::BodyReplaced { .. }
            | Diagnostic::PathsRebuilt { .. } => Severity::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Initialized => write!(f, "orbital mechanics initialized"),
            Diagnostic::RegistrationSkipped { name, reason } => {
                write!(f, "skipped body {name:?}: {reason}")
            }
            Diagnostic::BodyReplaced { key } => write!(f, "replaced orbiting body {key}"),
            Diagnostic::NonFinitePosition { key } => {
                write!(f, "non-finite position for {key}, transform left unchanged")
            }
            Diagnostic::UpdateBeforeInit => write!(f, "update called before init, ignoring"),
            Diagnostic::PositionsReset { bodies } => {
                write!(f, "reset positions of {bodies} orbiting bodies")
            }
            Diagnostic::PathsRebuilt { paths, segments } => {
                write!(f, "rebuilt {paths} orbit paths with {segments} segments")
            }
            Diagnostic::Disposed => write!(f, "orbital mechanics disposed"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// Receiver for core diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `tracing` log at their severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Info => info!("{diagnostic}"),
            Severity::Debug => debug!("{diagnostic}"),
        }
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}
