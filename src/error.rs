//! Errors and diagnostics.
//!
//! Structural problems (hook order, hook count, slot type) are fatal for the
//! instance and come back as [`HookError`]. Value-level problems that the
//! runtime recovers from are reported as [`Diagnostic`]s: they are logged
//! through `tracing` and kept in a bounded buffer on the runtime.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::types::{HookKind, InstanceId};

/// Boxed error type carried by user-facing failures (factories, effects, renders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// HookError
// =============================================================================

/// Errors surfaced to whoever invoked `mount`, `render` or a tick.
#[derive(Debug, Error)]
pub enum HookError {
    /// Hook kind at a position differs from the previous render.
    #[error("hook order violation in {instance} at slot {index}: expected {expected}, found {found}")]
    HookOrderViolation {
        instance: InstanceId,
        index: usize,
        expected: HookKind,
        found: HookKind,
    },

    /// Number of hook calls differs between renders.
    #[error("hook count mismatch in {instance}: previous render made {expected} hook calls, this one made {found}")]
    HookCountMismatch {
        instance: InstanceId,
        expected: usize,
        found: usize,
    },

    /// The slot holds a value of a different type than the hook asked for.
    #[error("slot {index} of {instance} holds a different value type than requested")]
    SlotTypeMismatch { instance: InstanceId, index: usize },

    /// A memo factory failed. The slot keeps its last good value.
    #[error("memo factory failed in {instance} at slot {index}")]
    Factory {
        instance: InstanceId,
        index: usize,
        #[source]
        source: BoxError,
    },

    /// The render function itself returned an error.
    #[error("render failed")]
    Render(#[source] BoxError),

    /// An earlier structural error broke this instance.
    #[error("{0} is broken by an earlier structural error and must be remounted")]
    InstanceBroken(InstanceId),

    #[error("{0} is not mounted")]
    NotMounted(InstanceId),

    /// Render was requested while the instance was already rendering or committing.
    #[error("{0} was re-entered while rendering or committing")]
    Reentrant(InstanceId),

    /// Effects kept scheduling changing updates.
    #[error("updates did not settle after {ticks} ticks")]
    UpdateLoop { ticks: usize },
}

impl HookError {
    /// Wrap an arbitrary error raised by a render function.
    pub fn render(err: impl Into<BoxError>) -> Self {
        Self::Render(err.into())
    }

    /// Structural errors leave the slot store inconsistent and break the instance.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::HookOrderViolation { .. }
                | Self::HookCountMismatch { .. }
                | Self::SlotTypeMismatch { .. }
        )
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Which half of an effect slot failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectPhase {
    Effect,
    Cleanup,
}

impl fmt::Display for EffectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect => f.write_str("effect"),
            Self::Cleanup => f.write_str("cleanup"),
        }
    }
}

/// A recoverable condition the runtime reported and moved past.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A dependency list changed length between renders. Treated as "changed".
    DependencyShapeChanged {
        instance: InstanceId,
        slot: usize,
        previous: usize,
        next: usize,
    },
    /// An effect or its cleanup returned an error or panicked.
    EffectFailed {
        instance: InstanceId,
        slot: usize,
        phase: EffectPhase,
        message: String,
    },
    /// A state setter targeted an unmounted instance.
    StaleUpdateDropped { instance: InstanceId, slot: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DependencyShapeChanged { instance, slot, previous, next } => write!(
                f,
                "dependency list of {instance} slot {slot} changed length from {previous} to {next}"
            ),
            Self::EffectFailed { instance, slot, phase, message } => {
                write!(f, "{phase} of {instance} slot {slot} failed: {message}")
            }
            Self::StaleUpdateDropped { instance, slot } => {
                write!(f, "dropped update to slot {slot} of unmounted {instance}")
            }
        }
    }
}

/// Shared, bounded diagnostics buffer.
///
/// Cloning shares the buffer. Setters keep a clone so they can still report
/// after their instance is gone.
#[derive(Clone)]
pub(crate) struct Diagnostics {
    buffer: Rc<RefCell<VecDeque<Diagnostic>>>,
    capacity: usize,
}

impl Diagnostics {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(VecDeque::new())),
            capacity,
        }
    }

    /// Log and retain a diagnostic.
    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::DependencyShapeChanged { instance, slot, .. } => {
                tracing::warn!(instance = %instance, slot, "{diagnostic}");
            }
            Diagnostic::EffectFailed { instance, slot, .. } => {
                tracing::error!(instance = %instance, slot, "{diagnostic}");
            }
            Diagnostic::StaleUpdateDropped { instance, slot } => {
                tracing::debug!(instance = %instance, slot, "{diagnostic}");
            }
        }

        if self.capacity == 0 {
            return;
        }
        let mut buffer = self.buffer.borrow_mut();
        if buffer.len() == self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(diagnostic);
    }

    pub(crate) fn take(&self) -> Vec<Diagnostic> {
        self.buffer.borrow_mut().drain(..).collect()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buffer.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stale(slot: usize) -> Diagnostic {
        Diagnostic::StaleUpdateDropped {
            instance: InstanceId::new(1),
            slot,
        }
    }

    #[test]
    fn test_fatal_classification() {
        let id = InstanceId::new(0);
        assert!(HookError::HookCountMismatch { instance: id, expected: 2, found: 3 }.is_fatal());
        assert!(HookError::SlotTypeMismatch { instance: id, index: 0 }.is_fatal());
        assert!(!HookError::NotMounted(id).is_fatal());
        assert!(!HookError::render("boom").is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = HookError::HookOrderViolation {
            instance: InstanceId::new(3),
            index: 1,
            expected: HookKind::State,
            found: HookKind::Effect,
        };
        assert_eq!(
            err.to_string(),
            "hook order violation in c3 at slot 1: expected state, found effect"
        );
    }

    #[test]
    fn test_diagnostics_bounded() {
        let diagnostics = Diagnostics::new(2);
        diagnostics.emit(stale(0));
        diagnostics.emit(stale(1));
        diagnostics.emit(stale(2));

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.take(), vec![stale(1), stale(2)]);
        assert_eq!(diagnostics.len(), 0);
    }

    #[test]
    fn test_diagnostics_zero_capacity_keeps_nothing() {
        let diagnostics = Diagnostics::new(0);
        diagnostics.emit(stale(0));
        assert!(diagnostics.take().is_empty());
    }
}
