//! Core types shared by every part of the runtime.

use std::fmt;

// =============================================================================
// Instance Identity
// =============================================================================

/// Unique identity of a mounted component instance.
///
/// Ids are handed out by a [`Runtime`](crate::Runtime) in mount order and
/// never reused for the lifetime of that runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

// =============================================================================
// Hook Kinds
// =============================================================================

/// Kind tag of a hook slot.
///
/// The sequence of kinds an instance produces must be identical on every
/// render; a mismatch is a structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    State,
    Memo,
    Effect,
    Ref,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Memo => "memo",
            Self::Effect => "effect",
            Self::Ref => "ref",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Mount State
// =============================================================================

/// Whether an instance is currently mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted,
}

// =============================================================================
// Instance Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Transient status bits of an instance.
    ///
    /// Combine with bitwise OR: `InstanceFlags::RENDERING | InstanceFlags::COMMITTING`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InstanceFlags: u8 {
        const NONE = 0;
        /// Render function is currently executing.
        const RENDERING = 1 << 0;
        /// Effects of the last render are being committed.
        const COMMITTING = 1 << 1;
        /// A structural error occurred; the instance must be remounted.
        const BROKEN = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_display() {
        assert_eq!(InstanceId::new(7).to_string(), "c7");
        assert_eq!(InstanceId::new(7).as_u64(), 7);
    }

    #[test]
    fn test_hook_kind_display() {
        assert_eq!(HookKind::State.to_string(), "state");
        assert_eq!(HookKind::Effect.to_string(), "effect");
    }

    #[test]
    fn test_flags_combine() {
        let flags = InstanceFlags::RENDERING | InstanceFlags::BROKEN;
        assert!(flags.contains(InstanceFlags::BROKEN));
        assert!(!flags.contains(InstanceFlags::COMMITTING));
        assert_eq!(InstanceFlags::default(), InstanceFlags::NONE);
    }
}
