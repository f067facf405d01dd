//! Core type definitions
//!
//! Identifier types shared across modules.

/// Opaque element handle issued by a [`Dom`](crate::Dom) implementation
///
/// Handles are never reused within a document; a removed element keeps its
/// handle but is no longer attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// Handle to a scheduled deferred task
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Unique notification identifier
///
/// Monotonically increasing within a [`Notifier`](crate::Notifier).
pub type NotificationId = u64;

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
