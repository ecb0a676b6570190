//! Caller-owned progress state for one assist request.

use std::fmt::Display;

/// `Idle -> Pending -> Succeeded | Failed`, one instance per request slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for AssistState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> AssistState<T> {
    /// Marks a request as in flight. Returns `false` if one already is.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    /// Records the outcome of the in-flight request.
    ///
    /// Results arriving when nothing is pending (the caller reset or moved
    /// on) are discarded and `false` is returned.
    pub fn settle<E: Display>(&mut self, result: Result<T, E>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = match result {
            Ok(value) => Self::Succeeded(value),
            Err(err) => Self::Failed(err.to_string()),
        };
        true
    }

    /// Drops any in-flight or settled state.
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}
