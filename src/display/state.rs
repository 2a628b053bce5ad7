// SPDX-License-Identifier: MPL-2.0

//! Display lifecycle states

use std::fmt;

/// Lifecycle of a display session
///
/// ```text
/// Unopened ─► Opening ─► Initialized ─► Populated ─► Destroyed
///                │             │                        ▲
///                └──────► Failed ───────────────────────┘
/// ```
///
/// A display built from an existing handle starts in `Opening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayState {
    #[default]
    Unopened,
    Opening,
    Initialized,
    Populated,
    Failed,
    Destroyed,
}

impl DisplayState {
    /// Check if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: DisplayState) -> bool {
        use DisplayState::*;
        matches!(
            (self, next),
            (Unopened, Opening)
                | (Unopened, Failed)
                | (Opening, Initialized)
                | (Opening, Failed)
                | (Initialized, Populated)
                | (Initialized, Failed)
                | (Populated, Destroyed)
                | (Failed, Destroyed)
        )
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DisplayState::Unopened => "unopened",
            DisplayState::Opening => "opening",
            DisplayState::Initialized => "initialized",
            DisplayState::Populated => "populated",
            DisplayState::Failed => "failed",
            DisplayState::Destroyed => "destroyed",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        use DisplayState::*;
        assert!(Unopened.can_transition_to(Opening));
        assert!(Opening.can_transition_to(Failed));
        assert!(Initialized.can_transition_to(Populated));
        assert!(Failed.can_transition_to(Destroyed));
        assert!(!Populated.can_transition_to(Initialized));
        assert!(!Destroyed.can_transition_to(Populated));
        assert!(!Failed.can_transition_to(Populated));
    }
}
