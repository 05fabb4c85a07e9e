//! Per-entity mutation state machine.

/// Where a record stands with respect to remote mutations.
///
/// State transitions:
/// ```text
/// Idle ──► Pending ──┬──► Committed ──┐
///                    │                ├──► Idle
///                    └──► RolledBack ─┘
/// ```
///
/// `Committed` and `RolledBack` are settle points: the record is idle again
/// right after, they are kept only as the last outcome for UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MutationState {
    /// No request in flight.
    #[default]
    Idle,

    /// Optimistic patch applied, gateway call outstanding.
    Pending,

    /// The backend accepted the mutation.
    Committed,

    /// The backend rejected the mutation and the patch was discarded.
    RolledBack,
}

impl MutationState {
    /// Returns true if a new mutation may start from this state.
    pub fn can_begin(&self) -> bool {
        !matches!(self, MutationState::Pending)
    }

    /// Returns true if a response may settle this state.
    pub fn can_settle(&self) -> bool {
        matches!(self, MutationState::Pending)
    }

    /// Returns true for the two settle points.
    pub fn is_settled(&self) -> bool {
        matches!(self, MutationState::Committed | MutationState::RolledBack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MutationState::Idle => "Idle",
            MutationState::Pending => "Pending",
            MutationState::Committed => "Committed",
            MutationState::RolledBack => "RolledBack",
        }
    }
}

impl std::fmt::Display for MutationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(MutationState::default(), MutationState::Idle);
    }

    #[test]
    fn test_only_pending_blocks_new_mutations() {
        assert!(MutationState::Idle.can_begin());
        assert!(!MutationState::Pending.can_begin());
        assert!(MutationState::Committed.can_begin());
        assert!(MutationState::RolledBack.can_begin());
    }

    #[test]
    fn test_only_pending_can_settle() {
        assert!(!MutationState::Idle.can_settle());
        assert!(MutationState::Pending.can_settle());
        assert!(!MutationState::Committed.can_settle());
        assert!(!MutationState::RolledBack.can_settle());
    }

    #[test]
    fn test_settle_points() {
        assert!(!MutationState::Idle.is_settled());
        assert!(!MutationState::Pending.is_settled());
        assert!(MutationState::Committed.is_settled());
        assert!(MutationState::RolledBack.is_settled());
    }

    #[test]
    fn test_display() {
        assert_eq!(MutationState::Pending.to_string(), "Pending");
        assert_eq!(MutationState::RolledBack.to_string(), "RolledBack");
    }
}
