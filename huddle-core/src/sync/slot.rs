//! Optimistic record slots.

/// A mirrored record, tagged with its confirmation state.
///
/// `Pending` carries the pre-mutation value (when one existed) so a
/// failed remote call can restore it explicitly instead of relying on a
/// refetch happening to arrive.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Matches what the remote store last confirmed.
    Confirmed(T),
    /// Locally mutated, remote call not yet acknowledged.
    Pending { value: T, original: Option<T> },
}

impl<T: Clone> Slot<T> {
    /// The currently visible value, speculative or not.
    pub fn get(&self) -> &T {
        match self {
            Slot::Confirmed(value) => value,
            Slot::Pending { value, .. } => value,
        }
    }

    pub fn get_mut(&mut self) -> &mut T {
        match self {
            Slot::Confirmed(value) => value,
            Slot::Pending { value, .. } => value,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending { .. })
    }

    /// The remote call succeeded: keep the value, drop the tag.
    pub fn confirm(&mut self) {
        if let Slot::Pending { value, .. } = self {
            *self = Slot::Confirmed(value.clone());
        }
    }

    /// The remote call failed: restore the pre-mutation value.
    /// Returns false when there is nothing to restore (the slot was a
    /// create placeholder and should be removed by the caller instead).
    pub fn rollback(&mut self) -> bool {
        if let Slot::Pending {
            original: Some(original),
            ..
        } = self
        {
            *self = Slot::Confirmed(original.clone());
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_keeps_pending_value() {
        let mut slot = Slot::Pending {
            value: 2,
            original: Some(1),
        };
        slot.confirm();
        assert_eq!(slot, Slot::Confirmed(2));
    }

    #[test]
    fn rollback_restores_original() {
        let mut slot = Slot::Pending {
            value: 2,
            original: Some(1),
        };
        assert!(slot.rollback());
        assert_eq!(slot, Slot::Confirmed(1));
    }

    #[test]
    fn rollback_without_original_is_callers_problem() {
        let mut slot = Slot::Pending {
            value: 2,
            original: None,
        };
        assert!(!slot.rollback());
        assert!(slot.is_pending());
    }
}
