use super::EntityId;

/// Initiative-ordered sequence of living entities plus the active cursor.
///
/// Built once when the encounter starts and never re-sorted. The sequence only
/// shrinks (entity death) and the cursor only moves through [`TurnOrder::step`]
/// or the bookkeeping in [`TurnOrder::remove`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    entries: Vec<EntityId>,
    cursor: usize,
}

impl TurnOrder {
    /// Sorts by initiative descending. Ties keep their insertion order.
    pub fn from_initiative(entries: impl IntoIterator<Item = (EntityId, i32)>) -> Self {
        let mut ranked: Vec<(EntityId, i32)> = entries.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        Self::from_sequence(ranked.into_iter().map(|(id, _)| id))
    }

    /// Uses the given order as-is, cursor at the first entry.
    pub fn from_sequence(entries: impl IntoIterator<Item = EntityId>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Places the cursor, clamped to the last entry.
    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor.min(self.entries.len().saturating_sub(1));
        self
    }

    pub fn current(&self) -> Option<EntityId> {
        self.entries.get(self.cursor).copied()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().copied()
    }

    /// Moves the cursor forward by one, wrapping at the end.
    pub fn step(&mut self) -> Option<EntityId> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        self.current()
    }

    /// Removes `id` and keeps the cursor on the same logical next actor.
    ///
    /// Removing an entry at or before the cursor pulls the cursor back by one so
    /// the next [`step`](Self::step) lands on the entry that followed it. When
    /// the cursor sits at index 0 and that entry is removed, the cursor wraps to
    /// the new last index for the same reason. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| *entry == id) else {
            return false;
        };
        self.entries.remove(index);

        if index < self.cursor || (index == self.cursor && self.cursor > 0) {
            self.cursor -= 1;
        } else if index == self.cursor {
            self.cursor = self.entries.len().saturating_sub(1);
        }
        true
    }
}

/// Scheduler state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// Waiting for the player at this turn-order index to act.
    AwaitingPlayerAction(usize),
    /// The enemy at this index is being auto-resolved.
    ResolvingEnemyAction(usize),
    AllEnemiesDefeated,
    AllPlayersDefeated,
}

impl TurnPhase {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::AllEnemiesDefeated | Self::AllPlayersDefeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: EntityId = EntityId(1);
    const P2: EntityId = EntityId(2);
    const E1: EntityId = EntityId(3);
    const E2: EntityId = EntityId(4);

    #[test]
    fn initiative_sorts_descending_and_keeps_ties_stable() {
        let order = TurnOrder::from_initiative([(P1, 10), (P2, 15), (E1, 10), (E2, 3)]);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec![P2, P1, E1, E2]);
        assert_eq!(order.current(), Some(P2));
    }

    #[test]
    fn step_wraps_around() {
        let mut order = TurnOrder::from_sequence([P1, E1]);
        assert_eq!(order.step(), Some(E1));
        assert_eq!(order.step(), Some(P1));
    }

    #[test]
    fn removing_current_actor_keeps_next_actor() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1, E2]).with_cursor(2);

        assert!(order.remove(E1));
        assert_eq!(order.cursor(), 1);
        assert_eq!(order.step(), Some(E2));
        assert_eq!(order.step(), Some(P1));
        assert_eq!(order.step(), Some(P2));
        assert!(!order.iter().any(|id| id == E1));
    }

    #[test]
    fn removing_before_cursor_shifts_it_back() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1, E2]).with_cursor(2);

        order.remove(P1);
        assert_eq!(order.current(), Some(E1));
        assert_eq!(order.step(), Some(E2));
    }

    #[test]
    fn removing_after_cursor_leaves_it() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1, E2]);

        order.remove(E1);
        assert_eq!(order.current(), Some(P1));
        assert_eq!(order.step(), Some(P2));
        assert_eq!(order.step(), Some(E2));
    }

    #[test]
    fn removing_head_at_cursor_zero_wraps() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1]);

        order.remove(P1);
        assert_eq!(order.cursor(), 1);
        assert_eq!(order.step(), Some(P2));
    }

    #[test]
    fn double_removal_is_a_no_op() {
        let mut order = TurnOrder::from_sequence([P1, P2, E1]).with_cursor(1);

        assert!(order.remove(P2));
        let cursor = order.cursor();
        assert!(!order.remove(P2));
        assert_eq!(order.cursor(), cursor);
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn removing_last_entry_empties_order() {
        let mut order = TurnOrder::from_sequence([P1]);
        order.remove(P1);
        assert!(order.is_empty());
        assert_eq!(order.current(), None);
        assert_eq!(order.step(), None);
    }
}
