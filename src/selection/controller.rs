//! Selection state machine.
//!
//! A player marks cards one at a time. Once the selection reaches the
//! group size it is evaluated:
//!
//! - **Fixed-size groups**: evaluated exactly when `k` cards are marked.
//!   A valid group commits, an invalid one is rejected; either way the
//!   selection is cleared. Cards beyond the cap are ignored.
//! - **Open-ended groups**: evaluated after every addition once the
//!   minimum is reached. A valid group commits and clears; an invalid one
//!   is kept so the player can keep adding or removing cards.

use smallvec::SmallVec;
use tracing::trace;

use crate::cards::Card;
use crate::core::config::GroupSize;
use crate::core::entity::CardId;
use crate::rules::GroupPredicate;

/// Result of toggling a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// The card was added to the selection.
    Selected,
    /// The card was removed from the selection.
    Deselected,
    /// The selection is full; nothing changed.
    Ignored,
}

/// Result of evaluating the current selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// Not enough cards yet, or an open-ended selection that is not a
    /// group yet. The selection is unchanged.
    Pending,
    /// The selection is a valid group. The selection has been cleared and
    /// the group is handed to the caller to remove from the table.
    Commit(Vec<CardId>),
    /// The selection is not a valid group and has been cleared.
    Reject,
}

/// Accumulates the cards a player has marked.
#[derive(Clone, Debug)]
pub struct SelectionController {
    group_size: GroupSize,
    selected: SmallVec<[CardId; 8]>,
}

impl SelectionController {
    /// Create an empty selection for a group size rule.
    #[must_use]
    pub fn new(group_size: GroupSize) -> Self {
        Self {
            group_size,
            selected: SmallVec::new(),
        }
    }

    /// Add a card, or remove it if already selected.
    pub fn toggle(&mut self, card: CardId) -> Toggle {
        if let Some(pos) = self.selected.iter().position(|&c| c == card) {
            self.selected.remove(pos);
            trace!(%card, size = self.selected.len(), "deselected");
            return Toggle::Deselected;
        }

        if self.group_size.cap().is_some_and(|cap| self.selected.len() >= cap) {
            return Toggle::Ignored;
        }

        self.selected.push(card);
        trace!(%card, size = self.selected.len(), "selected");
        Toggle::Selected
    }

    /// Whether the selection is large enough to evaluate.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match self.group_size {
            GroupSize::Exactly(n) => self.selected.len() == n,
            GroupSize::AtLeast(n) => self.selected.len() >= n,
        }
    }

    /// Evaluate the selection against `predicate`, looking cards up in
    /// `deck` by ID.
    pub fn evaluate(&mut self, predicate: &GroupPredicate, deck: &[Card]) -> Evaluation {
        if !self.is_ready() {
            return Evaluation::Pending;
        }

        let cards: Option<SmallVec<[&Card; 8]>> =
            self.selected.iter().map(|id| deck.get(id.index())).collect();
        let valid = cards.is_some_and(|cards| predicate.is_valid_group(&cards));

        if valid {
            let group = self.selected.drain(..).collect();
            Evaluation::Commit(group)
        } else if self.group_size.is_fixed() {
            self.selected.clear();
            Evaluation::Reject
        } else {
            Evaluation::Pending
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected cards, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    /// Check if a card is selected.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.selected.contains(&card)
    }

    /// Number of selected cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
