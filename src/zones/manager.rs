//! Table manager: draw pile, table and collected cards.
//!
//! The `TableManager` owns the partition of a deck into three piles and
//! keeps it exact: every card is in exactly one pile at all times. It
//! supports:
//! - Dealing from the top (tail) of the draw pile onto the table
//! - Brute-force search for a valid group on the table
//! - Two-phase invariant restoration for replenishing variants
//! - Fixed-size refill for the projective variant
//! - Removing a committed group from the table
//!
//! Every mutation either fully succeeds or does nothing. Running out of
//! cards is never an error.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::cards::{generate_deck, Card};
use crate::core::config::{TablePolicy, VariantConfig};
use crate::core::entity::CardId;
use crate::core::rng::RandomSource;
use crate::rules::{find_group, GroupPredicate};

/// The pile a card currently sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pile {
    /// Not yet dealt.
    DrawPile,
    /// In play and selectable.
    Table,
    /// Removed as part of a committed group.
    Collected,
}

/// Tracks which pile every card of a deck is in.
///
/// ## Usage
///
/// ```
/// use shapelogic::core::{InOrder, Variant};
/// use shapelogic::zones::TableManager;
///
/// let config = Variant::Classic.config();
/// let mut manager = TableManager::new(&config);
/// manager.reset(&mut InOrder);
///
/// manager.ensure_invariant(12, 3, &mut InOrder);
/// assert!(manager.table().len() >= 12);
/// assert!(manager.has_valid_group());
/// assert_eq!(manager.draw_pile_count() + manager.table().len(), 81);
/// ```
#[derive(Clone, Debug)]
pub struct TableManager {
    /// Full deck, indexed by card ID.
    deck: Arc<[Card]>,

    predicate: GroupPredicate,

    /// Card locations: card_id -> pile
    locations: FxHashMap<CardId, Pile>,

    /// Undealt cards. The last element is the top.
    draw_pile: Vector<CardId>,

    /// Cards in play, in display order.
    table: Vector<CardId>,

    /// Committed cards, in commit order.
    collected: Vector<CardId>,

    /// Insert dealt cards at random positions.
    scatter: bool,

    /// The card dealt when the draw pile ran out.
    last_dealt: Option<CardId>,
}

impl TableManager {
    /// Create a manager for a variant with every card in the draw pile,
    /// in canonical order.
    #[must_use]
    pub fn new(config: &VariantConfig) -> Self {
        let deck: Arc<[Card]> = generate_deck(config).into();
        let draw_pile: Vector<CardId> = deck.iter().map(|c| c.id).collect();
        let locations = draw_pile.iter().map(|&id| (id, Pile::DrawPile)).collect();

        Self {
            deck,
            predicate: GroupPredicate::for_config(config),
            locations,
            draw_pile,
            table: Vector::new(),
            collected: Vector::new(),
            scatter: config.scatter_deals,
            last_dealt: None,
        }
    }

    /// Put every card back in the draw pile and shuffle it.
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        let mut pile: Vec<CardId> = self.deck.iter().map(|c| c.id).collect();
        rng.shuffle_cards(&mut pile);

        self.draw_pile = pile.into_iter().collect();
        self.table.clear();
        self.collected.clear();
        self.last_dealt = None;
        for pile in self.locations.values_mut() {
            *pile = Pile::DrawPile;
        }
    }

    // === Dealing ===

    /// Deal up to `n` cards from the top of the draw pile onto the table.
    ///
    /// Returns the number of cards dealt; fewer than `n` only when the
    /// draw pile runs out.
    pub fn deal_batch(&mut self, n: usize, rng: &mut dyn RandomSource) -> usize {
        let mut dealt = 0;
        while dealt < n {
            let Some(id) = self.draw_pile.pop_back() else {
                break;
            };

            if self.scatter {
                let index = rng.insert_index(self.table.len()).min(self.table.len());
                self.table.insert(index, id);
            } else {
                self.table.push_back(id);
            }
            self.locations.insert(id, Pile::Table);

            if self.draw_pile.is_empty() {
                self.last_dealt = Some(id);
            }
            dealt += 1;
        }

        if dealt > 0 {
            debug!(dealt, table = self.table.len(), remaining = self.draw_pile.len(), "dealt cards");
        }
        dealt
    }

    /// Deal until the table holds at least `floor` cards and a valid group,
    /// or the draw pile is empty.
    ///
    /// The group check always runs, even when the floor was already met:
    /// removing a group can leave a large table without any valid group.
    pub fn ensure_invariant(&mut self, floor: usize, batch: usize, rng: &mut dyn RandomSource) {
        let batch = batch.max(1);

        while self.table.len() < floor && !self.draw_pile.is_empty() {
            self.deal_batch(batch, rng);
        }

        while !self.draw_pile.is_empty() && !self.has_valid_group() {
            self.deal_batch(batch, rng);
        }
    }

    /// Refill one card at a time until the table holds `target` cards or
    /// the draw pile is empty. No group search is done.
    pub fn maintain_fixed_size(&mut self, target: usize, rng: &mut dyn RandomSource) {
        while self.table.len() < target && !self.draw_pile.is_empty() {
            self.deal_batch(1, rng);
        }
    }

    /// Restore the table according to a variant's policy.
    pub fn restore(&mut self, policy: TablePolicy, rng: &mut dyn RandomSource) {
        match policy {
            TablePolicy::Replenish { floor, batch } => self.ensure_invariant(floor, batch, rng),
            TablePolicy::FixedSize { target } => self.maintain_fixed_size(target, rng),
        }
    }

    // === Groups ===

    /// Whether the table holds at least one valid group.
    #[must_use]
    pub fn has_valid_group(&self) -> bool {
        self.find_valid_group().is_some()
    }

    /// The first valid group on the table, if any.
    #[must_use]
    pub fn find_valid_group(&self) -> Option<Vec<CardId>> {
        let cards = self.table_cards();
        find_group(&self.predicate, &cards)
    }

    /// Move a group from the table to the collected pile.
    ///
    /// Does nothing and returns `false` if any card is not on the table or
    /// appears twice.
    pub fn remove_group(&mut self, group: &[CardId]) -> bool {
        let all_on_table = group
            .iter()
            .enumerate()
            .all(|(i, id)| self.is_on_table(*id) && !group[..i].contains(id));
        if !all_on_table {
            return false;
        }

        self.table.retain(|id| !group.contains(id));
        for &id in group {
            self.collected.push_back(id);
            self.locations.insert(id, Pile::Collected);
        }
        debug!(?group, table = self.table.len(), "removed group");
        true
    }

    // === Queries ===

    /// The validity predicate in use.
    #[must_use]
    pub fn predicate(&self) -> &GroupPredicate {
        &self.predicate
    }

    /// The full deck, indexed by card ID.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.deck.get(id.index())
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    /// Undealt cards, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardId> {
        &self.draw_pile
    }

    /// Card IDs on the table, in display order.
    #[must_use]
    pub fn table(&self) -> &Vector<CardId> {
        &self.table
    }

    /// Cards on the table, in display order.
    #[must_use]
    pub fn table_cards(&self) -> Vec<&Card> {
        self.table.iter().map(|id| &self.deck[id.index()]).collect()
    }

    /// Committed cards, in commit order.
    #[must_use]
    pub fn collected(&self) -> &Vector<CardId> {
        &self.collected
    }

    /// The pile a card is in.
    #[must_use]
    pub fn pile_of(&self, id: CardId) -> Option<Pile> {
        self.locations.get(&id).copied()
    }

    /// Check if a card is on the table.
    #[must_use]
    pub fn is_on_table(&self, id: CardId) -> bool {
        self.locations.get(&id) == Some(&Pile::Table)
    }

    /// The card dealt when the draw pile ran out, if it has.
    #[must_use]
    pub fn last_dealt(&self) -> Option<CardId> {
        self.last_dealt
    }

    /// Check that draw pile, table and collected cards partition the deck
    /// exactly once and agree with the location index.
    #[must_use]
    pub fn is_partitioned(&self) -> bool {
        let total = self.draw_pile.len() + self.table.len() + self.collected.len();
        if total != self.deck.len() || self.locations.len() != self.deck.len() {
            return false;
        }

        let piles = [
            (Pile::DrawPile, &self.draw_pile),
            (Pile::Table, &self.table),
            (Pile::Collected, &self.collected),
        ];
        piles.iter().all(|(pile, ids)| {
            ids.iter().all(|id| self.locations.get(id) == Some(pile))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Variant;
    use crate::core::rng::{GameRng, InOrder};

    fn in_order(variant: Variant) -> TableManager {
        let mut manager = TableManager::new(&variant.config());
        manager.reset(&mut InOrder);
        manager
    }

    #[test]
    fn test_new_is_all_draw_pile() {
        let manager = TableManager::new(&Variant::Classic.config());
        assert_eq!(manager.draw_pile_count(), 81);
        assert!(manager.table().is_empty());
        assert!(manager.collected().is_empty());
        assert!(manager.is_partitioned());
        assert_eq!(manager.pile_of(CardId(0)), Some(Pile::DrawPile));
    }

    #[test]
    fn test_deal_batch_pops_top() {
        let mut manager = in_order(Variant::Classic);

        assert_eq!(manager.deal_batch(3, &mut InOrder), 3);
        let table: Vec<_> = manager.table().iter().copied().collect();
        assert_eq!(table, vec![CardId(0), CardId(1), CardId(2)]);
        assert_eq!(manager.draw_pile_count(), 78);
        assert!(manager.is_on_table(CardId(1)));
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_deal_batch_short_pile() {
        let mut manager = in_order(Variant::FourState);

        assert_eq!(manager.deal_batch(62, &mut InOrder), 62);
        assert_eq!(manager.deal_batch(4, &mut InOrder), 2);
        assert_eq!(manager.deal_batch(4, &mut InOrder), 0);
        assert_eq!(manager.table().len(), 64);
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_last_dealt_marker() {
        let mut manager = in_order(Variant::Classic);
        manager.deal_batch(78, &mut InOrder);
        assert_eq!(manager.last_dealt(), None);

        manager.deal_batch(3, &mut InOrder);
        assert_eq!(manager.last_dealt(), Some(CardId(80)));

        manager.reset(&mut InOrder);
        assert_eq!(manager.last_dealt(), None);
    }

    #[test]
    fn test_scatter_keeps_partition() {
        let config = Variant::Extended.config();
        let mut manager = TableManager::new(&config);
        let mut rng = GameRng::new(3);
        manager.reset(&mut rng);

        manager.deal_batch(30, &mut rng);
        assert_eq!(manager.table().len(), 30);
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_ensure_invariant_initial_deal() {
        for variant in [Variant::Classic, Variant::Extended, Variant::FourState] {
            let config = variant.config();
            let TablePolicy::Replenish { floor, batch } = config.table_policy else {
                panic!("replenishing variant expected");
            };
            let mut manager = TableManager::new(&config);
            let mut rng = GameRng::new(11);
            manager.reset(&mut rng);

            manager.ensure_invariant(floor, batch, &mut rng);

            assert!(manager.table().len() >= 12, "{variant}");
            assert!(manager.has_valid_group() || manager.draw_pile_count() == 0, "{variant}");
            assert_eq!(manager.table().len() % batch, 0, "{variant}");
            assert!(manager.is_partitioned());
        }
    }

    #[test]
    fn test_ensure_invariant_terminates_on_empty_pile() {
        let mut manager = in_order(Variant::Classic);
        manager.deal_batch(81, &mut InOrder);
        manager.ensure_invariant(12, 3, &mut InOrder);
        assert_eq!(manager.draw_pile_count(), 0);
    }

    #[test]
    fn test_maintain_fixed_size() {
        let mut manager = in_order(Variant::Projective);
        manager.maintain_fixed_size(7, &mut InOrder);
        assert_eq!(manager.table().len(), 7);
        assert_eq!(manager.draw_pile_count(), 56);

        // Numbers 1, 2, 3
        assert!(manager.remove_group(&[CardId(0), CardId(1), CardId(2)]));
        manager.restore(TablePolicy::FixedSize { target: 7 }, &mut InOrder);
        assert_eq!(manager.table().len(), 7);
        assert_eq!(manager.collected().len(), 3);
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_remove_group() {
        let mut manager = in_order(Variant::Classic);
        manager.deal_batch(12, &mut InOrder);

        assert!(manager.remove_group(&[CardId(0), CardId(1), CardId(2)]));
        assert_eq!(manager.table().len(), 9);
        assert_eq!(manager.pile_of(CardId(1)), Some(Pile::Collected));
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_remove_group_missing_card_is_noop() {
        let mut manager = in_order(Variant::Classic);
        manager.deal_batch(12, &mut InOrder);

        // Card 50 is still in the draw pile
        assert!(!manager.remove_group(&[CardId(0), CardId(1), CardId(50)]));
        assert!(!manager.remove_group(&[CardId(0), CardId(0), CardId(1)]));
        assert_eq!(manager.table().len(), 12);
        assert!(manager.collected().is_empty());
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_find_valid_group() {
        let mut manager = in_order(Variant::Classic);
        assert_eq!(manager.find_valid_group(), None);

        manager.deal_batch(3, &mut InOrder);
        assert_eq!(
            manager.find_valid_group(),
            Some(vec![CardId(0), CardId(1), CardId(2)])
        );
    }

    #[test]
    fn test_clone_is_an_independent_snapshot() {
        let mut manager = in_order(Variant::Classic);
        manager.deal_batch(12, &mut InOrder);
        let snapshot = manager.clone();

        assert!(manager.remove_group(&[CardId(0), CardId(1), CardId(2)]));
        manager.deal_batch(3, &mut InOrder);

        assert_eq!(snapshot.table().len(), 12);
        assert_eq!(snapshot.draw_pile_count(), 69);
        assert!(snapshot.collected().is_empty());
        assert!(snapshot.is_on_table(CardId(0)));
        assert_eq!(manager.pile_of(CardId(0)), Some(Pile::Collected));
        assert!(snapshot.is_partitioned());
        assert!(manager.is_partitioned());
    }

    #[test]
    fn test_card_lookup() {
        let manager = TableManager::new(&Variant::FourState.config());
        assert_eq!(manager.card(CardId(5)).map(|c| c.id), Some(CardId(5)));
        assert!(manager.card(CardId(64)).is_none());
        assert_eq!(manager.deck().len(), 64);
    }
}
