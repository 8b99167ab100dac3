//! Game session: one variant, one deck, one player.
//!
//! `GameSession` binds a `TableManager` and a `SelectionController` to a
//! variant configuration and the external collaborators:
//! - a `RandomSource` for deck order and table placement
//! - a `FeedbackSink` for haptics and animation
//! - a `Scheduler` for lowering the perfect-group flag (wall clock by
//!   default)
//!
//! Every public operation runs to completion before returning and leaves
//! the deck partition intact.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::feedback::{FeedbackSink, NullFeedback};
use super::timer::{Scheduler, SystemScheduler, TimerId};
use crate::cards::Card;
use crate::core::config::{ConfigError, ScoreRule, TablePolicy, Variant, VariantConfig};
use crate::core::entity::CardId;
use crate::core::rng::{GameRng, RandomSource};
use crate::selection::{Evaluation, SelectionController, Toggle};
use crate::zones::TableManager;

/// Read-only snapshot of a session for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub variant: Variant,
    pub draw_pile_count: usize,
    pub table: Vec<Card>,
    pub selected: Vec<CardId>,
    pub score: usize,
    pub is_over: bool,
    pub perfect_group: bool,
    pub last_dealt: Option<CardId>,
}

/// One active game.
///
/// ```
/// use shapelogic::core::Variant;
/// use shapelogic::session::GameSession;
///
/// let mut session = GameSession::new(Variant::Classic, 42);
/// assert!(session.table_ids().len() >= 12);
///
/// let group = session.find_valid_group().unwrap();
/// for card in group {
///     session.select_card(card);
/// }
/// assert_eq!(session.score(), 1);
/// ```
pub struct GameSession {
    config: VariantConfig,
    table: TableManager,
    selection: SelectionController,
    rng: Box<dyn RandomSource>,
    feedback: Box<dyn FeedbackSink>,
    scheduler: Box<dyn Scheduler>,
    groups_committed: usize,
    perfect_group: bool,
    flash_timer: Option<TimerId>,
}

/// Builder for creating a GameSession.
pub struct SessionBuilder {
    config: VariantConfig,
    rng: Option<Box<dyn RandomSource>>,
    feedback: Box<dyn FeedbackSink>,
    scheduler: Box<dyn Scheduler>,
    seed: u64,
}

impl SessionBuilder {
    /// Start from a built-in variant.
    pub fn new(variant: Variant) -> Self {
        Self::from_config(variant.config())
    }

    /// Start from a custom configuration. It is validated by `build`.
    pub fn from_config(config: VariantConfig) -> Self {
        Self {
            config,
            rng: None,
            feedback: Box::new(NullFeedback),
            scheduler: Box::new(SystemScheduler::new()),
            seed: 0,
        }
    }

    /// Seed for the default `GameRng`. Ignored if a random source is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the randomness source.
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set the feedback sink.
    pub fn feedback(mut self, feedback: impl FeedbackSink + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    /// Set the scheduler for transient flags. Defaults to the wall clock.
    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Validate the configuration, build the session and deal the first
    /// table.
    pub fn build(self) -> Result<GameSession, ConfigError> {
        self.config.validate()?;
        let seed = self.seed;
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(GameRng::new(seed)) as Box<dyn RandomSource>);
        Ok(GameSession::assemble(self.config, rng, self.feedback, self.scheduler))
    }
}

impl GameSession {
    /// Start a built-in variant with a seeded RNG and no feedback.
    #[must_use]
    pub fn new(variant: Variant, seed: u64) -> Self {
        Self::assemble(
            variant.config(),
            Box::new(GameRng::new(seed)),
            Box::new(NullFeedback),
            Box::new(SystemScheduler::new()),
        )
    }

    /// Builder for custom collaborators or configurations.
    pub fn builder(variant: Variant) -> SessionBuilder {
        SessionBuilder::new(variant)
    }

    fn assemble(
        config: VariantConfig,
        rng: Box<dyn RandomSource>,
        feedback: Box<dyn FeedbackSink>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let mut session = Self {
            table: TableManager::new(&config),
            selection: SelectionController::new(config.group_size),
            config,
            rng,
            feedback,
            scheduler,
            groups_committed: 0,
            perfect_group: false,
            flash_timer: None,
        };
        session.new_game();
        session
    }

    // === Operations ===

    /// Reshuffle the deck, clear every pile and deal the first table.
    pub fn new_game(&mut self) {
        self.lower_flag();
        self.groups_committed = 0;
        self.selection.clear();
        self.table.reset(self.rng.as_mut());
        self.table.restore(self.config.table_policy, self.rng.as_mut());

        debug!(
            variant = %self.config.variant,
            table = self.table.table().len(),
            remaining = self.table.draw_pile_count(),
            "new game"
        );
    }

    /// Toggle a card on the table and evaluate the selection.
    ///
    /// Cards that are not on the table, and additions past a fixed group
    /// size, are ignored.
    pub fn select_card(&mut self, card: CardId) {
        self.expire_flag();
        if !self.table.is_on_table(card) {
            return;
        }

        let toggle = self.selection.toggle(card);
        if toggle == Toggle::Ignored {
            return;
        }
        self.feedback.on_card_selected();
        if toggle == Toggle::Deselected {
            return;
        }

        match self.selection.evaluate(self.table.predicate(), self.table.deck()) {
            Evaluation::Pending => {}
            Evaluation::Commit(group) => self.commit(&group),
            Evaluation::Reject => {
                debug!("rejected selection");
                self.feedback.on_invalid_group();
            }
        }
    }

    /// Deal one extra batch on request.
    ///
    /// Only replenishing variants deal, and only while the draw pile has
    /// cards and the table is below the configured maximum. Returns the
    /// number of cards dealt.
    pub fn request_more_cards(&mut self) -> usize {
        self.expire_flag();
        let TablePolicy::Replenish { batch, .. } = self.config.table_policy else {
            return 0;
        };
        if self.table.draw_pile_count() == 0 {
            return 0;
        }
        if self
            .config
            .max_table_cards
            .is_some_and(|max| self.table.table().len() >= max)
        {
            return 0;
        }

        self.table.deal_batch(batch, self.rng.as_mut())
    }

    /// Deliver an elapsed timer. Stale or unknown timers are ignored.
    pub fn fire_timer(&mut self, id: TimerId) {
        if self.flash_timer == Some(id) {
            self.flash_timer = None;
            self.perfect_group = false;
        }
    }

    fn commit(&mut self, group: &[CardId]) {
        let perfect = self.config.perfect_flash.is_some() && {
            let cards: Vec<&Card> = group.iter().filter_map(|&id| self.table.card(id)).collect();
            self.table.predicate().is_perfect_group(&cards)
        };

        if !self.table.remove_group(group) {
            return;
        }
        self.groups_committed += 1;
        self.feedback.on_valid_group();

        // The selection is already empty, so no collected card stays selected
        self.table.restore(self.config.table_policy, self.rng.as_mut());

        debug!(
            ?group,
            perfect,
            score = self.score(),
            table = self.table.table().len(),
            remaining = self.table.draw_pile_count(),
            "committed group"
        );

        if perfect {
            self.raise_flag();
        }
        if self.is_over() {
            info!(variant = %self.config.variant, score = self.score(), "game over");
        }
    }

    fn raise_flag(&mut self) {
        let Some(duration) = self.config.perfect_flash else {
            return;
        };
        if let Some(old) = self.flash_timer.take() {
            self.scheduler.cancel(old);
        }
        self.perfect_group = true;
        self.flash_timer = Some(self.scheduler.schedule(duration));
        self.feedback.on_perfect_group();
    }

    /// Lower the flag if its timer ran out without being fired.
    fn expire_flag(&mut self) {
        if self.flash_elapsed() {
            self.lower_flag();
        }
    }

    fn flash_elapsed(&self) -> bool {
        self.flash_timer.is_some_and(|id| self.scheduler.has_elapsed(id))
    }

    fn lower_flag(&mut self) {
        if let Some(old) = self.flash_timer.take() {
            self.scheduler.cancel(old);
        }
        self.perfect_group = false;
    }

    // === Queries ===

    /// The variant being played.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_pile_count(&self) -> usize {
        self.table.draw_pile_count()
    }

    /// Cards on the table, in display order.
    #[must_use]
    pub fn table_cards(&self) -> Vec<&Card> {
        self.table.table_cards()
    }

    /// IDs of the cards on the table, in display order.
    #[must_use]
    pub fn table_ids(&self) -> Vec<CardId> {
        self.table.table().iter().copied().collect()
    }

    /// Selected card IDs, in selection order.
    #[must_use]
    pub fn selected_card_ids(&self) -> &[CardId] {
        self.selection.selected()
    }

    /// Cards collected through committed groups, in commit order.
    #[must_use]
    pub fn collected(&self) -> Vec<CardId> {
        self.table.collected().iter().copied().collect()
    }

    /// Score under the variant's rule.
    #[must_use]
    pub fn score(&self) -> usize {
        match self.config.score_rule {
            ScoreRule::Groups => self.groups_committed,
            ScoreRule::Cards => self.table.collected().len(),
        }
    }

    /// Whether no further play is possible.
    #[must_use]
    pub fn is_over(&self) -> bool {
        if self.table.draw_pile_count() > 0 {
            return false;
        }
        match self.config.table_policy {
            TablePolicy::Replenish { .. } => !self.table.has_valid_group(),
            TablePolicy::FixedSize { .. } => self.table.table().is_empty(),
        }
    }

    /// Whether the perfect-group flag is raised.
    ///
    /// Reads false once the flash duration has passed, even if the timer
    /// was never delivered through `fire_timer`.
    #[must_use]
    pub fn perfect_group_flag(&self) -> bool {
        self.perfect_group && !self.flash_elapsed()
    }

    /// The card dealt when the draw pile ran out, if the marker is enabled.
    #[must_use]
    pub fn last_dealt_card(&self) -> Option<CardId> {
        if self.config.mark_last_dealt {
            self.table.last_dealt()
        } else {
            None
        }
    }

    /// A valid group currently on the table, if any.
    #[must_use]
    pub fn find_valid_group(&self) -> Option<Vec<CardId>> {
        self.table.find_valid_group()
    }

    /// The underlying table manager.
    #[must_use]
    pub fn table_manager(&self) -> &TableManager {
        &self.table
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            variant: self.config.variant,
            draw_pile_count: self.draw_pile_count(),
            table: self.table_cards().into_iter().cloned().collect(),
            selected: self.selected_card_ids().to_vec(),
            score: self.score(),
            is_over: self.is_over(),
            perfect_group: self.perfect_group_flag(),
            last_dealt: self.last_dealt_card(),
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("variant", &self.config.variant)
            .field("draw_pile", &self.table.draw_pile_count())
            .field("table", &self.table.table().len())
            .field("selected", &self.selection.selected())
            .field("score", &self.score())
            .field("perfect_group", &self.perfect_group_flag())
            .finish()
    }
}
