//! The session: one player's side of a paired match.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use super::presenter::{Presenter, Prompt};
use crate::cards::Card;
use crate::core::config::MatchConfig;
use crate::core::error::{ConfigError, RulesError, SyncError};
use crate::core::ids::{InstanceAllocator, InstanceId, MatchId};
use crate::core::player::{Identities, Side};
use crate::core::rng::GameRng;
use crate::relations;
use crate::rules::{self, AuditEvent, MoveRequest, Outcome};
use crate::sync::{StorePayload, SyncChannel, SyncMessage};
use crate::zones::{CardRef, Table, Touched, Zone, ZoneStore};

/// Zones of the local store a player may open for viewing.
const VIEWABLE_OWN: [Zone; 4] = [Zone::Castle, Zone::Cemetery, Zone::Exile, Zone::Removal];

/// Zones of the mirror a player may open for viewing.
const VIEWABLE_OPPONENT: [Zone; 3] = [Zone::Cemetery, Zone::Exile, Zone::Removal];

/// Local store, opponent mirror and identities of one match, plus the
/// collaborators it publishes to.
///
/// Every operation either swaps in a new table and publishes it, or leaves
/// the table as it was and returns the reason. Rejections are reported to
/// the presenter according to `RulesError::is_silent` before returning, so
/// callers may ignore the `Err`.
///
/// ```
/// use castle_duel::core::{Identities, MatchConfig, MatchId, PlayerId};
/// use castle_duel::session::{RecordingPresenter, Session};
/// use castle_duel::sync::LocalChannel;
///
/// let (channel, _peer) = LocalChannel::pair();
/// let ids = Identities::new(PlayerId::random(), PlayerId::random());
/// let config = MatchConfig::default().with_seed(7);
/// let mut session = Session::new(MatchId::random(), ids, config, channel, RecordingPresenter::new()).unwrap();
///
/// assert!(session.draw_hand().is_err());
/// assert_eq!(session.presenter().warnings.len(), 1);
/// ```
pub struct Session<C: SyncChannel, P: Presenter> {
    match_id: MatchId,
    ids: Identities,
    config: MatchConfig,
    table: Table,
    rng: GameRng,
    alloc: InstanceAllocator,
    channel: C,
    presenter: P,
    acked: Rc<Cell<usize>>,
}

impl<C: SyncChannel, P: Presenter> Session<C, P> {
    /// Create a session with empty stores.
    pub fn new(
        match_id: MatchId,
        ids: Identities,
        config: MatchConfig,
        channel: C,
        presenter: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::from_seed_opt(config.seed);
        info!(%match_id, local = %ids.local, remote = %ids.remote, seed = rng.seed(), "session created");

        Ok(Self {
            match_id,
            ids,
            config,
            table: Table::default(),
            rng,
            alloc: InstanceAllocator::for_player(&ids),
            channel,
            presenter,
            acked: Rc::new(Cell::new(0)),
        })
    }

    // === Accessors ===

    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    pub fn identities(&self) -> &Identities {
        &self.ids
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The local player's authoritative store.
    pub fn local(&self) -> &ZoneStore {
        &self.table.local
    }

    /// Best-known copy of the opponent's store.
    pub fn mirror(&self) -> &ZoneStore {
        &self.table.mirror
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Broadcasts the transport has acknowledged.
    pub fn acked_broadcasts(&self) -> usize {
        self.acked.get()
    }

    // === Setup ===

    /// Put the local deck into the Castle and shuffle it.
    ///
    /// Cards become owned by the local player, lose any relation fields
    /// they came with and get fresh instance IDs from this player's half
    /// of the ID space, so they never collide with the opponent's cards.
    pub fn load_deck<I>(&mut self, cards: I) -> Touched
    where
        I: IntoIterator<Item = Card>,
    {
        let mut next = self.table.clone();
        let mut loaded = 0;
        for mut card in cards {
            let Some(idx) = self.alloc.next_id() else {
                warn!(match_id = %self.match_id, loaded, "instance IDs exhausted, rest of deck skipped");
                break;
            };
            card.idx = idx;
            card.owner = self.ids.local;
            card.clear_relations();
            card.vibrate = false;
            next.local.push(Zone::Castle, card);
            loaded += 1;
        }
        if loaded == 0 {
            return Touched::default();
        }
        let deck = self.rng.shuffled(next.local.zone(Zone::Castle));
        next.local.set_zone(Zone::Castle, deck);

        info!(match_id = %self.match_id, loaded, castle = next.local.len(Zone::Castle), "deck loaded");
        self.commit(Outcome::diffed(&self.table, next, vec![AuditEvent::loaded(loaded)]))
    }

    /// Drop both stores, on disconnect or match end.
    pub fn reset(&mut self) {
        info!(match_id = %self.match_id, "session reset");
        self.table = Table::default();
        self.alloc = InstanceAllocator::for_player(&self.ids);
    }

    // === Table operations ===

    /// Relocate a card (drag and drop).
    pub fn move_card(&mut self, request: MoveRequest) -> Result<Touched, RulesError> {
        let result = rules::move_card(&self.table, &self.ids, request, &mut self.rng);
        trace!(?request, ok = result.is_ok(), "move");
        self.apply("move", result)
    }

    /// Draw up to `n` cards from the Castle into the Hand.
    pub fn draw(&mut self, n: usize) -> Result<Touched, RulesError> {
        self.draw_into(n, Zone::Hand, "draw", AuditEvent::drew)
    }

    /// Draw the configured opening hand.
    pub fn draw_hand(&mut self) -> Result<Touched, RulesError> {
        self.draw(self.config.hand_size)
    }

    /// Throw up to `n` cards from the Castle into the Cemetery.
    pub fn throw_cards(&mut self, n: usize) -> Result<Touched, RulesError> {
        self.draw_into(n, Zone::Cemetery, "throw", AuditEvent::threw)
    }

    fn draw_into(
        &mut self,
        n: usize,
        dest: Zone,
        op: &'static str,
        line: fn(usize) -> AuditEvent,
    ) -> Result<Touched, RulesError> {
        let result = rules::draw(&self.table.local, n, Zone::Castle, dest).map(|drawn| {
            debug!(asked = n, drawn = drawn.count, ?dest, "cards drawn");
            let next = Table::new(drawn.store, self.table.mirror.clone());
            let audit = if drawn.count > 0 { vec![line(drawn.count)] } else { Vec::new() };
            Outcome::diffed(&self.table, next, audit)
        });
        self.apply(op, result)
    }

    /// Shuffle the local Castle.
    pub fn shuffle_castle(&mut self) -> Result<Touched, RulesError> {
        let result = rules::shuffle_zone(&self.table.local, Zone::Castle, &mut self.rng).map(|store| {
            let next = Table::new(store, self.table.mirror.clone());
            Outcome::diffed(&self.table, next, vec![AuditEvent::shuffled(Zone::Castle)])
        });
        self.apply("shuffle", result)
    }

    /// Show the local Castle to the opponent.
    pub fn reveal_castle(&mut self) {
        let message = SyncMessage::CastleRevealed { match_id: self.match_id };
        self.send(&message);
        self.presenter.audit(&AuditEvent::revealed(Zone::Castle));
    }

    /// Attach a local weapon to a bearer on either side.
    pub fn assign_weapon(&mut self, weapon: InstanceId, bearer: InstanceId) -> Result<Touched, RulesError> {
        let result = self.assigned(weapon, bearer);
        self.apply("assign", result)
    }

    fn assigned(&self, weapon: InstanceId, bearer: InstanceId) -> Result<Outcome, RulesError> {
        if self.bearer_candidates().is_empty() {
            return Err(RulesError::NoBearerAvailable);
        }
        let weapon_name = self
            .table
            .local
            .locate_in(&[Zone::Support], weapon)
            .and_then(|(zone, position)| self.table.local.get(zone, position))
            .map(|c| c.name.clone())
            .ok_or(RulesError::NotAWeapon(weapon))?;

        let mut next = self.table.clone();
        relations::attach(&mut next, weapon, bearer)?;
        let fixed = relations::repair(&mut next);
        if fixed > 0 {
            debug!(fixed, "relations repaired after assign");
        }

        let bearer_name = next
            .locate(bearer)
            .and_then(|at| next.get(at))
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let audit = vec![AuditEvent::assigned(&weapon_name, &bearer_name)];
        Ok(Outcome::diffed(&self.table, next, audit))
    }

    /// Claim the card at `position` of the mirror's `zone`.
    pub fn take_control(&mut self, zone: Zone, position: usize) -> Result<Touched, RulesError> {
        let result = rules::take_control(&self.table, &self.ids, zone, position);
        self.apply("take-control", result)
    }

    // === Highlights ===

    /// Flag (or unflag) the bearer of the card at `at`.
    ///
    /// Highlights are never broadcast or audited.
    pub fn highlight_bearer(&mut self, at: CardRef, on: bool) -> usize {
        let Some(bearer) = self.table.get(at).and_then(|c| c.bearer) else {
            return 0;
        };
        usize::from(self.table.update_in(&Zone::BEARER_ZONES, bearer, |c| c.vibrate = on))
    }

    /// Flag (or unflag) every weapon carried by the card at `at`.
    pub fn highlight_arms(&mut self, at: CardRef, on: bool) -> usize {
        let Some(arms) = self.table.get(at).map(|c| c.arms.clone()) else {
            return 0;
        };
        arms.into_iter()
            .filter(|&weapon| self.table.update_in(&[Zone::Support], weapon, |c| c.vibrate = on))
            .count()
    }

    // === Prompts ===

    /// Open a zone for viewing.
    ///
    /// Own Castle, Cemetery, Exile and Removal are viewable; of the
    /// opponent only Cemetery, Exile and Removal.
    pub fn request_view_zone(&mut self, side: Side, zone: Zone) -> Result<(), RulesError> {
        let allowed = match side {
            Side::Local => VIEWABLE_OWN.contains(&zone),
            Side::Mirror => VIEWABLE_OPPONENT.contains(&zone),
        };
        if !allowed {
            return self.refuse("view", RulesError::AuthorityViolation(zone));
        }

        let cards = self.table.side(side).zone(zone).clone();
        self.presenter.audit(&AuditEvent::viewing(zone, side == Side::Mirror));
        self.presenter.present(Prompt::ViewZone { side, zone, cards });
        Ok(())
    }

    /// Let the player pick up to `count` cards of a local zone.
    pub fn request_select(&mut self, zone: Zone, count: usize) -> Result<(), RulesError> {
        let cards = self.table.local.zone(zone).clone();
        if cards.is_empty() {
            return self.refuse("select", RulesError::EmptySource(zone));
        }
        let count = count.min(cards.len());
        self.presenter.present(Prompt::SelectCards { zone, count, cards });
        Ok(())
    }

    /// Ask how many cards to throw from the Castle.
    pub fn request_throw(&mut self) -> Result<(), RulesError> {
        let available = self.table.local.len(Zone::Castle);
        if available == 0 {
            return self.refuse("throw", RulesError::EmptySource(Zone::Castle));
        }
        self.presenter.present(Prompt::ThrowCards { available });
        Ok(())
    }

    /// Offer the bearers the weapon at `position` of local Support may go to.
    pub fn request_assign_weapon(&mut self, position: usize) -> Result<(), RulesError> {
        let Some(card) = self.table.local.get(Zone::Support, position) else {
            return self.refuse(
                "assign",
                RulesError::StaleReference { zone: Zone::Support, position },
            );
        };
        let (weapon, name) = (card.idx, card.name.clone());

        let bearers = self.bearer_candidates();
        if bearers.is_empty() {
            return self.refuse("assign", RulesError::NoBearerAvailable);
        }
        self.presenter.present(Prompt::AssignWeapon { position, weapon, name, bearers });
        Ok(())
    }

    /// Confirm claiming a mirror card.
    pub fn request_take_control(&mut self, zone: Zone, position: usize) -> Result<(), RulesError> {
        let Some(card) = self.table.mirror.get(zone, position) else {
            return self.refuse("take-control", RulesError::StaleReference { zone, position });
        };
        let prompt = Prompt::TakeControl {
            zone,
            position,
            weapon: card.is_weapon(),
            name: card.name.clone(),
        };
        self.presenter.present(prompt);
        Ok(())
    }

    /// Every card in Defense or Attack, local store first.
    fn bearer_candidates(&self) -> Vec<CardRef> {
        [Side::Local, Side::Mirror]
            .into_iter()
            .flat_map(|side| {
                Zone::BEARER_ZONES.into_iter().flat_map(move |zone| {
                    (0..self.table.side(side).len(zone)).map(move |position| CardRef { side, zone, position })
                })
            })
            .collect()
    }

    // === Inbound ===

    /// Apply a message from the peer.
    ///
    /// Stores are taken as sent. A link spanning both stores may look
    /// one-sided until the peer's other store arrives; the next local
    /// rules step repairs whatever is still inconsistent then.
    pub fn handle_message(&mut self, message: SyncMessage) -> Result<(), SyncError> {
        let got = message.match_id();
        if got != self.match_id {
            warn!(expected = %self.match_id, %got, event = message.event().name(), "message for another match ignored");
            return Err(SyncError::WrongMatch { expected: self.match_id, got });
        }
        debug!(match_id = %got, event = message.event().name(), "broadcast received");

        match message {
            SyncMessage::MatchUpdated(payload) => self.table.mirror = payload.store,
            SyncMessage::OpponentMatchUpdated(payload) => self.table.local = payload.store,
            SyncMessage::CastleRevealed { .. } => {
                let cards = self.table.mirror.zone(Zone::Castle).clone();
                self.presenter.present(Prompt::RevealedCastle { cards });
            }
        }
        Ok(())
    }

    /// Drain the channel. Returns how many messages were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(received) = self.channel.try_recv() {
            match received {
                Ok(message) => {
                    if self.handle_message(message).is_ok() {
                        applied += 1;
                    }
                }
                Err(e) => warn!(error = %e, "dropping undecodable frame"),
            }
        }
        applied
    }

    // === Publishing ===

    fn apply(&mut self, op: &'static str, result: Result<Outcome, RulesError>) -> Result<Touched, RulesError> {
        match result {
            Ok(outcome) => Ok(self.commit(outcome)),
            Err(e) => {
                self.reject(op, &e);
                Err(e)
            }
        }
    }

    fn refuse(&mut self, op: &'static str, error: RulesError) -> Result<(), RulesError> {
        self.reject(op, &error);
        Err(error)
    }

    fn reject(&mut self, op: &'static str, error: &RulesError) {
        debug!(match_id = %self.match_id, op, %error, "rejected");
        if !error.is_silent() {
            self.presenter.warn(&error.to_string());
        }
    }

    /// Swap in the new table, audit it, and broadcast what changed.
    fn commit(&mut self, outcome: Outcome) -> Touched {
        let Outcome { table, touched, audit } = outcome;
        self.table = table;

        for line in &audit {
            self.presenter.audit(line);
        }

        if touched.mirror {
            let store = self.table.mirror.clone();
            self.send(&SyncMessage::OpponentMatchUpdated(self.payload(store)));
        }
        if touched.local && self.config.broadcast_local_changes {
            let store = self.table.local.clone();
            self.send(&SyncMessage::MatchUpdated(self.payload(store)));
        }
        touched
    }

    fn payload(&self, store: ZoneStore) -> StorePayload {
        StorePayload { match_id: self.match_id, store }
    }

    fn send(&mut self, message: &SyncMessage) {
        let acked = Rc::clone(&self.acked);
        trace!(event = message.event().name(), "broadcast");
        self.channel
            .send(message, Some(Box::new(move || acked.set(acked.get() + 1))));
    }
}
