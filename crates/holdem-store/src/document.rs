use holdem_core::Chips;
use holdem_core::HandNumber;
use holdem_core::Position;
use holdem_core::TableId;
use holdem_gameplay::Hand;
use holdem_gameplay::Seat;
use holdem_gameplay::TableSettings;
use serde::Deserialize;
use serde::Serialize;

/// A table's lifecycle state (§3's Table data model). Transitions
/// `waiting -> playing -> waiting -> ... -> ended`: a table returns to
/// `waiting` once a hand resolves, and an explicit `startGame` begins the
/// next one (see DESIGN.md for why this implementation favors an explicit
/// per-hand `startGame` over auto-dealing the next hand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Waiting,
    Playing,
    Ended,
}

/// Persisted summary of the most recently resolved hand, for observers who
/// were not party to the showdown transaction (§4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_number: HandNumber,
    pub uncontested: bool,
    pub winners: Vec<(Position, Chips)>,
}

/// The `tables/{tableId}` document: everything the engine needs to resume a
/// table's state after a commit, including the hand currently in progress
/// (if any). When no hand is active, `seats` is authoritative; while a hand
/// is in progress, the hand owns the seats and `seats` is left at its last
/// pre-hand snapshot (§3's "Hand is owned exclusively by its table").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDocument {
    id: TableId,
    host_id: String,
    status: TableStatus,
    settings: TableSettings,
    seats: Vec<Seat>,
    hand: Option<Hand>,
    hand_counter: HandNumber,
    /// Dealer position from the previous hand, carried forward so the next
    /// hand can rotate the button (§4.4). `None` only before the first hand.
    previous_dealer: Option<Position>,
    /// Wall-clock seconds since epoch; consulted by an external scheduler,
    /// never read by pure gameplay logic (§5, §9).
    action_deadline: Option<u64>,
    blind_increase_at: Option<u64>,
    last_result: Option<HandResult>,
    created_at: u64,
    /// Monotonic join counter used to stamp each seat's `joined_at`, so host
    /// transfer on leave can deterministically pick the earliest-seated
    /// remaining player (§4.10).
    join_counter: u64,
    /// Players who left while their seat was still owned by an in-progress
    /// `Hand` (force-folded, not yet removed from the seat array -- removing
    /// a seat mid-hand would shift every other seat's position). Dropped
    /// from the table-level snapshot the moment the hand ends (§4.10).
    pending_leaves: Vec<String>,
}

impl TableDocument {
    pub fn new(id: TableId, host_id: impl Into<String>, settings: TableSettings, created_at: u64) -> Self {
        Self {
            id,
            host_id: host_id.into(),
            status: TableStatus::Waiting,
            settings,
            seats: Vec::new(),
            hand: None,
            hand_counter: 0,
            previous_dealer: None,
            action_deadline: None,
            blind_increase_at: None,
            last_result: None,
            created_at,
            join_counter: 0,
            pending_leaves: Vec::new(),
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }
    pub fn host_id(&self) -> &str {
        &self.host_id
    }
    pub fn status(&self) -> TableStatus {
        self.status
    }
    pub fn settings(&self) -> &TableSettings {
        &self.settings
    }
    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }
    pub fn hand_mut(&mut self) -> Option<&mut Hand> {
        self.hand.as_mut()
    }
    pub fn hand_counter(&self) -> HandNumber {
        self.hand_counter
    }
    pub fn previous_dealer(&self) -> Option<Position> {
        self.previous_dealer
    }
    pub fn action_deadline(&self) -> Option<u64> {
        self.action_deadline
    }
    pub fn blind_increase_at(&self) -> Option<u64> {
        self.blind_increase_at
    }
    pub fn last_result(&self) -> Option<&HandResult> {
        self.last_result.as_ref()
    }
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// The authoritative seats right now: the in-progress hand's seats while
    /// one is active, otherwise the table's own snapshot.
    pub fn seats(&self) -> &[Seat] {
        match &self.hand {
            Some(hand) => hand.seats(),
            None => &self.seats,
        }
    }

    pub fn seat_for(&self, player_id: &str) -> Option<&Seat> {
        self.seats().iter().find(|s| s.player_id() == player_id)
    }

    pub fn next_free_position(&self) -> Option<Position> {
        let taken: Vec<Position> = self.seats().iter().map(|s| s.position()).collect();
        (0..self.settings.max_players).find(|p| !taken.contains(p))
    }

    pub fn set_host(&mut self, host_id: impl Into<String>) {
        self.host_id = host_id.into();
    }
    pub fn set_status(&mut self, status: TableStatus) {
        self.status = status;
    }
    pub fn set_action_deadline(&mut self, deadline: Option<u64>) {
        self.action_deadline = deadline;
    }
    pub fn set_blind_increase_at(&mut self, at: Option<u64>) {
        self.blind_increase_at = at;
    }
    pub fn set_last_result(&mut self, result: HandResult) {
        self.last_result = Some(result);
    }

    /// Append a fresh seat to the table-level snapshot (only valid when no
    /// hand is in progress -- `holdem-engine` enforces this before calling).
    pub fn push_seat(&mut self, seat: Seat) {
        self.seats.push(seat);
    }

    /// Remove a seat by player id from the table-level snapshot, returning
    /// it. No-op (returns `None`) if a hand currently owns the seats --
    /// callers must auto-fold through the hand first (§4.10).
    pub fn remove_seat(&mut self, player_id: &str) -> Option<Seat> {
        let idx = self.seats.iter().position(|s| s.player_id() == player_id)?;
        Some(self.seats.remove(idx))
    }

    pub fn next_join_ordinal(&mut self) -> u64 {
        let ordinal = self.join_counter;
        self.join_counter += 1;
        ordinal
    }

    /// Replace the table-level seat snapshot, e.g. after syncing chip
    /// stacks back from a hand that just ended.
    pub fn set_seats(&mut self, seats: Vec<Seat>) {
        self.seats = seats;
    }

    /// Flag `player_id` to be dropped from the table once the in-progress
    /// hand ends, because they left while the hand still owned their seat.
    pub fn mark_pending_leave(&mut self, player_id: impl Into<String>) {
        let player_id = player_id.into();
        if !self.pending_leaves.iter().any(|p| *p == player_id) {
            self.pending_leaves.push(player_id);
        }
    }

    pub fn is_pending_leave(&self, player_id: &str) -> bool {
        self.pending_leaves.iter().any(|p| p == player_id)
    }

    pub fn begin_hand(&mut self, hand: Hand, dealer: Position) {
        self.hand_counter = hand.hand_number();
        self.previous_dealer = Some(dealer);
        self.hand = Some(hand);
        self.status = TableStatus::Playing;
    }

    /// Tear down the hand, absorbing its seats (with updated chip stacks)
    /// back into the table-level snapshot, then dropping anyone who left
    /// mid-hand.
    pub fn end_hand(&mut self) {
        if let Some(hand) = self.hand.take() {
            self.seats = hand.seats().to_vec();
        }
        if !self.pending_leaves.is_empty() {
            self.seats.retain(|s| !self.pending_leaves.iter().any(|p| p == s.player_id()));
            self.pending_leaves.clear();
        }
        self.status = TableStatus::Waiting;
        self.action_deadline = None;
    }
}
