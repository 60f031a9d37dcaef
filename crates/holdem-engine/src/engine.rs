use crate::showdown::resolve_showdown;
use holdem_core::Chips;
use holdem_core::EngineError;
use holdem_core::HandNumber;
use holdem_core::Position;
use holdem_core::TableId;
use holdem_dto::CreateTableRequest;
use holdem_dto::CreateTableResponse;
use holdem_dto::EndHandRequest;
use holdem_dto::EndHandResponse;
use holdem_dto::JoinTableRequest;
use holdem_dto::JoinTableResponse;
use holdem_dto::LeaveTableRequest;
use holdem_dto::LeaveTableResponse;
use holdem_dto::PayoutLine;
use holdem_dto::PlayerActionRequest;
use holdem_dto::PlayerActionResponse;
use holdem_dto::StartGameRequest;
use holdem_dto::StartGameResponse;
use holdem_gameplay::Action;
use holdem_gameplay::Hand;
use holdem_gameplay::Phase;
use holdem_gameplay::Seat;
use holdem_ledger::LedgerEntryKind;
use holdem_store::LedgerStore;
use holdem_store::TableDocument;
use holdem_store::TableStatus;
use holdem_store::TableStore;
use holdem_store::TransactionGateway;
use std::sync::Arc;

/// Attempts the transaction gateway retries a read-mutate-commit cycle
/// before surfacing `aborted` (§4.8's "5 is typical").
const TRANSACTION_ATTEMPTS: u32 = 5;
/// Bounded attempts at sampling a free 4-digit table id before surfacing
/// `resource-exhausted` (§4.10).
const TABLE_ID_ATTEMPTS: u32 = 20;

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is before the epoch")
        .as_secs()
}

/// The six table-lifecycle and gameplay operations (§6.1), wired against any
/// `TableStore`/`LedgerStore` pair. `Send + Sync` and cheap to clone: every
/// request runs end to end inside the document store's transactions, so the
/// engine itself holds no per-table state (§5).
pub struct Engine<S, L> {
    gateway: TransactionGateway<S>,
    ledger: Arc<L>,
}

impl<S, L> Clone for Engine<S, L> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            ledger: Arc::clone(&self.ledger),
        }
    }
}

impl<S: TableStore, L: LedgerStore> Engine<S, L> {
    pub fn new(store: Arc<S>, ledger: Arc<L>) -> Self {
        Self {
            gateway: TransactionGateway::new(store),
            ledger,
        }
    }

    /// `createTable({settings?}) -> {tableId, message}` (§6.1, §4.10).
    pub async fn create_table(&self, host_id: &str, request: CreateTableRequest) -> Result<CreateTableResponse, EngineError> {
        let settings = request.into_settings();
        settings.validate()?;

        let now = unix_now();
        if self
            .ledger
            .would_exceed_debt_ceiling(host_id, settings.min_buy_in, settings.max_debt_per_player)
            .await?
        {
            return Err(EngineError::permission_denied("buy-in would exceed the debt ceiling"));
        }

        let mut rng = rand::rngs::OsRng;
        let mut table_id = None;
        for _ in 0..TABLE_ID_ATTEMPTS {
            let candidate = TableId::random(&mut rng);
            let mut document = TableDocument::new(candidate, host_id, settings, now);
            let ordinal = document.next_join_ordinal();
            document.push_seat(Seat::new(0, host_id, settings.min_buy_in, ordinal));
            match self.gateway.store().create(document).await {
                Ok(()) => {
                    table_id = Some(candidate);
                    break;
                }
                Err(e) if e.kind() == holdem_core::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
        let table_id = table_id.ok_or_else(|| EngineError::resource_exhausted("no table id available after repeated collisions"))?;

        self.ledger
            .append(host_id, LedgerEntryKind::Buy, -settings.min_buy_in, Some(table_id.to_string()), now)
            .await?;

        Ok(CreateTableResponse {
            table_id,
            message: "table created".to_string(),
        })
    }

    /// `joinTable({tableId, buyInAmount}) -> {position, message}` (§6.1, §4.10).
    pub async fn join_table(&self, player_id: &str, request: JoinTableRequest) -> Result<JoinTableResponse, EngineError> {
        let now = unix_now();
        let (_, snapshot) = self.gateway.store().read(&request.table_id).await?;
        let settings = *snapshot.settings();
        if request.buy_in_amount < settings.min_buy_in || request.buy_in_amount > settings.max_stack {
            return Err(EngineError::invalid_argument("buyInAmount out of range"));
        }
        if self
            .ledger
            .would_exceed_debt_ceiling(player_id, request.buy_in_amount, settings.max_debt_per_player)
            .await?
        {
            return Err(EngineError::permission_denied("buy-in would exceed the debt ceiling"));
        }

        let table_id = request.table_id;
        let buy_in_amount = request.buy_in_amount;
        let position = self
            .gateway
            .run(&table_id, TRANSACTION_ATTEMPTS, move |doc| {
                if doc.status() == TableStatus::Ended {
                    return Err(EngineError::failed_precondition("table has ended"));
                }
                if doc.seat_for(player_id).is_some() {
                    return Err(EngineError::already_exists("player already seated at this table"));
                }
                let position = doc
                    .next_free_position()
                    .ok_or_else(|| EngineError::failed_precondition("table is full"))?;
                let ordinal = doc.next_join_ordinal();
                doc.push_seat(Seat::new(position, player_id, buy_in_amount, ordinal));
                Ok(position)
            })
            .await?;

        self.ledger
            .append(player_id, LedgerEntryKind::Buy, -buy_in_amount, Some(table_id.to_string()), now)
            .await?;

        Ok(JoinTableResponse {
            position,
            message: "joined".to_string(),
        })
    }

    /// `leaveTable({tableId}) -> {chipsCashedOut, message}` (§6.1, §4.10).
    pub async fn leave_table(&self, player_id: &str, request: LeaveTableRequest) -> Result<LeaveTableResponse, EngineError> {
        let now = unix_now();
        struct Outcome {
            chips: Chips,
            ended: bool,
        }

        let table_id = request.table_id;
        let outcome = self
            .gateway
            .run(&table_id, TRANSACTION_ATTEMPTS, move |doc| {
                let chips = if doc.hand().is_some() {
                    let chips = {
                        let hand = doc.hand_mut().expect("checked above");
                        let seat = hand
                            .seats()
                            .iter()
                            .find(|s| s.player_id() == player_id)
                            .cloned()
                            .ok_or_else(|| EngineError::not_found("player is not seated at this table"))?;
                        if hand.phase() != Phase::Showdown && seat.status().is_active() {
                            hand.force_fold(player_id)?;
                        }
                        seat.chips()
                    };
                    if doc.hand().map(|h| h.phase()) == Some(Phase::Showdown) {
                        resolve_showdown(doc)?;
                    }
                    if doc.hand().is_some() {
                        doc.mark_pending_leave(player_id);
                    } else {
                        doc.remove_seat(player_id);
                    }
                    chips
                } else {
                    let seat = doc
                        .seat_for(player_id)
                        .cloned()
                        .ok_or_else(|| EngineError::not_found("player is not seated at this table"))?;
                    doc.remove_seat(player_id);
                    seat.chips()
                };

                if doc.host_id() == player_id {
                    let successor = doc
                        .seats()
                        .iter()
                        .filter(|s| s.player_id() != player_id && !doc.is_pending_leave(s.player_id()))
                        .min_by_key(|s| s.joined_at())
                        .map(|s| s.player_id().to_string());
                    if let Some(successor) = successor {
                        doc.set_host(successor);
                    }
                }

                let remaining = doc
                    .seats()
                    .iter()
                    .filter(|s| s.player_id() != player_id && !doc.is_pending_leave(s.player_id()))
                    .count();
                let ended = remaining == 0;
                if ended {
                    doc.set_status(TableStatus::Ended);
                }
                Ok(Outcome { chips, ended })
            })
            .await?;

        self.ledger
            .append(player_id, LedgerEntryKind::Cashout, outcome.chips, Some(table_id.to_string()), now)
            .await?;

        Ok(LeaveTableResponse {
            chips_cashed_out: outcome.chips,
            message: if outcome.ended { "left; table ended".to_string() } else { "left".to_string() },
        })
    }

    /// `startGame({tableId}) -> {handNumber, message}` (§6.1, §4.4). Host only; ≥2 seated.
    pub async fn start_game(&self, player_id: &str, request: StartGameRequest) -> Result<StartGameResponse, EngineError> {
        let now = unix_now();
        let player_id = player_id.to_string();
        let hand_number = self
            .gateway
            .run(&request.table_id, TRANSACTION_ATTEMPTS, move |doc| {
                if doc.host_id() != player_id {
                    return Err(EngineError::permission_denied("only the host can start the game"));
                }
                if doc.status() == TableStatus::Ended {
                    return Err(EngineError::failed_precondition("table has ended"));
                }
                if doc.hand().is_some() {
                    return Err(EngineError::failed_precondition("a hand is already in progress"));
                }
                if doc.seats().len() < 2 {
                    return Err(EngineError::failed_precondition("at least two seated players are required"));
                }
                let seats = doc.seats().to_vec();
                let settings = *doc.settings();
                let previous_dealer = doc.previous_dealer();
                let hand_number: HandNumber = doc.hand_counter() + 1;
                let mut rng = rand::rngs::OsRng;
                let hand = Hand::start(seats, hand_number, &settings, previous_dealer, &mut rng)?;
                let dealer = hand.dealer_position();
                doc.begin_hand(hand, dealer);
                doc.set_action_deadline(Some(now + settings.action_timer_secs));
                Ok(hand_number)
            })
            .await?;

        Ok(StartGameResponse {
            hand_number,
            message: "hand started".to_string(),
        })
    }

    /// `playerAction({tableId, action, raiseAmount?}) -> {message}` (§6.1, §4.6).
    ///
    /// Invokes the showdown resolver internally the instant the state
    /// machine reaches `showdown` (§6.5) -- the external scheduler's
    /// `endHand` is a safety net, not the primary path.
    pub async fn player_action(&self, player_id: &str, request: PlayerActionRequest) -> Result<PlayerActionResponse, EngineError> {
        let action = request.action()?;
        let now = unix_now();
        let player_id = player_id.to_string();
        self.gateway
            .run(&request.table_id, TRANSACTION_ATTEMPTS, move |doc| {
                let action_timer_secs = doc.settings().action_timer_secs;
                let hand = doc
                    .hand_mut()
                    .ok_or_else(|| EngineError::failed_precondition("no hand is in progress"))?;
                hand.apply_action(&player_id, action)?;
                let reached_showdown = hand.phase() == Phase::Showdown;
                if reached_showdown {
                    resolve_showdown(doc)?;
                } else {
                    doc.set_action_deadline(Some(now + action_timer_secs));
                }
                Ok(())
            })
            .await?;

        Ok(PlayerActionResponse { message: "ok".to_string() })
    }

    /// `endHand({tableId}) -> {winners, payouts}` (§6.1, §4.7). Safe to call
    /// idempotently -- a hand already resolved fails `failed-precondition`.
    pub async fn end_hand(&self, request: EndHandRequest) -> Result<EndHandResponse, EngineError> {
        let resolution = self.gateway.run(&request.table_id, TRANSACTION_ATTEMPTS, resolve_showdown).await?;

        let payouts: Vec<PayoutLine> = resolution
            .payouts
            .iter()
            .map(|p| PayoutLine {
                position: p.position,
                player_id: p.player_id.clone(),
                amount: p.amount,
            })
            .collect();
        let winners: Vec<Position> = resolution.payouts.iter().filter(|p| p.amount > 0).map(|p| p.position).collect();

        Ok(EndHandResponse { winners, payouts })
    }

    /// Fold every player whose `actionDeadline` has elapsed, across every
    /// table currently in progress. The hook an external scheduler calls on
    /// a tick (§6.5); returns how many tables were swept.
    pub async fn sweep_expired_actions(&self) -> Result<usize, EngineError> {
        let now = unix_now();
        let mut swept = 0usize;
        for table_id in self.gateway.store().list_active().await? {
            let expired = {
                let (_, doc) = self.gateway.store().read(&table_id).await?;
                doc.action_deadline().map(|deadline| now >= deadline).unwrap_or(false)
            };
            if !expired {
                continue;
            }
            let did_sweep = self
                .gateway
                .run(&table_id, TRANSACTION_ATTEMPTS, move |doc| {
                    let still_expired = doc.action_deadline().map(|deadline| now >= deadline).unwrap_or(false);
                    if !still_expired {
                        return Ok(false);
                    }
                    let action_timer_secs = doc.settings().action_timer_secs;
                    let Some(hand) = doc.hand_mut() else {
                        return Ok(false);
                    };
                    if hand.phase() == Phase::Showdown {
                        return Ok(false);
                    }
                    let Some(position) = hand.current_player() else {
                        return Ok(false);
                    };
                    let Some(player_id) = hand.seats().iter().find(|s| s.position() == position).map(|s| s.player_id().to_string()) else {
                        return Ok(false);
                    };
                    hand.apply_action(&player_id, Action::Fold)?;
                    let hand = doc.hand_mut().expect("still in progress");
                    if hand.phase() == Phase::Showdown {
                        resolve_showdown(doc)?;
                    } else {
                        doc.set_action_deadline(Some(now + action_timer_secs));
                    }
                    Ok(true)
                })
                .await?;
            if did_sweep {
                swept += 1;
            }
        }
        Ok(swept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_core::ErrorKind;
    use holdem_dto::ActionKind;
    use holdem_ledger::LedgerEntryKind as Kind;
    use holdem_store::MemoryLedgerStore;
    use holdem_store::MemoryTableStore;

    fn engine() -> (Engine<MemoryTableStore, MemoryLedgerStore>, Arc<MemoryTableStore>, Arc<MemoryLedgerStore>) {
        let store = MemoryTableStore::shared();
        let ledger = Arc::new(MemoryLedgerStore::new());
        (Engine::new(store.clone(), ledger.clone()), store, ledger)
    }

    #[tokio::test]
    async fn create_table_seats_the_host() {
        let (engine, store, _ledger) = engine();
        let response = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let (_, doc) = store.read(&response.table_id).await.unwrap();
        assert_eq!(doc.seats().len(), 1);
        assert_eq!(doc.seats()[0].player_id(), "alice");
        assert_eq!(doc.host_id(), "alice");
    }

    #[tokio::test]
    async fn join_table_rejects_buy_in_out_of_range() {
        let (engine, _store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let err = engine
            .join_table("bob", JoinTableRequest { table_id: created.table_id, buy_in_amount: 1 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn join_table_rejects_when_debt_ceiling_would_be_exceeded() {
        let (engine, _store, ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        ledger.append("bob", Kind::Buy, -950, Some(created.table_id.to_string()), 1).await.unwrap();
        let err = engine
            .join_table("bob", JoinTableRequest { table_id: created.table_id, buy_in_amount: 100 })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn start_game_requires_host() {
        let (engine, _store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        engine
            .join_table("bob", JoinTableRequest { table_id: created.table_id, buy_in_amount: 100 })
            .await
            .unwrap();
        let err = engine
            .start_game("bob", StartGameRequest { table_id: created.table_id })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[tokio::test]
    async fn start_game_requires_two_seated_players() {
        let (engine, _store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let err = engine
            .start_game("alice", StartGameRequest { table_id: created.table_id })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedPrecondition);
    }

    /// Folding every seat but one (Scenario A) must settle the pot, tear
    /// the hand down, and leave the table ready for another `startGame`.
    #[tokio::test]
    async fn a_full_hand_folds_to_a_single_winner_and_returns_to_waiting() {
        let (engine, store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let table_id = created.table_id;
        engine.join_table("bob", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();
        engine.join_table("carol", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();
        engine.start_game("alice", StartGameRequest { table_id }).await.unwrap();

        loop {
            let (_, doc) = store.read(&table_id).await.unwrap();
            let Some(hand) = doc.hand() else { break };
            let Some(position) = hand.current_player() else { break };
            let player_id = hand.seats().iter().find(|s| s.position() == position).unwrap().player_id().to_string();
            engine
                .player_action(&player_id, PlayerActionRequest { table_id, action: ActionKind::Fold, raise_amount: None })
                .await
                .unwrap();
        }

        let (_, doc) = store.read(&table_id).await.unwrap();
        assert!(doc.hand().is_none());
        assert_eq!(doc.status(), TableStatus::Waiting);
        let result = doc.last_result().unwrap();
        assert!(result.uncontested);
        assert_eq!(result.winners.len(), 1);
    }

    #[tokio::test]
    async fn end_hand_fails_before_a_hand_reaches_showdown() {
        let (engine, _store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let table_id = created.table_id;
        engine.join_table("bob", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();
        engine.start_game("alice", StartGameRequest { table_id }).await.unwrap();
        let err = engine.end_hand(EndHandRequest { table_id }).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedPrecondition);
    }

    #[tokio::test]
    async fn leaving_mid_hand_force_folds_and_settles_to_the_remaining_player() {
        let (engine, store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let table_id = created.table_id;
        engine.join_table("bob", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();
        engine.start_game("alice", StartGameRequest { table_id }).await.unwrap();

        let (_, doc) = store.read(&table_id).await.unwrap();
        let hand = doc.hand().unwrap();
        let position = hand.current_player().unwrap();
        let actor = hand.seats().iter().find(|s| s.position() == position).unwrap().player_id().to_string();
        let other = if actor == "alice" { "bob" } else { "alice" };

        engine.leave_table(other, LeaveTableRequest { table_id }).await.unwrap();

        let (_, doc) = store.read(&table_id).await.unwrap();
        assert!(doc.hand().is_none());
        assert_eq!(doc.seats().len(), 1);
        assert_eq!(doc.seats()[0].player_id(), actor);
        assert_eq!(doc.status(), TableStatus::Waiting);
    }

    #[tokio::test]
    async fn leaving_transfers_host_then_ends_the_table_once_empty() {
        let (engine, store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let table_id = created.table_id;
        engine.join_table("bob", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();

        engine.leave_table("alice", LeaveTableRequest { table_id }).await.unwrap();
        let (_, doc) = store.read(&table_id).await.unwrap();
        assert_eq!(doc.host_id(), "bob");

        engine.leave_table("bob", LeaveTableRequest { table_id }).await.unwrap();
        let (_, doc) = store.read(&table_id).await.unwrap();
        assert_eq!(doc.status(), TableStatus::Ended);
    }

    #[tokio::test]
    async fn sweep_expired_actions_force_folds_the_player_on_the_clock() {
        let (engine, store, _ledger) = engine();
        let created = engine.create_table("alice", CreateTableRequest::default()).await.unwrap();
        let table_id = created.table_id;
        engine.join_table("bob", JoinTableRequest { table_id, buy_in_amount: 100 }).await.unwrap();
        engine.start_game("alice", StartGameRequest { table_id }).await.unwrap();

        engine
            .gateway
            .run(&table_id, 1, |doc| {
                doc.set_action_deadline(Some(0));
                Ok(())
            })
            .await
            .unwrap();

        let swept = engine.sweep_expired_actions().await.unwrap();
        assert_eq!(swept, 1);

        let (_, doc) = store.read(&table_id).await.unwrap();
        assert!(doc.hand().is_none());
    }
}
