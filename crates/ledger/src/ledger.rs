use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use networth_core::{Aggregate, AssetIndex, Event, HistoryId, LedgerError, LedgerResult, Money};

use crate::asset::{label_or, Asset, HistoryAction, HistoryEntry, UNKNOWN_ACCOUNT, UNNAMED_ASSET};

/// Aggregate root: the asset ledger.
///
/// Owns every asset, the append-only history of value changes, and the
/// history id counter. Commands are validated against the current state in
/// `handle`; only `apply` mutates, so a rejected command changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLedger {
    assets: Vec<Asset>,
    history: Vec<HistoryEntry>,
    /// Per asset, its create/adjust entries that are not undone, oldest first.
    /// The last one is the active entry (the only valid undo target).
    active: Vec<Vec<HistoryId>>,
    next_history_id: HistoryId,
    version: u64,
}

impl Default for AssetLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLedger {
    pub fn new() -> Self {
        Self {
            assets: Vec::new(),
            history: Vec::new(),
            active: Vec::new(),
            next_history_id: HistoryId::FIRST,
            version: 0,
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, index: AssetIndex) -> Option<&Asset> {
        self.assets.get(index.get())
    }

    /// Snapshot of all assets in creation order.
    pub fn list_assets(&self) -> Vec<Asset> {
        self.assets.clone()
    }

    /// Snapshot of the history, most recent first.
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.history.iter().rev().cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Look up a history entry by id.
    ///
    /// Ids are handed out in increasing order, so the log is sorted by id.
    pub fn entry(&self, id: HistoryId) -> Option<&HistoryEntry> {
        self.position_of(id).map(|pos| &self.history[pos])
    }

    /// The most recent create/adjust entry of an asset that is not undone.
    pub fn active_entry(&self, index: AssetIndex) -> Option<HistoryId> {
        self.active.get(index.get()).and_then(|stack| stack.last().copied())
    }

    fn position_of(&self, id: HistoryId) -> Option<usize> {
        self.history.binary_search_by_key(&id, |e| e.id).ok()
    }

    // -------------------------
    // Convenience operations (handle + apply)
    // -------------------------

    /// Create an asset. Always succeeds; returns its index and state.
    pub fn create(
        &mut self,
        name: &str,
        price: Money,
        account: &str,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<(AssetIndex, Asset)> {
        let events = self.execute(&LedgerCommand::CreateAsset(CreateAsset {
            name: name.to_string(),
            price,
            account: account.to_string(),
            occurred_at,
        }))?;
        let index = events
            .iter()
            .find_map(|e| match e {
                LedgerEvent::AssetCreated(c) => Some(c.entry.asset_index),
                _ => None,
            })
            .ok_or_else(|| LedgerError::invalid_state("create emitted no asset"))?;
        self.snapshot(index).map(|asset| (index, asset))
    }

    /// Add `amount` (negative to reduce) to an asset's price.
    pub fn adjust(
        &mut self,
        index: AssetIndex,
        amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<Asset> {
        self.execute(&LedgerCommand::AdjustAsset(AdjustAsset {
            index,
            amount,
            occurred_at,
        }))?;
        self.snapshot(index)
    }

    /// Reverse a create/adjust entry. Returns the asset it applied to.
    pub fn undo(
        &mut self,
        history_id: HistoryId,
        occurred_at: DateTime<Utc>,
    ) -> LedgerResult<(AssetIndex, Asset)> {
        let events = self.execute(&LedgerCommand::UndoEntry(UndoEntry {
            history_id,
            occurred_at,
        }))?;
        let index = events
            .iter()
            .find_map(|e| match e {
                LedgerEvent::EntryUndone(u) => Some(u.entry.asset_index),
                _ => None,
            })
            .ok_or_else(|| LedgerError::invalid_state("undo emitted no entry"))?;
        self.snapshot(index).map(|asset| (index, asset))
    }

    /// Drop every asset and every history entry. Returns the applied events.
    pub fn reset(&mut self, occurred_at: DateTime<Utc>) -> Vec<LedgerEvent> {
        let event = Self::handle_reset(&ResetLedger { occurred_at });
        self.apply(&event);
        vec![event]
    }

    fn snapshot(&self, index: AssetIndex) -> LedgerResult<Asset> {
        self.asset(index)
            .cloned()
            .ok_or_else(|| LedgerError::invalid_index(format!("no asset at {index}")))
    }
}

/// Command: CreateAsset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAsset {
    pub name: String,
    pub price: Money,
    pub account: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustAsset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustAsset {
    pub index: AssetIndex,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UndoEntry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoEntry {
    pub history_id: HistoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ResetLedger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetLedger {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerCommand {
    CreateAsset(CreateAsset),
    AdjustAsset(AdjustAsset),
    UndoEntry(UndoEntry),
    Reset(ResetLedger),
}

/// Event: AssetCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCreated {
    pub name: String,
    pub account: String,
    pub entry: HistoryEntry,
}

/// Event: AssetAdjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAdjusted {
    pub entry: HistoryEntry,
}

/// Event: EntryUndone. `entry.undone_entry` names the reversed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUndone {
    pub entry: HistoryEntry,
}

/// Event: LedgerReset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    AssetCreated(AssetCreated),
    AssetAdjusted(AssetAdjusted),
    EntryUndone(EntryUndone),
    LedgerReset(LedgerReset),
}

impl LedgerEvent {
    /// History entry appended by this event, if any.
    pub fn entry(&self) -> Option<&HistoryEntry> {
        match self {
            LedgerEvent::AssetCreated(e) => Some(&e.entry),
            LedgerEvent::AssetAdjusted(e) => Some(&e.entry),
            LedgerEvent::EntryUndone(e) => Some(&e.entry),
            LedgerEvent::LedgerReset(_) => None,
        }
    }
}

impl Event for LedgerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::AssetCreated(_) => "ledger.asset.created",
            LedgerEvent::AssetAdjusted(_) => "ledger.asset.adjusted",
            LedgerEvent::EntryUndone(_) => "ledger.history.entry_undone",
            LedgerEvent::LedgerReset(_) => "ledger.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::LedgerReset(e) => e.occurred_at,
            other => other
                .entry()
                .map(|entry| entry.timestamp)
                .unwrap_or_default(),
        }
    }
}

impl Aggregate for AssetLedger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = LedgerError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::AssetCreated(e) => {
                self.assets.push(Asset {
                    name: e.name.clone(),
                    price: e.entry.next,
                    account: e.account.clone(),
                });
                self.active.push(vec![e.entry.id]);
                self.append(e.entry.clone());
            }
            LedgerEvent::AssetAdjusted(e) => {
                let idx = e.entry.asset_index.get();
                if let Some(asset) = self.assets.get_mut(idx) {
                    asset.price = e.entry.next;
                }
                if let Some(stack) = self.active.get_mut(idx) {
                    stack.push(e.entry.id);
                }
                self.append(e.entry.clone());
            }
            LedgerEvent::EntryUndone(e) => {
                let idx = e.entry.asset_index.get();
                if let Some(target) = e.entry.undone_entry {
                    if let Some(pos) = self.position_of(target) {
                        self.history[pos].undone = true;
                    }
                    if let Some(stack) = self.active.get_mut(idx) {
                        stack.retain(|id| *id != target);
                    }
                }
                if let Some(asset) = self.assets.get_mut(idx) {
                    asset.price = e.entry.next;
                }
                self.append(e.entry.clone());
            }
            LedgerEvent::LedgerReset(_) => {
                // The id counter survives so ids are never handed out twice.
                self.assets.clear();
                self.history.clear();
                self.active.clear();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::CreateAsset(cmd) => self.handle_create(cmd),
            LedgerCommand::AdjustAsset(cmd) => self.handle_adjust(cmd),
            LedgerCommand::UndoEntry(cmd) => self.handle_undo(cmd),
            LedgerCommand::Reset(cmd) => Ok(vec![Self::handle_reset(cmd)]),
        }
    }
}

impl AssetLedger {
    /// Resetting is never rejected.
    fn handle_reset(cmd: &ResetLedger) -> LedgerEvent {
        LedgerEvent::LedgerReset(LedgerReset {
            occurred_at: cmd.occurred_at,
        })
    }

    fn append(&mut self, entry: HistoryEntry) {
        self.next_history_id = entry.id.next();
        self.history.push(entry);
    }

    fn handle_create(&self, cmd: &CreateAsset) -> Result<Vec<LedgerEvent>, LedgerError> {
        // Negative opening values are treated like malformed input.
        let price = if cmd.price.is_negative() {
            Money::ZERO
        } else {
            cmd.price
        };

        Ok(vec![LedgerEvent::AssetCreated(AssetCreated {
            name: label_or(&cmd.name, UNNAMED_ASSET),
            account: label_or(&cmd.account, UNKNOWN_ACCOUNT),
            entry: HistoryEntry {
                id: self.next_history_id,
                asset_index: AssetIndex::new(self.assets.len()),
                action: HistoryAction::Create,
                delta: price,
                prev: Money::ZERO,
                next: price,
                timestamp: cmd.occurred_at,
                undone: false,
                undone_entry: None,
            },
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustAsset) -> Result<Vec<LedgerEvent>, LedgerError> {
        let asset = self.asset(cmd.index).ok_or_else(|| {
            LedgerError::invalid_index(format!(
                "{} is out of range ({} assets)",
                cmd.index,
                self.assets.len()
            ))
        })?;

        let current = asset.price;
        let next = current
            .checked_add(cmd.amount)
            .ok_or_else(|| LedgerError::invalid_state("asset price out of range"))?;
        if next.is_negative() {
            return Err(LedgerError::below_zero(current));
        }

        Ok(vec![LedgerEvent::AssetAdjusted(AssetAdjusted {
            entry: HistoryEntry {
                id: self.next_history_id,
                asset_index: cmd.index,
                action: HistoryAction::Adjust,
                delta: cmd.amount,
                prev: current,
                next,
                timestamp: cmd.occurred_at,
                undone: false,
                undone_entry: None,
            },
        })])
    }

    fn handle_undo(&self, cmd: &UndoEntry) -> Result<Vec<LedgerEvent>, LedgerError> {
        let target = self
            .entry(cmd.history_id)
            .ok_or(LedgerError::NotFound(cmd.history_id))?;

        if target.undone {
            return Err(LedgerError::AlreadyUndone(target.id));
        }
        if !target.action.is_undoable() {
            return Err(LedgerError::invalid_state(format!(
                "history entry {} is an undo and cannot be reversed",
                target.id
            )));
        }

        let asset = self.asset(target.asset_index).ok_or_else(|| {
            LedgerError::invalid_state(format!(
                "history entry {} references missing asset {}",
                target.id, target.asset_index
            ))
        })?;

        // Staleness guard: nothing may have touched the asset since `target`.
        let stale = LedgerError::StaleState {
            entry: target.id,
            current: asset.price,
            expected: target.next,
        };
        if asset.price != target.next {
            return Err(stale);
        }
        if self.active_entry(target.asset_index) != Some(target.id) {
            return Err(stale);
        }

        let delta = target
            .prev
            .checked_sub(target.next)
            .ok_or_else(|| LedgerError::invalid_state("asset price out of range"))?;

        Ok(vec![LedgerEvent::EntryUndone(EntryUndone {
            entry: HistoryEntry {
                id: self.next_history_id,
                asset_index: target.asset_index,
                action: HistoryAction::Undo,
                delta,
                prev: target.next,
                next: target.prev,
                timestamp: cmd.occurred_at,
                undone: false,
                undone_entry: Some(target.id),
            },
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn money(units: i64) -> Money {
        Money::from_cents(units * 100)
    }

    fn idx(i: usize) -> AssetIndex {
        AssetIndex::new(i)
    }

    /// Ledger holding one asset "Car" worth 10000, history id 1.
    fn ledger_with_car() -> AssetLedger {
        let mut ledger = AssetLedger::new();
        ledger
            .create("Car", money(10_000), "Bank", test_time())
            .unwrap();
        ledger
    }

    #[test]
    fn create_appends_create_entry() {
        let mut ledger = AssetLedger::new();
        let (index, asset) = ledger
            .create("Car", money(10_000), "Bank", test_time())
            .unwrap();

        assert_eq!(index, idx(0));
        assert_eq!(asset.name, "Car");
        assert_eq!(asset.price, money(10_000));
        assert_eq!(asset.account, "Bank");

        let history = ledger.list_history();
        assert_eq!(history.len(), 1);
        let entry = &history[0];
        assert_eq!(entry.id, HistoryId::FIRST);
        assert_eq!(entry.action, HistoryAction::Create);
        assert_eq!(entry.prev, Money::ZERO);
        assert_eq!(entry.next, money(10_000));
        assert_eq!(entry.delta, money(10_000));
        assert!(!entry.undone);
        assert_eq!(ledger.active_entry(index), Some(entry.id));
    }

    #[test]
    fn create_fills_placeholders_and_floors_negative_price() {
        let mut ledger = AssetLedger::new();
        let (_, asset) = ledger.create("  ", money(-5), "", test_time()).unwrap();
        assert_eq!(asset.name, "Unnamed");
        assert_eq!(asset.account, "Unknown");
        assert_eq!(asset.price, Money::ZERO);
    }

    #[test]
    fn indices_follow_creation_order() {
        let mut ledger = ledger_with_car();
        let (second, _) = ledger.create("House", money(1), "Mortgage", test_time()).unwrap();
        assert_eq!(second, idx(1));
        let names: Vec<_> = ledger.list_assets().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Car", "House"]);
    }

    #[test]
    fn adjust_records_prev_and_next() {
        let mut ledger = ledger_with_car();
        let asset = ledger.adjust(idx(0), money(500), test_time()).unwrap();
        assert_eq!(asset.price, money(10_500));

        let latest = &ledger.list_history()[0];
        assert_eq!(latest.action, HistoryAction::Adjust);
        assert_eq!(latest.prev, money(10_000));
        assert_eq!(latest.next, money(10_500));
        assert_eq!(latest.delta, money(500));
    }

    #[test]
    fn adjust_unknown_index_is_rejected() {
        let mut ledger = ledger_with_car();
        let err = ledger.adjust(idx(3), money(1), test_time()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidIndex(_)));
        assert_eq!(ledger.history_len(), 1);
    }

    #[test]
    fn adjust_below_zero_is_rejected_and_reports_current_price() {
        let mut ledger = ledger_with_car();
        let before = ledger.clone();

        let err = ledger.adjust(idx(0), money(-20_000), test_time()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState { .. }));
        assert_eq!(err.current_price(), Some(money(10_000)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn adjust_down_to_exactly_zero_is_allowed() {
        let mut ledger = ledger_with_car();
        let asset = ledger.adjust(idx(0), money(-10_000), test_time()).unwrap();
        assert_eq!(asset.price, Money::ZERO);
    }

    #[test]
    fn car_scenario_adjust_reject_undo_and_double_undo() {
        let mut ledger = ledger_with_car();

        ledger.adjust(idx(0), money(500), test_time()).unwrap();
        let adjust_id = ledger.list_history()[0].id;

        assert!(ledger.adjust(idx(0), money(-20_000), test_time()).is_err());
        assert_eq!(ledger.asset(idx(0)).unwrap().price, money(10_500));

        let (index, asset) = ledger.undo(adjust_id, test_time()).unwrap();
        assert_eq!(index, idx(0));
        assert_eq!(asset.price, money(10_000));
        assert!(ledger.entry(adjust_id).unwrap().undone);

        let undo_entry = &ledger.list_history()[0];
        assert_eq!(undo_entry.action, HistoryAction::Undo);
        assert_eq!(undo_entry.prev, money(10_500));
        assert_eq!(undo_entry.next, money(10_000));
        assert_eq!(undo_entry.delta, money(-500));
        assert_eq!(undo_entry.undone_entry, Some(adjust_id));
        assert_eq!(ledger.history_len(), 3);

        let err = ledger.undo(adjust_id, test_time()).unwrap_err();
        assert_eq!(err, LedgerError::AlreadyUndone(adjust_id));
        assert_eq!(ledger.history_len(), 3);
    }

    #[test]
    fn undo_after_later_change_is_stale() {
        let mut ledger = ledger_with_car();
        ledger.adjust(idx(0), money(500), test_time()).unwrap();
        let adjust_id = ledger.list_history()[0].id;
        ledger.undo(adjust_id, test_time()).unwrap();

        ledger.adjust(idx(0), money(300), test_time()).unwrap();
        let err = ledger.undo(HistoryId::FIRST, test_time()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::StaleState {
                entry: HistoryId::FIRST,
                current: money(10_300),
                expected: money(10_000),
            }
        );
        assert_eq!(err.current_price(), Some(money(10_300)));
    }

    #[test]
    fn undo_of_older_entry_behind_a_zero_adjustment_is_stale() {
        let mut ledger = ledger_with_car();
        // Price stays equal to the create entry's `next`, but a newer entry stands.
        ledger.adjust(idx(0), Money::ZERO, test_time()).unwrap();
        let err = ledger.undo(HistoryId::FIRST, test_time()).unwrap_err();
        assert!(matches!(err, LedgerError::StaleState { .. }));
    }

    #[test]
    fn undo_walks_back_one_entry_at_a_time() {
        let mut ledger = ledger_with_car();
        ledger.adjust(idx(0), money(100), test_time()).unwrap();
        ledger.adjust(idx(0), money(200), test_time()).unwrap();

        ledger.undo(HistoryId::new(3), test_time()).unwrap();
        assert_eq!(ledger.active_entry(idx(0)), Some(HistoryId::new(2)));
        ledger.undo(HistoryId::new(2), test_time()).unwrap();
        assert_eq!(ledger.active_entry(idx(0)), Some(HistoryId::FIRST));
        let (_, asset) = ledger.undo(HistoryId::FIRST, test_time()).unwrap();

        assert_eq!(asset.price, Money::ZERO);
        assert_eq!(ledger.active_entry(idx(0)), None);
    }

    #[test]
    fn undo_entries_are_not_undo_targets() {
        let mut ledger = ledger_with_car();
        ledger.adjust(idx(0), money(500), test_time()).unwrap();
        ledger.undo(HistoryId::new(2), test_time()).unwrap();

        let err = ledger.undo(HistoryId::new(3), test_time()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState { .. }));
    }

    #[test]
    fn undo_unknown_id_is_not_found() {
        let mut ledger = ledger_with_car();
        let err = ledger.undo(HistoryId::new(42), test_time()).unwrap_err();
        assert_eq!(err, LedgerError::NotFound(HistoryId::new(42)));
    }

    #[test]
    fn undo_with_dangling_asset_reference_is_invalid_state() {
        let mut ledger = ledger_with_car();
        ledger.assets.clear();
        let err = ledger.undo(HistoryId::FIRST, test_time()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidState { .. }));
    }

    #[test]
    fn undo_on_one_asset_ignores_other_assets() {
        let mut ledger = ledger_with_car();
        ledger.create("House", money(200_000), "Mortgage", test_time()).unwrap();
        ledger.adjust(idx(1), money(5_000), test_time()).unwrap();

        let (index, asset) = ledger.undo(HistoryId::FIRST, test_time()).unwrap();
        assert_eq!(index, idx(0));
        assert_eq!(asset.price, Money::ZERO);
        assert_eq!(ledger.asset(idx(1)).unwrap().price, money(205_000));
    }

    #[test]
    fn history_is_listed_most_recent_first() {
        let mut ledger = ledger_with_car();
        ledger.adjust(idx(0), money(1), test_time()).unwrap();
        ledger.adjust(idx(0), money(2), test_time()).unwrap();
        let ids: Vec<u64> = ledger.list_history().iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn reset_clears_everything_but_never_reuses_ids() {
        let mut ledger = ledger_with_car();
        ledger.adjust(idx(0), money(1), test_time()).unwrap();
        let events = ledger.reset(test_time());

        assert!(matches!(events.as_slice(), [LedgerEvent::LedgerReset(_)]));
        assert!(ledger.list_assets().is_empty());
        assert!(ledger.list_history().is_empty());
        assert_eq!(ledger.active_entry(idx(0)), None);

        ledger.create("Bike", money(300), "Cash", test_time()).unwrap();
        assert_eq!(ledger.list_history()[0].id, HistoryId::new(3));
        assert_eq!(ledger.undo(HistoryId::FIRST, test_time()).unwrap_err(), LedgerError::NotFound(HistoryId::FIRST));
    }

    #[test]
    fn version_counts_applied_events_only() {
        let mut ledger = ledger_with_car();
        let _ = ledger.adjust(idx(0), money(-1_000_000), test_time());
        ledger.adjust(idx(0), money(1), test_time()).unwrap();
        ledger.reset(test_time());
        assert_eq!(ledger.version(), 3);
    }

    #[test]
    fn handle_does_not_mutate() {
        let ledger = ledger_with_car();
        let events = ledger
            .handle(&LedgerCommand::AdjustAsset(AdjustAsset {
                index: idx(0),
                amount: money(5),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "ledger.asset.adjusted");
        assert_eq!(ledger.history_len(), 1);
        assert_eq!(ledger.asset(idx(0)).unwrap().price, money(10_000));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Adjust(i64),
        Undo(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-5_000i64..5_000i64).prop_map(Op::Adjust),
            (1u64..40u64).prop_map(Op::Undo),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the price after every adjustment equals the opening price
        /// plus all accepted deltas, never dips below zero, and rejected calls
        /// append nothing.
        #[test]
        fn price_tracks_accepted_deltas(
            opening in 0i64..10_000i64,
            deltas in prop::collection::vec(-5_000i64..5_000i64, 1..30)
        ) {
            let mut ledger = AssetLedger::new();
            ledger.create("A", Money::from_cents(opening), "X", test_time()).unwrap();

            let mut expected = opening;
            for delta in deltas {
                let before = ledger.history_len();
                match ledger.adjust(idx(0), Money::from_cents(delta), test_time()) {
                    Ok(asset) => {
                        expected += delta;
                        prop_assert_eq!(asset.price.cents(), expected);
                        prop_assert_eq!(ledger.history_len(), before + 1);
                    }
                    Err(LedgerError::InvalidState { current_price, .. }) => {
                        prop_assert!(expected + delta < 0);
                        prop_assert_eq!(current_price, Some(Money::from_cents(expected)));
                        prop_assert_eq!(ledger.history_len(), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                }
                prop_assert!(!ledger.asset(idx(0)).unwrap().price.is_negative());
            }
        }

        /// Property: undo succeeds exactly when the entry is the active entry of
        /// its asset and the price still equals its `next`; on success the
        /// price returns to `prev`.
        #[test]
        fn undo_succeeds_only_on_the_active_entry(
            ops in prop::collection::vec(op_strategy(), 1..40)
        ) {
            let mut ledger = AssetLedger::new();
            ledger.create("A", Money::from_cents(1_000), "X", test_time()).unwrap();

            for op in ops {
                let before = ledger.history_len();
                match op {
                    Op::Adjust(delta) => {
                        let ok = ledger.adjust(idx(0), Money::from_cents(delta), test_time()).is_ok();
                        prop_assert_eq!(ledger.history_len(), before + usize::from(ok));
                    }
                    Op::Undo(raw) => {
                        let id = HistoryId::new(raw);
                        let target = ledger.entry(id).cloned();
                        let price = ledger.asset(idx(0)).unwrap().price;
                        let eligible = target.as_ref().is_some_and(|t| {
                            !t.undone
                                && t.action.is_undoable()
                                && t.next == price
                                && ledger.active_entry(t.asset_index) == Some(t.id)
                        });

                        let result = ledger.undo(id, test_time());
                        prop_assert_eq!(result.is_ok(), eligible);
                        if let (Ok((_, asset)), Some(t)) = (result, target) {
                            prop_assert_eq!(asset.price, t.prev);
                            prop_assert!(ledger.entry(id).unwrap().undone);
                            prop_assert_eq!(ledger.history_len(), before + 1);
                        } else {
                            prop_assert_eq!(ledger.history_len(), before);
                        }
                    }
                }
                prop_assert!(!ledger.asset(idx(0)).unwrap().price.is_negative());
            }
        }
    }
}
