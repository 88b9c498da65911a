//! 履歴（過去の日ごとの正味カロリー）
//!
//! 保存レコードを読むだけで、修復も書き込みもしない。例外は全削除のみ。

use crate::models::{format_signed_kcal, DaySummary};
use crate::utils::dialogs::Prompt;
use crate::utils::storage::{self, KvStore};

pub const EMPTY_MESSAGE: &str = "No log history found.";
pub const CORRUPT_MESSAGE: &str = "Error loading log data.";
pub const CLEAR_CONFIRM: &str =
    "Are you sure you want to delete all log history? This action cannot be undone.";
pub const CLEARED_MESSAGE: &str = "Log history cleared.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub day: u32,
    pub net: i64,
}

impl HistoryEntry {
    pub fn day_label(&self) -> String {
        format!("Day {}", self.day)
    }

    pub fn net_label(&self) -> String {
        format_signed_kcal(self.net)
    }

    pub fn is_positive(&self) -> bool {
        self.net >= 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryState {
    Empty,
    Corrupt,
    /// 日番号の昇順
    Days(Vec<HistoryEntry>),
}

/// 保存レコードから履歴一覧を作る
pub fn render_history(store: &impl KvStore) -> HistoryState {
    let record = match storage::read_record(store) {
        Ok(record) => record,
        Err(e) => {
            log::error!(target: "history", "Error parsing stored log data: {}", e);
            return HistoryState::Corrupt;
        }
    };

    let Some(logs) = record.and_then(|r| r.logs).filter(|logs| !logs.is_empty()) else {
        return HistoryState::Empty;
    };

    // BTreeMapなので数値順
    let entries = logs
        .iter()
        .map(|(day, day_log)| HistoryEntry {
            day: *day,
            net: DaySummary::of(day_log).net,
        })
        .collect();
    HistoryState::Days(entries)
}

/// 確認後に保存レコードごと削除する。削除したら true
pub fn clear_all_history(store: &impl KvStore, prompt: &impl Prompt) -> bool {
    if !prompt.confirm(CLEAR_CONFIRM) {
        return false;
    }
    if let Err(e) = storage::clear(store) {
        log::error!(target: "history", "failed to clear history: {}", e);
        return false;
    }
    log::info!(target: "history", "log history cleared");
    prompt.alert(CLEARED_MESSAGE);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppData, Item};
    use crate::utils::dialogs::RecordingPrompt;
    use crate::utils::storage::{MemoryStore, STORAGE_KEY};

    fn populated() -> MemoryStore {
        let store = MemoryStore::default();
        let mut data = AppData::default();
        for (day, calories) in [(1u32, vec![200, -150]), (3, vec![-300]), (2, vec![])] {
            data.ensure_day(day).items = calories
                .into_iter()
                .enumerate()
                .map(|(n, c)| Item {
                    id: format!("{day}-{n}"),
                    name: "entry".to_string(),
                    calories: c,
                })
                .collect();
        }
        storage::save(&store, &mut data).expect("save");
        store
    }

    #[test]
    fn lists_days_in_numeric_order() {
        let HistoryState::Days(entries) = render_history(&populated()) else {
            panic!("expected days");
        };
        assert_eq!(
            entries,
            vec![
                HistoryEntry { day: 1, net: 50 },
                HistoryEntry { day: 2, net: 0 },
                HistoryEntry { day: 3, net: -300 },
            ]
        );
        assert_eq!(entries[0].net_label(), "+50 kcal");
        assert_eq!(entries[1].net_label(), "+0 kcal");
        assert_eq!(entries[2].net_label(), "-300 kcal");
        assert!(!entries[2].is_positive());
    }

    #[test]
    fn numeric_not_lexical_order() {
        let raw = r#"{"currentDayIndex": 10, "logs": {"10": {"goal": 1, "items": []}, "9": {"goal": 1, "items": []}}}"#;
        let HistoryState::Days(entries) = render_history(&MemoryStore::with_record(raw)) else {
            panic!("expected days");
        };
        assert_eq!(entries.iter().map(|e| e.day).collect::<Vec<_>>(), vec![9, 10]);
        assert_eq!(entries[1].day_label(), "Day 10");
    }

    #[test]
    fn empty_states() {
        assert_eq!(render_history(&MemoryStore::default()), HistoryState::Empty);
        assert_eq!(render_history(&MemoryStore::with_record("{}")), HistoryState::Empty);
        assert_eq!(
            render_history(&MemoryStore::with_record(r#"{"logs": {}}"#)),
            HistoryState::Empty
        );
    }

    #[test]
    fn corrupt_record() {
        assert_eq!(
            render_history(&MemoryStore::with_record("{oops")),
            HistoryState::Corrupt
        );
    }

    #[test]
    fn clear_all_wipes_record() {
        let store = populated();
        let prompt = RecordingPrompt::accepting();

        assert!(clear_all_history(&store, &prompt));
        assert!(store.get(STORAGE_KEY).is_none());
        assert_eq!(render_history(&store), HistoryState::Empty);
        assert_eq!(*prompt.confirms.borrow(), vec![CLEAR_CONFIRM]);
        assert_eq!(*prompt.alerts.borrow(), vec![CLEARED_MESSAGE]);
    }

    #[test]
    fn declined_clear_keeps_record() {
        let store = populated();
        let prompt = RecordingPrompt::declining();

        assert!(!clear_all_history(&store, &prompt));
        assert!(matches!(render_history(&store), HistoryState::Days(_)));
        assert!(prompt.alerts.borrow().is_empty());
    }
}
