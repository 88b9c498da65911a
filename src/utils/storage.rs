//! LocalStorage永続化
//!
//! 保存レコードは1件だけ（`STORAGE_KEY`）。トラッカーと履歴の両ビューで共有する。
//! 読み込み時は修復ポリシーを適用し、常に整合したAppDataを返す。

use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::{AppData, DayLog};

pub const STORAGE_KEY: &str = "calorieTrackerMultiDayData";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write to localStorage: {0}")]
    Write(String),
}

/// キー・バリュー型ストレージ
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// ブラウザのlocalStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl KvStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = Self::storage().ok()?;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

// ============================================
// 保存レコード（修復前）
// ============================================

/// 保存されたままのレコード。古い形式ではフィールドが欠けていることがある
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    #[serde(default)]
    pub current_day_index: Option<u32>,
    #[serde(default)]
    pub logs: Option<BTreeMap<u32, DayLog>>,
    #[serde(default)]
    pub revision: u64,
}

impl StoredRecord {
    /// 修復ポリシーを適用してAppDataにする
    pub fn repair(self) -> AppData {
        if self.logs.is_none() {
            log::debug!(target: "storage", "stored record has no logs, using empty map");
        }
        let mut data = AppData {
            current_day_index: self.current_day_index.unwrap_or(1),
            logs: self.logs.unwrap_or_default(),
            revision: self.revision,
        };

        if !data.logs.contains_key(&data.current_day_index) {
            log::warn!(
                target: "storage",
                "Current day index {} not found in logs. Resetting.",
                data.current_day_index
            );
            data.current_day_index = data.latest_day_index().unwrap_or(1);
            data.ensure_day(data.current_day_index);
        }
        data
    }
}

/// 保存レコードをそのまま読む（修復しない）
///
/// - `Ok(None)`: レコードなし
/// - `Err(_)`: 解析できないレコード
pub fn read_record(store: &impl KvStore) -> Result<Option<StoredRecord>, serde_json::Error> {
    match store.get(STORAGE_KEY) {
        Some(raw) => serde_json::from_str(&raw).map(Some),
        None => Ok(None),
    }
}

/// 読み込み + 修復。失敗時は初期データ
pub fn load(store: &impl KvStore) -> AppData {
    match read_record(store) {
        Ok(Some(record)) => record.repair(),
        Ok(None) => {
            log::info!(target: "storage", "no stored data, starting with day 1");
            AppData::default()
        }
        Err(e) => {
            log::error!(target: "storage", "Error parsing stored data: {}", e);
            AppData::default()
        }
    }
}

// ============================================
// 保存
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub revision: u64,
    /// 別のビューが保存した内容を上書きした
    pub lost_update: bool,
}

#[derive(Deserialize)]
struct RevisionOnly {
    #[serde(default)]
    revision: u64,
}

fn stored_revision(store: &impl KvStore) -> Option<u64> {
    let raw = store.get(STORAGE_KEY)?;
    serde_json::from_str::<RevisionOnly>(&raw)
        .ok()
        .map(|r| r.revision)
}

/// 全体をシリアライズして上書き保存する
///
/// 書き込みは常に行う（後勝ち）。保存済みのrevisionがこちらより新しい場合、
/// または一度保存した後にレコードが消えている場合は `lost_update` を立てる。
pub fn save(store: &impl KvStore, data: &mut AppData) -> Result<SaveReport, StorageError> {
    let stored = stored_revision(store);
    let lost_update = match stored {
        Some(r) => r > data.revision,
        None => data.revision > 0,
    };
    if lost_update {
        log::warn!(
            target: "storage",
            "stored data changed elsewhere (stored revision {:?}, ours {}), overwriting",
            stored,
            data.revision
        );
    }

    let previous = data.revision;
    data.revision = stored.unwrap_or(0).max(previous) + 1;

    let result = serde_json::to_string(data)
        .map_err(StorageError::from)
        .and_then(|json| store.set(STORAGE_KEY, &json));
    if let Err(e) = result {
        data.revision = previous;
        return Err(e);
    }

    Ok(SaveReport {
        revision: data.revision,
        lost_update,
    })
}

/// 保存レコードを削除
pub fn clear(store: &impl KvStore) -> Result<(), StorageError> {
    store.remove(STORAGE_KEY)
}

// ============================================
// テスト用のメモリストア
// ============================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_record(raw: &str) -> Self {
        let store = MemoryStore::default();
        store
            .entries
            .borrow_mut()
            .insert(STORAGE_KEY.to_string(), raw.to_string());
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.entries.borrow().get(STORAGE_KEY).cloned()
    }
}

#[cfg(test)]
impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, DEFAULT_GOAL};

    fn item(id: &str, name: &str, calories: i64) -> Item {
        Item {
            id: id.to_string(),
            name: name.to_string(),
            calories,
        }
    }

    #[test]
    fn empty_storage_loads_default() {
        let store = MemoryStore::default();
        assert_eq!(load(&store), AppData::default());
    }

    #[test]
    fn corrupted_json_loads_default() {
        for raw in ["{not json", "null", "42", "[]", "{\"logs\": {\"x\": 1}}"] {
            let store = MemoryStore::with_record(raw);
            let data = load(&store);
            assert_eq!(data.current_day_index, 1, "raw: {raw}");
            assert_eq!(data.logs.len(), 1);
            assert_eq!(data.logs[&1].goal, DEFAULT_GOAL);
            assert!(data.logs[&1].items.is_empty());
        }
    }

    #[test]
    fn round_trip_preserves_days_and_order() {
        let store = MemoryStore::default();
        let mut data = AppData::default();
        data.ensure_day(1).items = vec![item("a", "Eggs", 200), item("b", "Run", -150)];
        data.ensure_day(2).goal = 1800;
        data.ensure_day(2).items = vec![item("c", "Toast", 120)];
        data.current_day_index = 2;

        save(&store, &mut data).expect("save");
        let loaded = load(&store);

        assert_eq!(loaded.current_day_index, 2);
        assert_eq!(
            loaded.logs.keys().collect::<Vec<_>>(),
            data.logs.keys().collect::<Vec<_>>()
        );
        assert_eq!(loaded.logs[&1].items, data.logs[&1].items);
        assert_eq!(loaded.logs[&2], data.logs[&2]);
    }

    #[test]
    fn legacy_record_missing_fields() {
        let store = MemoryStore::with_record("{}");
        let data = load(&store);
        assert_eq!(data.current_day_index, 1);
        assert!(data.logs.contains_key(&1));

        let store = MemoryStore::with_record(r#"{"logs": null, "currentDayIndex": 4}"#);
        let data = load(&store);
        assert_eq!(data.current_day_index, 1);
        assert_eq!(data.logs.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn missing_current_day_falls_back_to_largest() {
        let raw = r#"{
            "currentDayIndex": 9,
            "logs": {
                "2": {"goal": 1500, "items": [{"id": "1700000000000", "name": "Salad", "calories": 300}]},
                "10": {"goal": 2500, "items": []},
                "3": {"goal": 2000, "items": []}
            }
        }"#;
        let data = load(&MemoryStore::with_record(raw));
        assert_eq!(data.current_day_index, 10);
        assert_eq!(data.logs.len(), 3);
        assert_eq!(data.logs[&10].goal, 2500);
    }

    #[test]
    fn missing_current_day_with_empty_logs_creates_day_one() {
        let raw = r#"{"currentDayIndex": 5, "logs": {}}"#;
        let data = load(&MemoryStore::with_record(raw));
        assert_eq!(data.current_day_index, 1);
        assert_eq!(data.logs[&1], DayLog::default());
    }

    #[test]
    fn day_log_missing_goal_gets_default() {
        let raw = r#"{"currentDayIndex": 1, "logs": {"1": {"items": []}}}"#;
        let data = load(&MemoryStore::with_record(raw));
        assert_eq!(data.logs[&1].goal, DEFAULT_GOAL);
    }

    #[test]
    fn save_increments_revision() {
        let store = MemoryStore::default();
        let mut data = AppData::default();
        let first = save(&store, &mut data).expect("save");
        let second = save(&store, &mut data).expect("save");
        assert_eq!(first.revision, 1);
        assert_eq!(second.revision, 2);
        assert!(!first.lost_update && !second.lost_update);
    }

    #[test]
    fn save_detects_newer_stored_revision() {
        let store = MemoryStore::default();
        let mut ours = AppData::default();
        save(&store, &mut ours).expect("save");

        let mut theirs = load(&store);
        theirs.ensure_day(2);
        save(&store, &mut theirs).expect("save");

        let report = save(&store, &mut ours).expect("save");
        assert!(report.lost_update);
        assert_eq!(report.revision, 3);
        // 後勝ち
        assert!(!load(&store).logs.contains_key(&2));
    }

    #[test]
    fn save_detects_wiped_record() {
        let store = MemoryStore::default();
        let mut data = AppData::default();
        save(&store, &mut data).expect("save");
        clear(&store).expect("clear");

        let report = save(&store, &mut data).expect("save");
        assert!(report.lost_update);
        assert!(store.raw().is_some());
    }

    #[test]
    fn clear_removes_record() {
        let store = MemoryStore::default();
        save(&store, &mut AppData::default()).expect("save");
        clear(&store).expect("clear");
        assert!(store.raw().is_none());
        assert!(matches!(read_record(&store), Ok(None)));
    }
}
