//! トラッカー（当日のログ編集）
//!
//! ページが所有する状態オブジェクト。すべての変更操作は検証 → 変更 → 全体保存の順に行う。
//! 入力エラーはalertで通知して中断し、状態は変更しない。

use thiserror::Error;
use uuid::Uuid;

use crate::models::{AppData, DayLog, DaySummary, Item, DEFAULT_GOAL};
use crate::utils::dialogs::Prompt;
use crate::utils::parse_int;
use crate::utils::storage::{self, KvStore};

/// 入力エラー（表示文字列はそのままalertに出す）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a valid name and calorie amount.")]
    InvalidItem,
    #[error("Please enter a valid positive number for the goal.")]
    InvalidGoal,
}

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this item?";

static EMPTY_DAY: DayLog = DayLog {
    goal: DEFAULT_GOAL,
    items: Vec::new(),
};

/// 名前とカロリーの検証
pub fn validate_item(name: &str, calories: &str) -> Result<(String, i64), InputError> {
    let name = name.trim();
    match parse_int(calories) {
        Some(calories) if !name.is_empty() => Ok((name.to_string(), calories)),
        _ => Err(InputError::InvalidItem),
    }
}

/// 目標は0以上の整数のみ
pub fn validate_goal(input: &str) -> Result<i64, InputError> {
    match parse_int(input) {
        Some(goal) if goal >= 0 => Ok(goal),
        _ => Err(InputError::InvalidGoal),
    }
}

/// 項目行に対する操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Save { name: String, calories: String },
    Cancel,
    Delete,
}

pub struct Tracker<S: KvStore, P: Prompt> {
    store: S,
    prompt: P,
    data: AppData,
    /// 編集モード中の項目（同時に1つまで）
    editing: Option<String>,
    lost_update: bool,
}

impl<S: KvStore, P: Prompt> Tracker<S, P> {
    /// 読み込み（修復込み）後、修復結果をすぐ保存する
    pub fn open(store: S, prompt: P) -> Self {
        let data = storage::load(&store);
        let mut tracker = Tracker {
            store,
            prompt,
            data,
            editing: None,
            lost_update: false,
        };
        tracker.persist();
        tracker
    }

    pub fn current_day_index(&self) -> u32 {
        self.data.current_day_index
    }

    pub fn current_day(&self) -> &DayLog {
        self.data.current_day().unwrap_or(&EMPTY_DAY)
    }

    pub fn summary(&self) -> DaySummary {
        self.current_day().summary()
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// 別ビューの保存内容を上書きしたか
    pub fn lost_update(&self) -> bool {
        self.lost_update
    }

    pub fn dismiss_lost_update(&mut self) {
        self.lost_update = false;
    }

    fn persist(&mut self) {
        match storage::save(&self.store, &mut self.data) {
            Ok(report) => {
                if report.lost_update {
                    self.lost_update = true;
                }
            }
            Err(e) => log::error!(target: "tracker", "failed to save data: {}", e),
        }
    }

    fn reject<T>(&self, err: InputError) -> Result<T, InputError> {
        self.prompt.alert(&err.to_string());
        Err(err)
    }

    /// 項目を追加して新しいIDを返す
    pub fn add_item(&mut self, name: &str, calories: &str) -> Result<String, InputError> {
        let (name, calories) = match validate_item(name, calories) {
            Ok(v) => v,
            Err(e) => return self.reject(e),
        };

        let index = self.data.current_day_index;
        let day = self.data.ensure_day(index);
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !day.contains_id(&candidate) {
                break candidate;
            }
        };
        day.items.push(Item {
            id: id.clone(),
            name,
            calories,
        });
        log::info!(target: "tracker", "added item {} to day {}", id, index);

        self.persist();
        Ok(id)
    }

    /// 項目を更新する。IDが見つからなければ編集を取り消す（Ok(false)）
    pub fn edit_item(&mut self, id: &str, name: &str, calories: &str) -> Result<bool, InputError> {
        let (name, calories) = match validate_item(name, calories) {
            Ok(v) => v,
            Err(e) => return self.reject(e),
        };

        let found = self
            .data
            .current_day_mut()
            .and_then(|day| day.items.iter_mut().find(|i| i.id == id));
        let Some(item) = found else {
            log::warn!(target: "tracker", "edited item {} no longer exists, cancelling edit", id);
            self.editing = None;
            return Ok(false);
        };

        item.name = name;
        item.calories = calories;
        self.editing = None;
        log::info!(target: "tracker", "updated item {}", id);

        self.persist();
        Ok(true)
    }

    /// 確認後に削除。削除したら true
    pub fn delete_item(&mut self, id: &str) -> bool {
        if !self.prompt.confirm(DELETE_CONFIRM) {
            return false;
        }

        let removed = match self.data.current_day_mut() {
            Some(day) => match day.items.iter().position(|i| i.id == id) {
                Some(pos) => {
                    day.items.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        };

        if !removed {
            log::warn!(target: "tracker", "Attempted to remove item ID not found in current day: {}", id);
            return false;
        }
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        log::info!(target: "tracker", "removed item {}", id);

        self.persist();
        true
    }

    /// 目標を変更する。不正な値なら状態は変えずにエラー（表示は呼び出し側で戻す）
    pub fn set_goal(&mut self, input: &str) -> Result<i64, InputError> {
        let goal = match validate_goal(input) {
            Ok(g) => g,
            Err(e) => return self.reject(e),
        };

        let index = self.data.current_day_index;
        self.data.ensure_day(index).goal = goal;
        log::info!(target: "tracker", "goal for day {} set to {}", index, goal);

        self.persist();
        Ok(goal)
    }

    /// 新しい日を開始（前日の目標・項目は引き継がない）
    pub fn start_new_day(&mut self) -> u32 {
        let next = self.data.next_day_index();
        self.data.ensure_day(next);
        self.data.current_day_index = next;
        self.editing = None;
        log::info!(target: "tracker", "Started new day: {}", next);

        self.persist();
        next
    }

    /// 編集モードに入る。他の行の編集中の入力は破棄される
    pub fn enter_edit(&mut self, id: &str) -> bool {
        if !self.current_day().contains_id(id) {
            return false;
        }
        if let Some(previous) = self.editing.replace(id.to_string()) {
            if previous != id {
                log::debug!(target: "tracker", "discarding edit of {}", previous);
            }
        }
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// 行操作の振り分け。状態が変わったら true
    pub fn dispatch(&mut self, id: &str, action: RowAction) -> Result<bool, InputError> {
        match action {
            RowAction::Edit => Ok(self.enter_edit(id)),
            RowAction::Save { name, calories } => {
                if self.editing.as_deref() != Some(id) {
                    return Ok(false);
                }
                self.edit_item(id, &name, &calories)
            }
            RowAction::Cancel => {
                let was_editing = self.editing.as_deref() == Some(id);
                if was_editing {
                    self.cancel_edit();
                }
                Ok(was_editing)
            }
            RowAction::Delete => Ok(self.delete_item(id)),
        }
    }
}
