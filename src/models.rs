//! データ構造体モジュール

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1日の目標カロリー（初期値）
pub const DEFAULT_GOAL: i64 = 2000;

// ============================================
// 永続化されるデータ構造
// ============================================

/// 保存レコード全体（localStorageに1件だけ保存される）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub current_day_index: u32,
    /// 日番号 → その日のログ（JSON上のキーは文字列）
    pub logs: BTreeMap<u32, DayLog>,
    /// 保存ごとに加算される。他タブでの上書き検出に使う
    #[serde(default)]
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    #[serde(default = "default_goal")]
    pub goal: i64,
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// 正: 摂取、負: 消費
    pub calories: i64,
}

fn default_goal() -> i64 {
    DEFAULT_GOAL
}

impl Default for DayLog {
    fn default() -> Self {
        DayLog {
            goal: DEFAULT_GOAL,
            items: Vec::new(),
        }
    }
}

impl Default for AppData {
    /// 初回起動時のデータ（1日目、目標2000、項目なし）
    fn default() -> Self {
        let mut logs = BTreeMap::new();
        logs.insert(1, DayLog::default());
        AppData {
            current_day_index: 1,
            logs,
            revision: 0,
        }
    }
}

impl AppData {
    pub fn current_day(&self) -> Option<&DayLog> {
        self.logs.get(&self.current_day_index)
    }

    pub fn current_day_mut(&mut self) -> Option<&mut DayLog> {
        self.logs.get_mut(&self.current_day_index)
    }

    /// 最大の日番号
    pub fn latest_day_index(&self) -> Option<u32> {
        self.logs.keys().next_back().copied()
    }

    /// 新しい日に割り当てる番号（max + 1、ログが空なら1）
    pub fn next_day_index(&self) -> u32 {
        self.latest_day_index().map(|i| i.saturating_add(1)).unwrap_or(1)
    }

    /// 指定日のログがなければ初期値で作成する
    pub fn ensure_day(&mut self, index: u32) -> &mut DayLog {
        self.logs.entry(index).or_default()
    }
}

impl DayLog {
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find_item(id).is_some()
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary::of(self)
    }
}

// ============================================
// 集計
// ============================================

/// 1日分の集計値
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    pub cal_in: i64,
    pub cal_out: i64,
    pub net: i64,
    pub goal: i64,
    pub remaining: i64,
}

impl DaySummary {
    pub fn of(day: &DayLog) -> Self {
        let (cal_in, cal_out) = day.items.iter().fold((0i64, 0i64), |(cin, cout), item| {
            if item.calories > 0 {
                (cin.saturating_add(item.calories), cout)
            } else {
                (cin, cout.saturating_add(item.calories.saturating_abs()))
            }
        });
        let net = cal_in.saturating_sub(cal_out);
        DaySummary {
            cal_in,
            cal_out,
            net,
            goal: day.goal,
            remaining: day.goal.saturating_sub(net),
        }
    }

    /// 目標超過（表示の強調にだけ使う）
    pub fn is_over_goal(&self) -> bool {
        self.net > self.goal
    }
}

/// 正味カロリーを符号付きで表示（"+50 kcal" / "-150 kcal"）
pub fn format_signed_kcal(net: i64) -> String {
    if net >= 0 {
        format!("+{} kcal", net)
    } else {
        format!("{} kcal", net)
    }
}

// ============================================
// 表示用カテゴリ
// ============================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemCategory {
    Exercise,
    Egg,
    Toast,
    Salad,
    Default,
}

impl ItemCategory {
    /// カテゴリ判定（負のカロリーは運動、次に名前の部分一致を優先順に）
    pub fn classify(name: &str, calories: i64) -> Self {
        let name_lower = name.to_lowercase();

        if calories < 0 {
            ItemCategory::Exercise
        } else if name_lower.contains("egg") {
            ItemCategory::Egg
        } else if name_lower.contains("toast") {
            ItemCategory::Toast
        } else if name_lower.contains("salad") || name_lower.contains("chicken") {
            ItemCategory::Salad
        } else {
            ItemCategory::Default
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ItemCategory::Exercise => "🏃",
            ItemCategory::Egg => "🥚",
            ItemCategory::Toast => "🍞",
            ItemCategory::Salad => "🥗",
            ItemCategory::Default => "🍎",
        }
    }
}

impl Item {
    pub fn category(&self) -> ItemCategory {
        ItemCategory::classify(&self.name, self.calories)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.category().icon(), self.name)
    }
}
