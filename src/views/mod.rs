//! ビューモジュール
//!
//! トラッカーと履歴はそれぞれ表示時に保存レコードを読み込む

pub mod history_view;
pub mod tracker_view;

pub use history_view::HistoryView;
pub use tracker_view::TrackerView;
