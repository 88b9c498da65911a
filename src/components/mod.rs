//! UIコンポーネントモジュール

pub mod item_row;
pub mod summary_panel;

pub use item_row::ItemRow;
pub use summary_panel::SummaryPanel;
