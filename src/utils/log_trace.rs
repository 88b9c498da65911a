//! 時系列トレースログ
//! `log` クレートのバックエンド。コンソールに出力しつつ、直近のログをlocalStorageに残す

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;

use super::storage::{BrowserStore, KvStore};

const MAX_LOG_ENTRIES: usize = 500;
const TRACE_KEY: &str = "calorieTrackerTrace";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub target: String,
    pub message: String,
}

struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    fn new() -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        };
        trace.load_from_storage();
        trace
    }

    fn push(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
        self.save_to_storage();
    }

    fn logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        if let Some(json_str) = BrowserStore.get(TRACE_KEY) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json_str) {
                self.logs = logs.into_iter().collect();
            }
        }
    }

    fn save_to_storage(&self) {
        if let Ok(json_str) = serde_json::to_string(&self.logs) {
            let _ = BrowserStore.set(TRACE_KEY, &json_str);
        }
    }
}

thread_local! {
    static LOG_TRACE: RefCell<LogTrace> = RefCell::new(LogTrace::new());
}

/// `log` のバックエンド
pub struct TraceLogger;

static LOGGER: TraceLogger = TraceLogger;

impl Log for TraceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let line = format!("[{}] {}", record.target(), message);

        match record.level() {
            Level::Error => web_sys::console::error_1(&line.into()),
            Level::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }

        let entry = LogEntry {
            timestamp: js_sys::Date::new_0()
                .to_iso_string()
                .as_string()
                .unwrap_or_default(),
            level: record.level().as_str().to_lowercase(),
            target: record.target().to_string(),
            message,
        };
        // ログ出力中の再入は記録しない
        LOG_TRACE.with(|trace| {
            if let Ok(mut trace) = trace.try_borrow_mut() {
                trace.push(entry);
            }
        });
    }

    fn flush(&self) {}
}

/// ビルド時に指定されたログレベル（既定は info）
fn configured_level() -> LevelFilter {
    option_env!("CALORIE_TRACKER_LOG_LEVEL")
        .and_then(|s| s.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// ロガーを登録（2回目以降は何もしない）
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(configured_level());
        log::info!(target: "log-trace", "logging initialized at {}", configured_level());
    }
}

pub fn logs_json() -> String {
    LOG_TRACE.with(|trace| trace.borrow().logs_json())
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

/// 診断ログをクリップボードにコピー
pub async fn copy_logs_to_clipboard_async() -> Result<(), String> {
    let json_str = logs_json();
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    let promise = window.navigator().clipboard().write_text(&json_str);

    match wasm_bindgen_futures::JsFuture::from(promise).await {
        Ok(_) => {
            log::info!(target: "log-trace", "copied diagnostics to clipboard");
            Ok(())
        }
        Err(e) => {
            let error_msg = format!("clipboard write failed: {:?}", e);
            log::error!(target: "log-trace", "{}", error_msg);
            Err(error_msg)
        }
    }
}
