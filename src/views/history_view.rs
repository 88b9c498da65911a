//! 履歴ビュー

use leptos::*;

use crate::history::{
    clear_all_history, render_history, HistoryState, CORRUPT_MESSAGE, EMPTY_MESSAGE,
};
use crate::utils::dialogs::BrowserPrompt;
use crate::utils::log_trace;
use crate::utils::storage::BrowserStore;

#[component]
pub fn HistoryView() -> impl IntoView {
    let (state, set_state) = create_signal(render_history(&BrowserStore));
    let (copy_success, set_copy_success) = create_signal(false);

    let on_clear = move |_| {
        if clear_all_history(&BrowserStore, &BrowserPrompt) {
            set_state.set(render_history(&BrowserStore));
        }
    };

    // 診断ログをクリップボードへ
    let copy_diagnostics = move |_| {
        spawn_local(async move {
            if log_trace::copy_logs_to_clipboard_async().await.is_ok() {
                set_copy_success.set(true);
                // 2秒後にリセット
                gloo::timers::future::TimeoutFuture::new(2000).await;
                set_copy_success.set(false);
            }
        });
    };

    view! {
        <div class="history-view">
            <h2>"Log History"</h2>

            <ul id="log-list">
                {move || match state.get() {
                    HistoryState::Empty => view! { <li>{EMPTY_MESSAGE}</li> }.into_view(),
                    HistoryState::Corrupt => view! { <li>{CORRUPT_MESSAGE}</li> }.into_view(),
                    HistoryState::Days(entries) => entries.into_iter().map(|entry| view! {
                        <li class="log-entry">
                            <span class="log-day">{entry.day_label()}</span>
                            <span class=format!("log-net-calories {}",
                                if entry.is_positive() { "positive" } else { "negative" }
                            )>
                                {entry.net_label()}
                            </span>
                        </li>
                    }).collect_view(),
                }}
            </ul>

            <button id="clear-logs-btn" class="danger" on:click=on_clear>"Clear All History"</button>

            <div class="diagnostics">
                <button on:click=copy_diagnostics>
                    {move || if copy_success.get() { "Copied!" } else { "Copy diagnostics" }}
                </button>
                <button on:click=move |_| log_trace::clear_logs()>"Clear diagnostics"</button>
            </div>
        </div>
    }
}
