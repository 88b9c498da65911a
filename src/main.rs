mod components;
mod history;
mod models;
mod tracker;
mod utils;
mod views;

use leptos::*;

use views::{HistoryView, TrackerView};

// ============================================
// メインアプリ（タブ切り替え）
// ============================================

#[derive(Clone, Copy, PartialEq, Debug)]
enum Tab {
    Tracker,
    History,
}

impl Tab {
    /// URLハッシュから初期タブを決める（#history 以外はトラッカー）
    fn from_hash(hash: &str) -> Self {
        if hash == "#history" {
            Tab::History
        } else {
            Tab::Tracker
        }
    }

    fn hash(self) -> &'static str {
        match self {
            Tab::Tracker => "#tracker",
            Tab::History => "#history",
        }
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

#[component]
fn App() -> impl IntoView {
    let (current_tab, set_current_tab) = create_signal(Tab::from_hash(&current_hash()));

    let select_tab = move |tab: Tab| {
        set_current_tab.set(tab);
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(tab.hash());
        }
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Calorie Tracker"</h1>
                <nav class="tabs">
                    <button
                        class=move || if current_tab.get() == Tab::Tracker { "active" } else { "" }
                        on:click=move |_| select_tab(Tab::Tracker)
                    >
                        "Today"
                    </button>
                    <button
                        class=move || if current_tab.get() == Tab::History { "active" } else { "" }
                        on:click=move |_| select_tab(Tab::History)
                    >
                        "History"
                    </button>
                </nav>
            </header>

            <main class="container">
                {move || match current_tab.get() {
                    Tab::Tracker => view! { <TrackerView /> }.into_view(),
                    Tab::History => view! { <HistoryView /> }.into_view(),
                }}
            </main>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    utils::log_trace::init();
    mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use super::Tab;

    #[test]
    fn tab_from_hash() {
        assert_eq!(Tab::from_hash("#history"), Tab::History);
        assert_eq!(Tab::from_hash("#tracker"), Tab::Tracker);
        assert_eq!(Tab::from_hash(""), Tab::Tracker);
        assert_eq!(Tab::from_hash(Tab::History.hash()), Tab::History);
    }
}
