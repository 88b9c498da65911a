//! トラッカービュー
//!
//! 当日の項目一覧、追加フォーム、目標入力、新しい日の開始

use leptos::*;

use crate::components::{ItemRow, SummaryPanel};
use crate::models::Item;
use crate::tracker::{RowAction, Tracker};
use crate::utils::dialogs::BrowserPrompt;
use crate::utils::storage::BrowserStore;

#[component]
pub fn TrackerView() -> impl IntoView {
    // ビューごとに状態を持つ（表示時に読み込み + 修復 + 保存）
    let tracker = create_rw_signal(Tracker::open(BrowserStore, BrowserPrompt));

    let (food_name, set_food_name) = create_signal(String::new());
    let (calories, set_calories) = create_signal(String::new());
    let name_ref = create_node_ref::<html::Input>();
    let goal_ref = create_node_ref::<html::Input>();

    let day_index = move || tracker.with(|t| t.current_day_index());
    let goal = move || tracker.with(|t| t.current_day().goal);
    let summary = Signal::derive(move || tracker.with(|t| t.summary()));
    let items = move || tracker.with(|t| t.current_day().items.clone());
    let lost_update = move || tracker.with(|t| t.lost_update());

    // 項目追加
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let name = food_name.get_untracked();
        let cal = calories.get_untracked();
        if let Some(Ok(_)) = tracker.try_update(|t| t.add_item(&name, &cal)) {
            set_food_name.set(String::new());
            set_calories.set(String::new());
            if let Some(input) = name_ref.get() {
                let _ = input.focus();
            }
        }
    };

    // 目標変更（不正な値なら表示を現在の目標に戻す）
    let on_goal_change = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        if !matches!(tracker.try_update(|t| t.set_goal(&value)), Some(Ok(_))) {
            let current = tracker.with_untracked(|t| t.current_day().goal);
            if let Some(input) = goal_ref.get() {
                input.set_value(&current.to_string());
            }
        }
    };

    let on_new_day = move |_| {
        tracker.update(|t| {
            t.start_new_day();
        });
    };

    view! {
        <div class="tracker-view">
            <div class="day-header">
                <h2 id="current-day-display">{move || format!("Day {} Log", day_index())}</h2>
                <button id="new-day-btn" on:click=on_new_day>"Start New Day"</button>
            </div>

            {move || lost_update().then(|| view! {
                <div class="notice warning">
                    <span>"This log was changed in another tab or page and has been overwritten."</span>
                    <button on:click=move |_| tracker.update(|t| t.dismiss_lost_update())>"Dismiss"</button>
                </div>
            })}

            <div class="goal-setting">
                <label for="calorie-goal-input">"Daily Goal (kcal)"</label>
                <input type="number" id="calorie-goal-input" min="0"
                    node_ref=goal_ref
                    prop:value=move || goal().to_string()
                    on:change=on_goal_change
                />
            </div>

            <SummaryPanel summary=summary />

            <form id="food-form" on:submit=on_submit>
                <input type="text" id="food-name" placeholder="Food or exercise"
                    node_ref=name_ref
                    prop:value=move || food_name.get()
                    on:input=move |ev| set_food_name.set(event_target_value(&ev))
                />
                <input type="number" id="calories" placeholder="Calories (negative = burned)"
                    prop:value=move || calories.get()
                    on:input=move |ev| set_calories.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </form>

            <ul id="food-list">
                <For
                    each=items
                    key=|item: &Item| (item.id.clone(), item.name.clone(), item.calories)
                    children=move |item: Item| {
                        let row_id = item.id.clone();
                        let editing = Signal::derive(move || {
                            tracker.with(|t| t.editing() == Some(row_id.as_str()))
                        });
                        let action_id = item.id.clone();
                        let on_action = Callback::new(move |action: RowAction| {
                            tracker.update(|t| {
                                // 入力エラーはalert済み
                                let _ = t.dispatch(&action_id, action);
                            });
                        });
                        view! { <ItemRow item=item editing=editing on_action=on_action /> }
                    }
                />
            </ul>
        </div>
    }
}
