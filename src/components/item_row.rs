//! 項目行コンポーネント
//!
//! 表示モードと編集モードを切り替える。操作はすべて `RowAction` として親に渡す

use leptos::*;

use crate::models::Item;
use crate::tracker::RowAction;

#[component]
pub fn ItemRow(
    item: Item,
    #[prop(into)] editing: Signal<bool>,
    #[prop(into)] on_action: Callback<RowAction>,
) -> impl IntoView {
    // 編集中の入力（保存するまで確定しない）
    let (edit_name, set_edit_name) = create_signal(item.name.clone());
    let (edit_calories, set_edit_calories) = create_signal(item.calories.to_string());

    let sign_class = if item.calories < 0 { "negative" } else { "positive" };
    let label = item.label();
    let kcal = format!("{} kcal", item.calories);
    let name = item.name.clone();
    let calories = item.calories;

    // 編集モードに入る時は現在の値で入力を埋める
    let on_edit = move |_| {
        set_edit_name.set(name.clone());
        set_edit_calories.set(calories.to_string());
        on_action.call(RowAction::Edit);
    };
    let on_delete = move |_| on_action.call(RowAction::Delete);
    let on_save = move |_| {
        on_action.call(RowAction::Save {
            name: edit_name.get_untracked(),
            calories: edit_calories.get_untracked(),
        });
    };
    let on_cancel = move |_| on_action.call(RowAction::Cancel);

    view! {
        <li
            class=move || if editing.get() { "food-log-item editing" } else { "food-log-item" }
            data-id=item.id.clone()
        >
            <div class=format!("card-content {}", sign_class)>
                <span class="item-name">{label}</span>
                <span class="item-calories">{kcal}</span>
                <div class="item-actions">
                    <button class="edit-btn" title="Edit Item" on:click=on_edit>"✏️"</button>
                    <button class="delete-btn" title="Delete Item" on:click=on_delete>"🗑️"</button>
                </div>

                <div class="edit-inputs">
                    <input type="text" class="edit-name-input"
                        prop:value=move || edit_name.get()
                        on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                    />
                    <input type="number" class="edit-calories-input"
                        prop:value=move || edit_calories.get()
                        on:input=move |ev| set_edit_calories.set(event_target_value(&ev))
                    />
                </div>
                <div class="edit-actions">
                    <button class="save-edit-btn" on:click=on_save>"Save"</button>
                    <button class="cancel-edit-btn" on:click=on_cancel>"Cancel"</button>
                </div>
            </div>
        </li>
    }
}
