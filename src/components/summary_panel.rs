//! サマリーパネル（摂取・消費・正味・目標・残り）

use leptos::*;

use crate::models::DaySummary;

#[component]
pub fn SummaryPanel(#[prop(into)] summary: Signal<DaySummary>) -> impl IntoView {
    let over_class = move |base: &'static str| {
        if summary.get().is_over_goal() {
            format!("{} over-limit", base)
        } else {
            base.to_string()
        }
    };

    view! {
        <section class="summary-panel">
            <div class="metrics">
                <div id="calories-in" class="metric">
                    <span class="metric-label">"Calories In"</span>
                    <span class="metric-value">{move || format!("{} kcal", summary.get().cal_in)}</span>
                </div>
                <div id="calories-out" class="metric">
                    <span class="metric-label">"Calories Out"</span>
                    <span class="metric-value">{move || format!("{} kcal", summary.get().cal_out)}</span>
                </div>
                <div id="net-calories" class="metric">
                    <span class="metric-label">"Net Calories"</span>
                    <span class=move || over_class("metric-value")>
                        {move || format!("{} kcal", summary.get().net)}
                    </span>
                </div>
            </div>
            <div class="goal-status">
                <p>"Goal: " <span id="calorie-goal-val">{move || summary.get().goal}</span></p>
                <p class=move || over_class("remaining")>
                    "Remaining: " <span id="calories-remaining-val">{move || summary.get().remaining}</span>
                </p>
            </div>
        </section>
    }
}
