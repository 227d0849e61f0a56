use ikonmap_core::{DayLimit, usage_percent};
use yew::prelude::*;

const WARNING_PATH: &str = "M10.29 3.86L1.82 18a2 2 0 001.71 3h16.94a2 2 0 001.71-3L13.71 3.86a2 2 0 00-3.42 0z";

#[derive(Properties, Clone, PartialEq)]
pub struct DayBarProps {
    pub used: u32,
    pub allowance: DayLimit,
    pub exceeded: bool,
}

/// Usage bar capped at 100%; renders nothing for unlimited allowances.
#[function_component(DayBar)]
pub fn day_bar(p: &DayBarProps) -> Html {
    let Some(pct) = usage_percent(p.used, p.allowance) else {
        return Html::default();
    };
    let fill = classes!(
        "day-bar__fill",
        if p.exceeded { "day-bar__fill--over" } else { "day-bar__fill--ok" }
    );
    html! {
        <div class="day-bar" role="meter" aria-valuemin="0" aria-valuemax="100" aria-valuenow={format!("{pct:.0}")}>
            <div class={fill} style={format!("width: {pct:.0}%")}></div>
        </div>
    }
}

fn warning_icon(size: &'static str) -> Html {
    html! {
        <svg width={size} height={size} viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="3" aria-hidden="true">
            <path d={WARNING_PATH} />
        </svg>
    }
}

#[function_component(ExceededBadge)]
pub fn exceeded_badge() -> Html {
    html! {
        <span class="badge badge--over">{ warning_icon("9") }{ "Over limit" }</span>
    }
}

#[function_component(NotOnPassBadge)]
pub fn not_on_pass_badge() -> Html {
    html! {
        <span class="badge badge--warn">
            <svg width="9" height="9" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="3" aria-hidden="true">
                <circle cx="12" cy="12" r="10" />
                <path d="M12 8v4M12 16h.01" />
            </svg>
            { "Not on pass" }
        </span>
    }
}

#[function_component(BankExceededBadge)]
pub fn bank_exceeded_badge() -> Html {
    html! {
        <span class="badge badge--over">{ warning_icon("8") }{ "Shared bank exceeded" }</span>
    }
}
