use crate::components::badges::{BankExceededBadge, DayBar, ExceededBadge, NotOnPassBadge};
use ikonmap_core::{NOT_ON_PASS, PassType, ResortStatus, SharedBankStatus, TripSummary};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub summary: TripSummary,
    pub pass_type: PassType,
    pub on_pass_change: Callback<PassType>,
    pub on_clear: Callback<()>,
    pub on_select: Callback<String>,
}

fn select_cb(cb: &Callback<String>, id: &str) -> Callback<MouseEvent> {
    let cb = cb.clone();
    let id = id.to_string();
    Callback::from(move |_| cb.emit(id.clone()))
}

fn resort_row(status: &ResortStatus, on_select: &Callback<String>) -> Html {
    let flagged = status.exceeded || status.not_on_pass;
    let limit_label = if status.not_on_pass {
        NOT_ON_PASS.to_string()
    } else {
        status.allowance.to_string()
    };
    html! {
        <button type="button" class="trip-row" key={status.resort.id.clone()} onclick={select_cb(on_select, &status.resort.id)}>
            <span class="trip-row__title">
                <span class="trip-row__name">{ status.resort.name.clone() }</span>
                if status.exceeded { <ExceededBadge /> }
                if status.not_on_pass { <NotOnPassBadge /> }
            </span>
            <span class="trip-row__usage">
                <span class={classes!("trip-row__used", flagged.then_some("trip-row__used--over"))}>{ status.days.to_string() }</span>
                <span class="muted">{ format!(" / {limit_label} days") }</span>
            </span>
            if !status.not_on_pass {
                <DayBar used={status.days} allowance={status.allowance} exceeded={status.exceeded} />
            }
        </button>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct BankRowProps {
    pub bank: SharedBankStatus,
    pub on_select: Callback<String>,
}

#[function_component(SharedBankRow)]
pub fn shared_bank_row(p: &BankRowProps) -> Html {
    let expanded = use_state(|| true);
    let toggle = {
        let expanded = expanded.clone();
        Callback::from(move |_| expanded.set(!*expanded))
    };
    let bank = &p.bank;
    let members = bank.resorts.iter().map(|member| {
        html! {
            <button type="button" class="trip-member" key={member.resort.id.clone()} onclick={select_cb(&p.on_select, &member.resort.id)}>
                <span class="trip-member__name">{ member.resort.name.clone() }</span>
                <span class="trip-member__days">{ format!("{}d", member.days) }</span>
            </button>
        }
    });

    html! {
        <div class="trip-bank">
            <button type="button" class="trip-row" aria-expanded={expanded.to_string()} onclick={toggle}>
                <span class="trip-row__title">
                    <span class="trip-bank__name">{ bank.group.clone() }</span>
                    if bank.exceeded { <BankExceededBadge /> }
                    if bank.not_on_pass { <NotOnPassBadge /> }
                </span>
                <span class="trip-row__usage">
                    <span class={classes!("trip-row__used", bank.exceeded.then_some("trip-row__used--over"))}>{ bank.used_days.to_string() }</span>
                    <span class="muted">{ format!(" / {} shared days", bank.allowance) }</span>
                </span>
                <DayBar used={bank.used_days} allowance={bank.allowance} exceeded={bank.exceeded} />
            </button>
            if *expanded {
                <div class="trip-bank__members">{ for members }</div>
            }
        </div>
    }
}

#[function_component(TripPlanner)]
pub fn trip_planner(p: &Props) -> Html {
    let collapsed = use_state(|| false);
    let toggle = {
        let collapsed = collapsed.clone();
        Callback::from(move |_| collapsed.set(!*collapsed))
    };
    let on_clear = {
        let cb = p.on_clear.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let summary = &p.summary;
    let has_trip = !summary.is_empty();

    let pass_buttons = PassType::ALL.iter().map(|&pass| {
        let cb = p.on_pass_change.clone();
        let active = p.pass_type == pass;
        html! {
            <button type="button" class={classes!("pass-toggle__btn", active.then_some("pass-toggle__btn--active"))} aria-pressed={active.to_string()} onclick={Callback::from(move |_| cb.emit(pass))}>
                { pass.label() }
            </button>
        }
    });

    let body = if has_trip {
        html! {
            <div class="trip-planner__rows">
                { for summary.individual_resorts.iter().map(|status| resort_row(status, &p.on_select)) }
                { for summary.shared_banks.iter().map(|bank| html! {
                    <SharedBankRow key={bank.group.clone()} bank={bank.clone()} on_select={p.on_select.clone()} />
                }) }
            </div>
        }
    } else {
        html! {
            <div class="trip-planner__empty">
                <p>{ "Select a resort on the map and tap " }<strong>{ "Add to Trip" }</strong></p>
            </div>
        }
    };

    html! {
        <section class="trip-planner" aria-label="Trip Planner">
            <header class="trip-planner__header">
                <span class="trip-planner__title">{ "Trip Planner" }</span>
                if has_trip {
                    <span class={classes!("trip-planner__total", summary.has_any_exceeded.then_some("trip-planner__total--over"))}>
                        { format!("{}d", summary.total_days) }
                    </span>
                }
                <button type="button" class="icon-btn" aria-label={if *collapsed { "Expand" } else { "Collapse" }} onclick={toggle}>
                    { if *collapsed { "▾" } else { "▴" } }
                </button>
            </header>
            if !*collapsed {
                <div class="pass-toggle" role="group" aria-label="Pass type">{ for pass_buttons }</div>
                { body }
                if has_trip {
                    <footer class="trip-planner__footer">
                        <span><strong>{ summary.total_days.to_string() }</strong>{ " total days" }</span>
                        <button type="button" class="link-btn link-btn--danger" onclick={on_clear}>{ "Clear trip" }</button>
                    </footer>
                }
            }
        </section>
    }
}
