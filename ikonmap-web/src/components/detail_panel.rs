//! Resort detail overlay.
//!
//! Shown over the map for the selected resort. When the selection came from a
//! marker click the panel carries a [`Placement`] and follows the marker;
//! otherwise it docks in the bottom-left corner.

use crate::overlay::Placement;
use crate::paths::placeholder_image;
use crate::thumbs::wiki_thumb;
use ikonmap_core::{MAX_ENTRY_DAYS, PassAllowance, Resort, clamp_days, color_for};
use yew::prelude::*;

const HERO_WIDTH: u32 = 800;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub resort: Resort,
    /// Other members of the resort's day bank.
    #[prop_or_default]
    pub siblings: Vec<Resort>,
    #[prop_or_default]
    pub placement: Option<Placement>,
    #[prop_or_default]
    pub trip_days: Option<u32>,
    pub on_close: Callback<()>,
    pub on_navigate: Callback<String>,
    pub on_set_days: Callback<(String, u32)>,
    pub on_remove: Callback<String>,
}

fn pass_day_card(label: &'static str, allowance: &PassAllowance) -> Html {
    let value_class = classes!(
        "pass-card__value",
        (!allowance.is_available()).then_some("pass-card__value--off"),
        allowance
            .limit()
            .is_unlimited()
            .then_some("pass-card__value--unlimited"),
    );
    html! {
        <div class="pass-card">
            <span class="pass-card__label">{ label }</span>
            <span class={value_class}>{ allowance.raw().to_string() }</span>
        </div>
    }
}

#[function_component(ResortDetailPanel)]
pub fn resort_detail_panel(p: &Props) -> Html {
    let resort = &p.resort;
    let img_error = use_state(|| false);
    let days = use_state(|| p.trip_days.unwrap_or(1));
    let panel_ref = use_node_ref();

    {
        let img_error = img_error.clone();
        let days = days.clone();
        let panel_ref = panel_ref.clone();
        let trip_days = p.trip_days;
        use_effect_with(resort.id.clone(), move |_| {
            img_error.set(false);
            days.set(trip_days.unwrap_or(1));
            if let Some(el) = panel_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
            || {}
        });
    }

    let on_close = {
        let cb = p.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = p.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let on_img_error = {
        let img_error = img_error.clone();
        Callback::from(move |_: Event| img_error.set(true))
    };
    let on_days_input = {
        let days = days.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                let requested = input.value().trim().parse::<u32>().unwrap_or(1);
                days.set(clamp_days(requested, MAX_ENTRY_DAYS));
            }
        })
    };
    let on_save = {
        let cb = p.on_set_days.clone();
        let id = resort.id.clone();
        let days = *days;
        Callback::from(move |_| cb.emit((id.clone(), days)))
    };
    let on_remove = {
        let cb = p.on_remove.clone();
        let id = resort.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };

    let color = color_for(&resort.color_group);
    let hero = match resort.image_url.as_deref() {
        Some(url) if !*img_error => html! {
            <img class="detail__img" src={wiki_thumb(url, HERO_WIDTH)} alt={resort.name.clone()} onerror={on_img_error} />
        },
        _ => html! {
            <div class="detail__img detail__img--placeholder" style={format!("background: linear-gradient(135deg, {color}30 0%, var(--surface) 100%)")}>
                <img src={placeholder_image()} alt="" aria-hidden="true" />
            </div>
        },
    };

    let siblings = p.siblings.iter().map(|sibling| {
        let cb = p.on_navigate.clone();
        let id = sibling.id.clone();
        html! {
            <button type="button" class="link-btn" key={sibling.id.clone()} onclick={Callback::from(move |_| cb.emit(id.clone()))}>
                { sibling.name.clone() }
            </button>
        }
    });

    let (class, style) = match p.placement {
        Some(placement) => (classes!("detail", "detail--anchored"), placement.style()),
        None => (classes!("detail", "detail--docked"), String::new()),
    };
    let in_trip = p.trip_days.is_some();

    html! {
        <div {class} {style} role="dialog" aria-labelledby="resort-detail-name" tabindex="-1" ref={panel_ref} onkeydown={on_keydown}>
            if p.placement.is_some() {
                <div class="detail__pointer" aria-hidden="true"></div>
            }
            <div class="detail__card">
                <div class="detail__hero">
                    { hero }
                    <button type="button" class="detail__close" aria-label="Close resort details" onclick={on_close}>{ "×" }</button>
                    <div class="detail__heading">
                        <h2 id="resort-detail-name">{ resort.name.clone() }</h2>
                        if resort.is_new {
                            <span class="badge badge--new">{ "New 25/26" }</span>
                        }
                    </div>
                </div>
                <div class="detail__accent" style={format!("background-color: {color}")}></div>
                <div class="detail__body">
                    <p class="detail__location">
                        <span>{ resort.country.clone() }</span>
                        <span class="sep">{ "·" }</span>
                        <span>{ resort.macro_region.clone() }</span>
                        if !resort.is_individual() {
                            <span class="sep">{ "·" }</span>
                            <span>{ resort.group.clone() }</span>
                        }
                    </p>
                    <div class="detail__passes">
                        { pass_day_card("Full Pass", &resort.full_pass_days) }
                        { pass_day_card("Base Pass", &resort.base_pass_days) }
                    </div>
                    if resort.reservation_required {
                        <p class="detail__flag">{ "Reservations required" }</p>
                    }
                    if let Some(dates) = resort.blackout_dates.as_deref().filter(|d| !d.trim().is_empty()) {
                        <p class="detail__flag">{ format!("Blackout dates: {dates}") }</p>
                    }
                    if resort.has_notes() {
                        <p class="detail__notes">{ resort.notes.clone() }</p>
                    }
                    if !p.siblings.is_empty() {
                        <div class="detail__bank">
                            <span class="detail__bank-label">{ "Shared day bank" }</span>
                            <div class="detail__bank-list">{ for siblings }</div>
                        </div>
                    }
                    <div class="detail__trip">
                        <label for="trip-days">{ "Days" }</label>
                        <input id="trip-days" type="number" min="1" max={MAX_ENTRY_DAYS.to_string()} value={days.to_string()} oninput={on_days_input} />
                        <button type="button" class="btn btn--primary" onclick={on_save}>
                            { if in_trip { "Update trip" } else { "Add to Trip" } }
                        </button>
                        if in_trip {
                            <button type="button" class="link-btn link-btn--danger" onclick={on_remove}>{ "Remove from trip" }</button>
                        }
                    </div>
                    <a class="detail__review" href={resort.review_url()} target="_blank" rel="noopener noreferrer">
                        { "View on Powderhounds" }
                    </a>
                </div>
            </div>
        </div>
    }
}
