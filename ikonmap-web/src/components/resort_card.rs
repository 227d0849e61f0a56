use ikonmap_core::{Resort, color_for};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub resort: Resort,
    #[prop_or_default]
    pub selected: bool,
    /// Days planned here, when the resort is in the trip.
    #[prop_or_default]
    pub trip_days: Option<u32>,
    pub on_click: Callback<String>,
}

#[function_component(ResortCard)]
pub fn resort_card(p: &Props) -> Html {
    let resort = &p.resort;
    let color = color_for(&resort.color_group);
    let onclick = {
        let cb = p.on_click.clone();
        let id = resort.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let class = classes!("resort-card", p.selected.then_some("resort-card--selected"));

    html! {
        <button type="button" {class} {onclick} data-resort-id={resort.id.clone()} aria-pressed={p.selected.to_string()}>
            <span class="resort-card__dot" style={format!("background-color: {color}")}>
                if resort.is_new {
                    <span class="resort-card__new-dot" title="New for 25/26"></span>
                }
            </span>
            <span class="resort-card__body">
                <span class="resort-card__title">
                    <span class="resort-card__name">{ resort.name.clone() }</span>
                    if resort.is_new {
                        <span class="badge badge--new">{ "New" }</span>
                    }
                    if let Some(days) = p.trip_days {
                        <span class="badge badge--trip" title="In your trip">{ format!("{days}d") }</span>
                    }
                </span>
                <span class="resort-card__meta">
                    { resort.country.clone() }
                    if !resort.is_individual() {
                        <span class="muted">{ format!(" · {}", resort.group) }</span>
                    }
                </span>
                <span class="resort-card__days">
                    <span>{ "Full: " }<strong>{ resort.full_pass_days.raw().to_string() }</strong></span>
                    <span>{ "Base: " }<strong>{ resort.base_pass_days.raw().to_string() }</strong></span>
                </span>
                if resort.has_notes() {
                    <span class="resort-card__notes">{ resort.notes.clone() }</span>
                }
            </span>
        </button>
    }
}
