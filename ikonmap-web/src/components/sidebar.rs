use crate::components::resort_card::ResortCard;
use ikonmap_core::{
    COLOR_GROUPS, DAY_BANK_GROUPS, DayBankFilter, Filters, MACRO_REGIONS, PassTierFilter, Resort,
    Trip,
};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub open: bool,
    /// Resorts passing the current filters, in catalog order.
    pub resorts: Vec<Resort>,
    pub total: usize,
    pub filters: Filters,
    pub on_filters_change: Callback<Filters>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    #[prop_or_default]
    pub trip: Trip,
    pub on_resort_click: Callback<String>,
    pub on_close: Callback<()>,
}

const PASS_TIERS: [(PassTierFilter, &str); 3] = [
    (PassTierFilter::All, "All Passes"),
    (PassTierFilter::FullOnly, "Full Pass Only"),
    (PassTierFilter::BaseIncluded, "On Base Pass"),
];

fn chip_class(active: bool) -> Classes {
    classes!("chip", active.then_some("chip--active"))
}

fn emit_with(cb: &Callback<Filters>, next: Filters) -> Callback<MouseEvent> {
    let cb = cb.clone();
    Callback::from(move |_| cb.emit(next.clone()))
}

fn filter_chip(
    label: String,
    active: bool,
    swatch: Option<&'static str>,
    onclick: Callback<MouseEvent>,
) -> Html {
    html! {
        <button type="button" class={chip_class(active)} aria-pressed={active.to_string()} {onclick}>
            if let Some(color) = swatch {
                <span class="chip__swatch" style={format!("background-color: {color}")}></span>
            }
            <span class="chip__label">{ label }</span>
        </button>
    }
}

#[function_component(Sidebar)]
pub fn sidebar(p: &Props) -> Html {
    if !p.open {
        return Html::default();
    }

    let change = &p.on_filters_change;

    let on_search = {
        let cb = p.on_filters_change.clone();
        let filters = p.filters.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(filters.with_search(input.value()));
            }
        })
    };

    let on_tier = {
        let cb = p.on_filters_change.clone();
        let filters = p.filters.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<web_sys::HtmlSelectElement>() {
                cb.emit(Filters {
                    pass_tier: PassTierFilter::from_key(&select.value()),
                    ..filters.clone()
                });
            }
        })
    };

    let on_close = {
        let cb = p.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let region_chips = MACRO_REGIONS.iter().map(|region| {
        let active = p.filters.macro_regions.contains(*region);
        filter_chip(
            (*region).to_string(),
            active,
            None,
            emit_with(change, p.filters.toggle_region(region)),
        )
    });

    let color_chips = COLOR_GROUPS.iter().map(|&(group, color)| {
        let active = p.filters.color_groups.contains(group);
        filter_chip(
            group.to_string(),
            active,
            Some(color),
            emit_with(change, p.filters.toggle_color_group(group)),
        )
    });

    let bank_chips = std::iter::once((DayBankFilter::Individual, "Individual".to_string()))
        .chain(
            DAY_BANK_GROUPS
                .iter()
                .map(|d| (DayBankFilter::Group(d.key.to_string()), d.label.to_string())),
        )
        .map(|(bank, label)| {
            let active = p.filters.day_bank_groups.contains(&bank);
            filter_chip(label, active, None, emit_with(change, p.filters.toggle_day_bank(bank)))
        });

    let tier_options = PASS_TIERS.iter().map(|&(tier, label)| {
        html! {
            <option value={tier.key()} selected={p.filters.pass_tier == tier}>{ label }</option>
        }
    });

    let new_only = p.filters.new_only;
    let no_blackouts = p.filters.no_blackouts;
    let toggle_new = emit_with(
        change,
        Filters {
            new_only: !new_only,
            ..p.filters.clone()
        },
    );
    let toggle_blackouts = emit_with(
        change,
        Filters {
            no_blackouts: !no_blackouts,
            ..p.filters.clone()
        },
    );

    let list = if p.resorts.is_empty() {
        html! { <div class="sidebar__empty">{ "No resorts match your filters" }</div> }
    } else {
        p.resorts
            .iter()
            .map(|resort| {
                let selected = p.selected.as_deref() == Some(resort.id.as_str());
                html! {
                    <ResortCard
                        key={resort.id.clone()}
                        resort={resort.clone()}
                        {selected}
                        trip_days={p.trip.days_for(&resort.id)}
                        on_click={p.on_resort_click.clone()}
                    />
                }
            })
            .collect::<Html>()
    };

    html! {
        <aside class="sidebar" aria-label="Resort filters">
            <header class="sidebar__header">
                <div>
                    <h1 class="sidebar__title">{ "Ikon Pass 25/26" }</h1>
                    <p class="sidebar__count">{ format!("{} of {} resorts", p.resorts.len(), p.total) }</p>
                </div>
                <button type="button" class="icon-btn" aria-label="Close sidebar" onclick={on_close}>
                    <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" aria-hidden="true">
                        <path d="M15 18l-6-6 6-6" />
                    </svg>
                </button>
            </header>

            <div class="sidebar__search">
                <input
                    id="resort-search"
                    type="search"
                    placeholder="Search resorts, countries..."
                    aria-label="Search resorts"
                    value={p.filters.search.clone()}
                    oninput={on_search}
                />
            </div>

            <div class="sidebar__filters">
                <fieldset class="filter-group">
                    <legend>{ "Region" }</legend>
                    <div class="chip-row">{ for region_chips }</div>
                </fieldset>
                <fieldset class="filter-group">
                    <legend>{ "Color Group" }</legend>
                    <div class="chip-row">{ for color_chips }</div>
                </fieldset>
                <fieldset class="filter-group">
                    <legend>{ "Day Bank" }</legend>
                    <div class="chip-row">{ for bank_chips }</div>
                </fieldset>
                <div class="filter-row">
                    <label class="filter-group">
                        <span class="filter-group__label">{ "Pass Type" }</span>
                        <select id="pass-tier" onchange={on_tier}>{ for tier_options }</select>
                    </label>
                    { filter_chip("New Only".into(), new_only, None, toggle_new) }
                    { filter_chip("No Blackouts".into(), no_blackouts, None, toggle_blackouts) }
                </div>
                if p.filters.has_active() {
                    <button type="button" class="link-btn" onclick={emit_with(change, p.filters.cleared())}>
                        { "Clear all filters" }
                    </button>
                }
            </div>

            <div class="sidebar__list" role="list">{ list }</div>
        </aside>
    }
}
