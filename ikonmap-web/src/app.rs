//! Application shell: sidebar, map, detail overlay and trip planner.

pub mod state;

use crate::components::detail_panel::ResortDetailPanel;
use crate::components::map_view::MapView;
use crate::components::sidebar::Sidebar;
use crate::components::trip_planner::TripPlanner;
use crate::dom;
use crate::map::FeatureClick;
use ikonmap_core::{Filters, PassType, Resort, Viewport};
use state::use_app_state;
use std::rc::Rc;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let state = use_app_state();
    let map_ref = use_node_ref();

    let visible = {
        let planner = Rc::clone(&state.planner);
        use_memo((*state.filters).clone(), move |filters| {
            let resorts: Vec<Resort> = planner.filtered(filters).into_iter().cloned().collect();
            let ids = Rc::new(resorts.iter().map(|r| r.id.clone()).collect::<Vec<_>>());
            (resorts, ids)
        })
    };

    let on_filters_change = {
        let filters = state.filters.clone();
        Callback::from(move |next: Filters| filters.set(next))
    };
    let on_sidebar_select = {
        let state = state.clone();
        Callback::from(move |id: String| state.select(&id, false))
    };
    let on_feature_click = {
        let state = state.clone();
        let map_ref = map_ref.clone();
        Callback::from(move |click: FeatureClick| {
            state.container.set(dom::element_size(&map_ref));
            state.select(&click.resort_id, true);
        })
    };
    let on_viewport = {
        let viewport = state.viewport.clone();
        let container = state.container.clone();
        let map_ref = map_ref.clone();
        use_callback((), move |next: Viewport, _: &()| {
            container.set(dom::element_size(&map_ref));
            viewport.set(next);
        })
    };
    let on_close_panel = {
        let state = state.clone();
        Callback::from(move |()| state.clear_selection())
    };
    let on_set_days = {
        let trip = state.trip.clone();
        Callback::from(move |(id, days): (String, u32)| trip.set(trip.with_days(id, days)))
    };
    let on_remove = {
        let trip = state.trip.clone();
        Callback::from(move |id: String| trip.set(trip.without(&id)))
    };
    let on_clear_trip = {
        let trip = state.trip.clone();
        Callback::from(move |()| trip.set(trip.cleared()))
    };
    let on_pass_change = {
        let pass_type = state.pass_type.clone();
        Callback::from(move |pass: PassType| pass_type.set(pass))
    };
    let on_close_sidebar = {
        let sidebar_open = state.sidebar_open.clone();
        Callback::from(move |()| sidebar_open.set(false))
    };
    let on_open_sidebar = {
        let sidebar_open = state.sidebar_open.clone();
        Callback::from(move |_: MouseEvent| sidebar_open.set(true))
    };

    let map_config = state.planner.map_config();
    let selected = state.selected_resort();
    let focus = selected.map(|r| map_config.focus_viewport(r.latitude, r.longitude));

    let panel = selected.map_or_else(Html::default, |resort| {
        let siblings: Vec<Resort> = state
            .planner
            .catalog()
            .bank_siblings(resort)
            .into_iter()
            .cloned()
            .collect();
        html! {
            <ResortDetailPanel
                resort={resort.clone()}
                {siblings}
                placement={state.placement()}
                trip_days={state.trip.days_for(&resort.id)}
                on_close={on_close_panel.clone()}
                on_navigate={on_sidebar_select.clone()}
                {on_set_days}
                {on_remove}
            />
        }
    });

    html! {
        <div class="app-shell">
            <Sidebar
                open={*state.sidebar_open}
                resorts={visible.0.clone()}
                total={state.planner.catalog().len()}
                filters={(*state.filters).clone()}
                {on_filters_change}
                selected={state.selected.as_deref().map(|id| AttrValue::from(id.to_string()))}
                trip={(*state.trip).clone()}
                on_resort_click={on_sidebar_select.clone()}
                on_close={on_close_sidebar}
            />
            <main class="map-area" ref={map_ref}>
                if !*state.sidebar_open {
                    <button type="button" class="icon-btn map-area__menu" aria-label="Open sidebar" onclick={on_open_sidebar}>
                        { "☰" }
                    </button>
                }
                <MapView
                    service={state.map.clone()}
                    map_id={map_config.map_id.clone().map(AttrValue::from)}
                    selected={state.selected.as_deref().map(|id| AttrValue::from(id.to_string()))}
                    {focus}
                    visible_ids={Rc::clone(&visible.1)}
                    {on_viewport}
                    {on_feature_click}
                />
                { panel }
                <TripPlanner
                    summary={state.summary()}
                    pass_type={*state.pass_type}
                    {on_pass_change}
                    on_clear={on_clear_trip}
                    on_select={on_sidebar_select}
                />
            </main>
        </div>
    }
}
