use crate::map::{self, MapHandle};
use crate::overlay::{self, Placement};
use ikonmap_core::{Filters, MapConfig, PassType, Planner, Resort, Trip, TripSummary, Viewport};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub planner: Rc<Planner>,
    pub map: MapHandle,
    pub filters: UseStateHandle<Filters>,
    pub selected: UseStateHandle<Option<String>>,
    /// The selection came from a marker click, so the panel follows the marker.
    pub anchored: UseStateHandle<bool>,
    pub sidebar_open: UseStateHandle<bool>,
    pub trip: UseStateHandle<Trip>,
    pub pass_type: UseStateHandle<PassType>,
    pub viewport: UseStateHandle<Viewport>,
    /// Map container size in CSS pixels, as last measured.
    pub container: UseStateHandle<(f64, f64)>,
}

/// Viewport to store when `next` becomes the selection.
///
/// The map only pans when the selection changes, so re-selecting the current
/// resort keeps the live viewport and the panel stays on the marker.
#[must_use]
pub fn focus_on_change(current: Option<&str>, next: &Resort, config: &MapConfig) -> Option<Viewport> {
    (current != Some(next.id.as_str())).then(|| config.focus_viewport(next.latitude, next.longitude))
}

#[hook]
pub fn use_app_state() -> AppState {
    let planner = use_memo((), |()| crate::catalog::load_planner());
    let map = {
        let planner = Rc::clone(&planner);
        (*use_memo((), move |()| map::connect(planner.map_config()))).clone()
    };
    let initial_viewport = planner.map_config().initial_viewport;

    AppState {
        planner,
        map,
        filters: use_state(Filters::default),
        selected: use_state(|| None::<String>),
        anchored: use_state(|| false),
        sidebar_open: use_state(|| true),
        trip: use_state(Trip::new),
        pass_type: use_state(PassType::default),
        viewport: use_state(move || initial_viewport),
        container: use_state(|| (0.0, 0.0)),
    }
}

impl AppState {
    #[must_use]
    pub fn selected_resort(&self) -> Option<&Resort> {
        self.selected
            .as_deref()
            .and_then(|id| self.planner.catalog().get(id))
    }

    #[must_use]
    pub fn summary(&self) -> TripSummary {
        self.planner.summarize(&self.trip, *self.pass_type)
    }

    /// Where the detail panel goes for the current selection and viewport.
    #[must_use]
    pub fn placement(&self) -> Option<Placement> {
        if !*self.anchored {
            return None;
        }
        let resort = self.selected_resort()?;
        overlay::placement_for(
            resort,
            &self.viewport,
            *self.container,
            self.planner.map_config(),
        )
    }

    /// Select a resort and pan the map onto it.
    pub fn select(&self, resort_id: &str, anchored: bool) {
        let Some(resort) = self.planner.catalog().get(resort_id) else {
            log::debug!("ignoring selection of unknown resort {resort_id}");
            return;
        };
        if let Some(focus) =
            focus_on_change(self.selected.as_deref(), resort, self.planner.map_config())
        {
            self.viewport.set(focus);
        }
        self.selected.set(Some(resort_id.to_string()));
        self.anchored.set(anchored);
    }

    pub fn clear_selection(&self) {
        self.selected.set(None);
        self.anchored.set(false);
    }
}
