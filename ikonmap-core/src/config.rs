use crate::geo::{LatLng, Viewport};
use serde::{Deserialize, Serialize};

/// Map embedding and overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Identifier of the hosted map; `None` renders the "not configured" placeholder.
    #[serde(default)]
    pub map_id: Option<String>,
    /// Zoom applied when the map pans to a selected resort.
    #[serde(default = "MapConfig::default_focus_zoom")]
    pub focus_zoom: f64,
    #[serde(default = "MapConfig::default_initial_viewport")]
    pub initial_viewport: Viewport,
    /// Width of the detail overlay, used to keep it inside the container.
    #[serde(default = "MapConfig::default_panel_width")]
    pub panel_width: f64,
    /// Vertical gap between the marker and the overlay's pointer.
    #[serde(default = "MapConfig::default_panel_offset_y")]
    pub panel_offset_y: f64,
}

impl MapConfig {
    const fn default_focus_zoom() -> f64 {
        10.0
    }

    const fn default_initial_viewport() -> Viewport {
        Viewport {
            center: LatLng {
                latitude: 42.0,
                longitude: -40.0,
            },
            zoom: 1.6,
        }
    }

    const fn default_panel_width() -> f64 {
        400.0
    }

    const fn default_panel_offset_y() -> f64 {
        18.0
    }

    #[must_use]
    pub const fn default_config() -> Self {
        Self {
            map_id: None,
            focus_zoom: Self::default_focus_zoom(),
            initial_viewport: Self::default_initial_viewport(),
            panel_width: Self::default_panel_width(),
            panel_offset_y: Self::default_panel_offset_y(),
        }
    }

    /// Parse configuration JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace the map id when `map_id` is set and non-blank.
    #[must_use]
    pub fn with_map_id_override(mut self, map_id: Option<&str>) -> Self {
        if let Some(id) = map_id.map(str::trim).filter(|id| !id.is_empty()) {
            self.map_id = Some(id.to_string());
        }
        self
    }

    /// Viewport used to pan the map onto a resort.
    #[must_use]
    pub const fn focus_viewport(&self, latitude: f64, longitude: f64) -> Viewport {
        Viewport::focused_on(latitude, longitude, self.focus_zoom)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
