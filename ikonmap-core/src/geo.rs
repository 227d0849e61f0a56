//! Web-Mercator projection from geographic coordinates to container pixels.
//!
//! Used to keep an overlay anchored on a marker while the externally rendered
//! map pans and zooms. Latitude must stay strictly inside (-90, 90); the poles
//! are singular in this projection and produce non-finite output.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Edge length of one map tile, in pixels.
pub const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Latest viewport observed from the map service.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    #[must_use]
    pub const fn focused_on(latitude: f64, longitude: f64, zoom: f64) -> Self {
        Self {
            center: LatLng {
                latitude,
                longitude,
            },
            zoom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Whether the point falls inside a `width` x `height` container.
    #[must_use]
    pub fn is_within(self, width: f64, height: f64) -> bool {
        (0.0..=width).contains(&self.x) && (0.0..=height).contains(&self.y)
    }
}

/// World width in pixels at `zoom`.
#[must_use]
pub fn world_scale(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

#[must_use]
pub fn project_x(longitude: f64, scale: f64) -> f64 {
    (longitude + 180.0) / 360.0 * scale
}

#[must_use]
pub fn project_y(latitude: f64, scale: f64) -> f64 {
    let sin_lat = (latitude * PI / 180.0).sin();
    (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * scale
}

/// Pixel position of (`longitude`, `latitude`) in a container whose midpoint
/// renders the viewport centre.
#[must_use]
pub fn lng_lat_to_pixel(
    longitude: f64,
    latitude: f64,
    viewport: &Viewport,
    container_width: f64,
    container_height: f64,
) -> PixelPoint {
    let scale = world_scale(viewport.zoom);

    let center_x = project_x(viewport.center.longitude, scale);
    let center_y = project_y(viewport.center.latitude, scale);
    let point_x = project_x(longitude, scale);
    let point_y = project_y(latitude, scale);

    PixelPoint {
        x: container_width / 2.0 + (point_x - center_x),
        y: container_height / 2.0 + (point_y - center_y),
    }
}
