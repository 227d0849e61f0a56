//! Placement of the detail panel over the map.

use ikonmap_core::{MapConfig, PixelPoint, Resort, Viewport, lng_lat_to_pixel};

/// Horizontal distance from the panel's left edge to its pointer.
pub const POINTER_INSET: f64 = 30.0;
const EDGE_MARGIN: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
}

impl Placement {
    #[must_use]
    pub fn style(self) -> String {
        format!("left:{:.0}px;top:{:.0}px;", self.left, self.top)
    }
}

/// Position the panel so its pointer sits under `anchor`.
///
/// Returns `None` when the anchor has left the container; the panel then docks
/// in its default corner.
#[must_use]
pub fn anchored_placement(
    anchor: PixelPoint,
    container: (f64, f64),
    config: &MapConfig,
) -> Option<Placement> {
    let (width, height) = container;
    if width <= 0.0 || height <= 0.0 || !anchor.is_within(width, height) {
        return None;
    }
    let max_left = (width - config.panel_width - EDGE_MARGIN).max(EDGE_MARGIN);
    Some(Placement {
        left: (anchor.x - POINTER_INSET).clamp(EDGE_MARGIN, max_left),
        top: anchor.y + config.panel_offset_y,
    })
}

/// Re-project a resort against the latest viewport and place the panel under it.
#[must_use]
pub fn placement_for(
    resort: &Resort,
    viewport: &Viewport,
    container: (f64, f64),
    config: &MapConfig,
) -> Option<Placement> {
    let anchor = lng_lat_to_pixel(
        resort.longitude,
        resort.latitude,
        viewport,
        container.0,
        container.1,
    );
    anchored_placement(anchor, container, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WebCatalogLoader;
    use ikonmap_core::CatalogLoader;

    #[test]
    fn pointer_sits_under_the_anchor() {
        let cfg = MapConfig::default();
        let p = anchored_placement(PixelPoint { x: 300.0, y: 200.0 }, (1200.0, 800.0), &cfg).unwrap();
        assert!((p.left - 270.0).abs() < f64::EPSILON);
        assert!((p.top - 218.0).abs() < f64::EPSILON);
        assert_eq!(p.style(), "left:270px;top:218px;");
    }

    #[test]
    fn panel_is_kept_inside_the_container() {
        let cfg = MapConfig::default();
        let right = anchored_placement(PixelPoint { x: 1190.0, y: 10.0 }, (1200.0, 800.0), &cfg).unwrap();
        assert!((right.left - 792.0).abs() < f64::EPSILON);
        let left = anchored_placement(PixelPoint { x: 5.0, y: 10.0 }, (1200.0, 800.0), &cfg).unwrap();
        assert!((left.left - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offscreen_or_unmeasured_anchor_docks() {
        let cfg = MapConfig::default();
        assert!(anchored_placement(PixelPoint { x: -5.0, y: 10.0 }, (1200.0, 800.0), &cfg).is_none());
        assert!(anchored_placement(PixelPoint { x: 0.0, y: 0.0 }, (0.0, 0.0), &cfg).is_none());
    }

    #[test]
    fn resort_at_viewport_centre_anchors_mid_container() {
        let cfg = MapConfig::default();
        let catalog = WebCatalogLoader.load_catalog().unwrap();
        let resort = catalog.get("alta").unwrap();
        let vp = cfg.focus_viewport(resort.latitude, resort.longitude);
        let p = placement_for(resort, &vp, (1000.0, 600.0), &cfg).unwrap();
        assert!((p.left - 470.0).abs() < 1e-6);
        assert!((p.top - 318.0).abs() < 1e-6);
    }
}
