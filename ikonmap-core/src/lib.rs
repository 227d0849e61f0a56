//! Ikon Map Core
//!
//! Platform-agnostic planning logic for the Ikon resort map: the resort catalog,
//! day-allowance resolution, trip accounting against shared day banks, the
//! sidebar filter engine and the Mercator projection used to anchor overlays.
//! Nothing in this crate touches the DOM, the network or the map SDK.

pub mod accounting;
pub mod allowance;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod geo;
pub mod regions;
pub mod resort;
pub mod trip;

// Re-export commonly used types
pub use accounting::{
    BankMember, ResortStatus, SharedBankStatus, TripSummary, compute_trip_summary,
};
pub use allowance::{
    AllowanceShape, DayLimit, NOT_ON_PASS, PassAllowance, PassType, is_available_on_pass,
    parse_day_limit, resort_allowance, usage_percent,
};
pub use catalog::{Catalog, CatalogError, CatalogIssue, DayBankIndex};
pub use config::MapConfig;
pub use filter::{DayBankFilter, Filters, PassTierFilter, apply_filters, matches_filters};
pub use geo::{LatLng, PixelPoint, TILE_SIZE, Viewport, lng_lat_to_pixel};
pub use regions::{COLOR_GROUPS, DAY_BANK_GROUPS, INDIVIDUAL_GROUP, MACRO_REGIONS, color_for};
pub use resort::Resort;
pub use trip::{MAX_ENTRY_DAYS, Trip, TripEntry, clamp_days};

/// Trait for abstracting catalog loading.
/// Platform-specific implementations should provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the resort catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load configuration data for a named concern
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Loaded catalog plus map settings, shared by every front-end.
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Catalog,
    map_config: MapConfig,
}

impl Planner {
    #[must_use]
    pub const fn new(catalog: Catalog, map_config: MapConfig) -> Self {
        Self {
            catalog,
            map_config,
        }
    }

    /// Load the catalog and map configuration through `loader`.
    ///
    /// Catalog issues found by the audit are logged but do not fail loading.
    ///
    /// # Errors
    ///
    /// Returns an error if either the catalog or the `map` config cannot be loaded.
    pub fn load<L>(loader: &L) -> anyhow::Result<Self>
    where
        L: CatalogLoader,
    {
        let catalog = loader.load_catalog()?;
        let map_config: MapConfig = loader.load_config("map")?;
        let issues = catalog.audit();
        if !issues.is_empty() {
            log::warn!("catalog loaded with {} issue(s)", issues.len());
        }
        log::debug!("catalog loaded with {} resorts", catalog.len());
        Ok(Self::new(catalog, map_config))
    }

    #[must_use]
    pub fn with_map_config(self, map_config: MapConfig) -> Self {
        Self { map_config, ..self }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn map_config(&self) -> &MapConfig {
        &self.map_config
    }

    #[must_use]
    pub fn summarize(&self, trip: &Trip, pass: PassType) -> TripSummary {
        compute_trip_summary(trip, pass, &self.catalog)
    }

    #[must_use]
    pub fn filtered(&self, filters: &Filters) -> Vec<&Resort> {
        apply_filters(&self.catalog, filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;
    use std::convert::Infallible;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = Infallible;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Ok(Catalog::from_resorts(vec![
                resort::fixtures::resort("taos", "Taos", "7", "5"),
                resort::fixtures::banked("a", "A", "X", "7 (shared)", "5 (shared)"),
                resort::fixtures::banked("b", "B", "X", "7 (shared)", "5 (shared)"),
            ])
            .unwrap())
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            Ok(serde_json::from_str("{}").unwrap())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("offline")]
    struct Offline;

    struct FailingLoader;

    impl CatalogLoader for FailingLoader {
        type Error = Offline;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Err(Offline)
        }

        fn load_config<T>(&self, _config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            Err(Offline)
        }
    }

    #[test]
    fn planner_loads_and_summarizes() {
        let planner = Planner::load(&FixtureLoader).unwrap();
        assert_eq!(planner.catalog().len(), 3);
        assert_eq!(planner.map_config(), &MapConfig::default());

        let trip = Trip::new().with_days("a", 3).with_days("taos", 2);
        let summary = planner.summarize(&trip, PassType::Base);
        assert_eq!(summary.total_days, 5);
        assert!(!summary.has_any_exceeded);

        let filters = Filters::default().toggle_day_bank(DayBankFilter::Group("X".into()));
        assert_eq!(planner.filtered(&filters).len(), 2);
    }

    #[test]
    fn planner_propagates_loader_errors() {
        let err = Planner::load(&FailingLoader).unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
