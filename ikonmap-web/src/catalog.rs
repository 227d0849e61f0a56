//! Web catalog loading
//!
//! The resort catalog and map settings ship inside the wasm bundle; this module
//! exposes them through the core `CatalogLoader` trait.

use ikonmap_core::{Catalog, CatalogLoader, MapConfig, Planner};
use serde::de::DeserializeOwned;

const RESORTS_JSON: &str = include_str!("../static/data/resorts.json");
const MAP_JSON: &str = include_str!("../static/data/map.json");

/// Loader backed by the JSON embedded at compile time.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCatalogLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("Unknown config: {0}")]
    UnknownConfig(String),
    #[error("Catalog error: {0}")]
    Catalog(#[from] ikonmap_core::CatalogError),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogLoader for WebCatalogLoader {
    type Error = WebDataError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::from_json(RESORTS_JSON)?)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        let json = match config_name {
            "map" => MAP_JSON,
            _ => return Err(WebDataError::UnknownConfig(config_name.to_string())),
        };
        Ok(serde_json::from_str(json)?)
    }
}

/// Build the planner from embedded data.
///
/// A broken bundle degrades to an empty catalog and default map settings so the
/// page still renders; the failure is logged to the console.
#[must_use]
pub fn load_planner() -> Planner {
    match Planner::load(&WebCatalogLoader) {
        Ok(planner) => {
            let config = planner
                .map_config()
                .clone()
                .with_map_id_override(option_env!("FELT_MAP_ID"));
            planner.with_map_config(config)
        }
        Err(err) => {
            crate::dom::console_error(&format!("failed to load resort catalog: {err:#}"));
            Planner::new(Catalog::empty(), MapConfig::default_config())
        }
    }
}
