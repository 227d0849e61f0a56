use ikonmap_core::{Catalog, CatalogError, CatalogLoader};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../../ikonmap-web/static/data/resorts.json");
const EMBEDDED_MAP_CONFIG: &str = include_str!("../../ikonmap-web/static/data/map.json");

#[derive(Debug, Error)]
pub enum TesterDataError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown config `{0}`")]
    UnknownConfig(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Loads the catalog from a file on disk, or the copy bundled with the web app.
#[derive(Debug, Clone, Default)]
pub struct FileCatalogLoader {
    catalog_path: Option<PathBuf>,
}

impl FileCatalogLoader {
    #[must_use]
    pub fn new(catalog_path: Option<PathBuf>) -> Self {
        Self { catalog_path }
    }

    #[must_use]
    pub fn source_label(&self) -> String {
        self.catalog_path
            .as_deref()
            .map_or_else(|| "embedded".to_string(), |p| p.display().to_string())
    }

    fn read(path: &Path) -> Result<String, TesterDataError> {
        fs::read_to_string(path).map_err(|source| TesterDataError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl CatalogLoader for FileCatalogLoader {
    type Error = TesterDataError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        let json = match &self.catalog_path {
            Some(path) => Self::read(path)?,
            None => EMBEDDED_CATALOG.to_string(),
        };
        Ok(Catalog::from_json(&json)?)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned,
    {
        match config_name {
            "map" => Ok(serde_json::from_str(EMBEDDED_MAP_CONFIG)?),
            other => Err(TesterDataError::UnknownConfig(other.to_string())),
        }
    }
}
