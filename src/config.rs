use std::collections::HashMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::fields::FieldList;
use crate::taxonomy::{TaxonomyEntry, TaxonomyLut};

pub const DEFAULT_CONFIG_FILE: &str = "gst.json";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub fields: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<TaxonomySource>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TaxonomySource {
    Path(Utf8PathBuf),
    Inline(HashMap<String, TaxonomyEntry>),
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub field_list: FieldList,
    pub taxonomy: TaxonomyLut,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            field_list: FieldList::default(),
            taxonomy: TaxonomyLut::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolves an explicit `path`, or `gst.json` inside `search_dir`.
    pub fn resolve_in(
        search_dir: &Utf8Path,
        path: Option<&str>,
    ) -> Result<ResolvedConfig, TranslateError> {
        let config_path = match path {
            Some(path) => Utf8PathBuf::from(path),
            None => resolve_relative(search_dir, Utf8Path::new(DEFAULT_CONFIG_FILE)),
        };

        if path.is_none() && !config_path.exists() {
            return Err(TranslateError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| TranslateError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| TranslateError::ConfigParse(err.to_string()))?;

        let base_dir = config_path
            .parent()
            .map(Utf8Path::to_path_buf)
            .unwrap_or_default();
        tracing::debug!(path = %config_path, "loaded config");
        Self::resolve_config(config, &base_dir)
    }

    /// Like [`ConfigLoader::resolve_in`] but falls back to defaults when no
    /// `gst.json` exists and no path was given.
    pub fn resolve_or_default_in(
        search_dir: &Utf8Path,
        path: Option<&str>,
    ) -> Result<ResolvedConfig, TranslateError> {
        match Self::resolve_in(search_dir, path) {
            Err(TranslateError::MissingConfig) => Ok(ResolvedConfig::default()),
            other => other,
        }
    }

    pub fn resolve_config(
        config: Config,
        base_dir: &Utf8Path,
    ) -> Result<ResolvedConfig, TranslateError> {
        let schema_version = config.schema_version.unwrap_or(SCHEMA_VERSION);
        if schema_version != SCHEMA_VERSION {
            return Err(TranslateError::ConfigParse(format!(
                "unsupported schema_version {schema_version}"
            )));
        }

        let field_list = match config.fields {
            Some(fields) => fields.parse()?,
            None => FieldList::default(),
        };

        let taxonomy = match config.taxonomy {
            Some(TaxonomySource::Path(path)) => {
                TaxonomyLut::load(&resolve_relative(base_dir, &path))?
            }
            Some(TaxonomySource::Inline(entries)) => TaxonomyLut::new(entries),
            None => TaxonomyLut::default(),
        };

        Ok(ResolvedConfig {
            field_list,
            taxonomy,
        })
    }
}

fn resolve_relative(base_dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() || base_dir.as_str().is_empty() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
