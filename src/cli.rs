use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use crate::config::{ConfigLoader, ResolvedConfig};
use crate::error::TranslateError;
use crate::taxonomy::TaxonomyLut;
use crate::translate::PAYLOAD_KEY;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<String>,
    pub fields: Option<String>,
    pub taxonomy: Option<Utf8PathBuf>,
}

impl ConfigOverrides {
    /// Resolves the config found from `search_dir`, then applies the overrides.
    pub fn resolve_in(&self, search_dir: &Utf8Path) -> Result<ResolvedConfig, TranslateError> {
        let resolved = ConfigLoader::resolve_or_default_in(search_dir, self.config.as_deref())?;
        self.apply(resolved)
    }

    pub fn apply(&self, mut resolved: ResolvedConfig) -> Result<ResolvedConfig, TranslateError> {
        if let Some(fields) = &self.fields {
            resolved.field_list = fields.parse()?;
        }
        if let Some(path) = &self.taxonomy {
            resolved.taxonomy = TaxonomyLut::load(path)?;
        }
        Ok(resolved)
    }
}

/// Wraps a bare search document in the envelope `translate` expects.
pub fn wrap_document(document: Value) -> Value {
    let mut envelope = Map::new();
    envelope.insert(PAYLOAD_KEY.to_string(), document);
    Value::Object(envelope)
}

pub fn exit_code(error: &TranslateError) -> u8 {
    match error {
        TranslateError::InvalidInput(_) | TranslateError::ResponseParse(_) => 2,
        TranslateError::MissingField { .. } | TranslateError::MalformedFacet(_) => 3,
        _ => 1,
    }
}
