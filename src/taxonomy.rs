use std::collections::HashMap;
use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub taxon_id: Option<u64>,
}

impl TaxonomyEntry {
    pub fn new(name: impl Into<String>, taxon_id: u64) -> Self {
        Self {
            name: Some(name.into()),
            taxon_id: Some(taxon_id),
        }
    }
}

/// Label and facet value a system name resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTaxon {
    pub label: String,
    pub value: String,
}

/// Read-only mapping from a system name code to its taxonomy record.
pub trait TaxonomyLookup: Send + Sync {
    fn lookup(&self, code: &str) -> Option<&TaxonomyEntry>;

    /// Name and stringified taxon id for `code`, each falling back to the code itself.
    fn resolve(&self, code: &str) -> ResolvedTaxon {
        let entry = self.lookup(code);
        let label = entry
            .and_then(|taxon| taxon.name.clone())
            .unwrap_or_else(|| code.to_string());
        let value = entry
            .and_then(|taxon| taxon.taxon_id)
            .map(|id| id.to_string())
            .unwrap_or_else(|| code.to_string());
        ResolvedTaxon { label, value }
    }

    fn species_name(&self, code: &str) -> String {
        self.lookup(code)
            .and_then(|taxon| taxon.name.clone())
            .unwrap_or_else(|| code.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyLut {
    entries: HashMap<String, TaxonomyEntry>,
}

impl TaxonomyLut {
    pub fn new(entries: HashMap<String, TaxonomyEntry>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Utf8Path) -> Result<Self, TranslateError> {
        let content = fs::read_to_string(path)
            .map_err(|_| TranslateError::TaxonomyRead(path.to_path_buf()))?;
        let lut = Self::from_json(&content)?;
        tracing::debug!(path = %path, codes = lut.len(), "loaded taxonomy table");
        Ok(lut)
    }

    pub fn from_json(content: &str) -> Result<Self, TranslateError> {
        serde_json::from_str(content).map_err(|err| TranslateError::TaxonomyParse(err.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TaxonomyEntry)> for TaxonomyLut {
    fn from_iter<I: IntoIterator<Item = (String, TaxonomyEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl TaxonomyLookup for TaxonomyLut {
    fn lookup(&self, code: &str) -> Option<&TaxonomyEntry> {
        self.entries.get(code)
    }
}

impl TaxonomyLookup for HashMap<String, TaxonomyEntry> {
    fn lookup(&self, code: &str) -> Option<&TaxonomyEntry> {
        self.get(code)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn lut() -> TaxonomyLut {
        [
            (
                "oryza_sativa".to_string(),
                TaxonomyEntry::new("Oryza sativa Japonica", 39947),
            ),
            (
                "zea_mays".to_string(),
                TaxonomyEntry {
                    name: Some("Zea mays".to_string()),
                    taxon_id: None,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolve_known_code() {
        let resolved = lut().resolve("oryza_sativa");
        assert_eq!(resolved.label, "Oryza sativa Japonica");
        assert_eq!(resolved.value, "39947");
    }

    #[test]
    fn resolve_unknown_code_uses_code() {
        let resolved = lut().resolve("vitis_vinifera");
        assert_eq!(resolved.label, "vitis_vinifera");
        assert_eq!(resolved.value, "vitis_vinifera");
        assert_eq!(lut().species_name("vitis_vinifera"), "vitis_vinifera");
    }

    #[test]
    fn resolve_partial_entry_falls_back_per_attribute() {
        let resolved = lut().resolve("zea_mays");
        assert_eq!(resolved.label, "Zea mays");
        assert_eq!(resolved.value, "zea_mays");
    }

    #[test]
    fn parse_table_ignores_extra_attributes() {
        let lut = TaxonomyLut::from_json(
            r#"{"sp1": {"name": "Species One", "taxon_id": 100, "assembly": "v1"}}"#,
        )
        .unwrap();
        assert_eq!(lut.len(), 1);
        assert_eq!(lut.lookup("sp1"), Some(&TaxonomyEntry::new("Species One", 100)));
    }

    #[test]
    fn parse_table_rejects_non_object() {
        let err = TaxonomyLut::from_json("[1, 2]").unwrap_err();
        assert_matches!(err, TranslateError::TaxonomyParse(_));
    }
}
