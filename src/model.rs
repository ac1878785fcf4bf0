use serde::Serialize;

pub const ENTRY_SOURCE: &str = "ensemblGenomes_gene";
pub const TAXONOMY_FACET_ID: &str = "TAXONOMY";
pub const TAXONOMY_FACET_LABEL: &str = "Organisms";

/// Envelope handed to the aggregator. `hitCount` serializes as `null` when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedResult {
    pub hit_count: Option<u64>,
    pub facets: Vec<TranslatedFacet>,
    pub entries: Vec<TranslatedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedFacet {
    pub id: String,
    pub label: String,
    pub total: usize,
    pub facet_values: Vec<TranslatedFacetValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedFacetValue {
    pub label: String,
    pub value: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedEntry {
    pub id: String,
    pub source: String,
    pub fields: TranslatedFields,
}

/// Multi-valued field record; every field is a list even when it holds one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedFields {
    pub id: Vec<String>,
    pub name: Vec<String>,
    pub description: Vec<String>,
    pub location: Vec<String>,
    pub species: Vec<String>,
    pub system_name: Vec<String>,
    pub database: Vec<String>,
    pub genetree: Vec<String>,
    pub gene_synonym: Vec<String>,
    pub transcript: Vec<String>,
    pub genomic_unit: Vec<String>,
    pub featuretype: Vec<String>,
}
