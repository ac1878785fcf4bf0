use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::fields::{FieldList, is_truthy, render_scalar, validate_entry_fields};
use crate::model::{
    ENTRY_SOURCE, TAXONOMY_FACET_ID, TAXONOMY_FACET_LABEL, TranslatedEntry, TranslatedFacet,
    TranslatedFacetValue, TranslatedFields, TranslatedResult,
};
use crate::taxonomy::TaxonomyLookup;

/// Key of the search document inside the response envelope.
pub const PAYLOAD_KEY: &str = "obj";

// Domain-fixed placeholders, not derived from the hit. Candidates for
// parameterization once other Ensembl Genomes divisions are served. The
// gene index carries no transcripts, so `transcript` is always empty.
const GENOMIC_UNIT: &str = "plants";
const FEATURE_TYPE: &str = "Gene";

/// Turns SOLR gene search responses into aggregator result envelopes.
#[derive(Debug, Clone)]
pub struct ResponseTranslator<L: TaxonomyLookup> {
    taxonomy: L,
    fields: FieldList,
}

impl<L: TaxonomyLookup> ResponseTranslator<L> {
    pub fn new(taxonomy: L, fields: FieldList) -> Self {
        Self { taxonomy, fields }
    }

    pub fn translate(&self, response: &Value) -> Result<TranslatedResult, TranslateError> {
        let envelope = response.as_object().ok_or_else(|| {
            TranslateError::InvalidInput(format!(
                "Response is not an object: {}",
                render_scalar(response)
            ))
        })?;

        let doc = match envelope.get(PAYLOAD_KEY) {
            Some(doc) if doc.is_object() => doc,
            other => {
                let shown = other.map(render_scalar).unwrap_or_else(|| "undefined".to_string());
                return Err(TranslateError::InvalidInput(format!(
                    "Doc is not an object: {shown}"
                )));
            }
        };

        let result = TranslatedResult {
            hit_count: extract_hit_count(doc),
            facets: extract_facets(doc, &self.taxonomy)?,
            entries: extract_entries(doc, &self.taxonomy, &self.fields)?,
        };

        tracing::debug!(
            hit_count = ?result.hit_count,
            facet_values = result.facets.first().map_or(0, |facet| facet.total),
            entries = result.entries.len(),
            "translated search response"
        );
        Ok(result)
    }
}

pub fn extract_hit_count(doc: &Value) -> Option<u64> {
    let found = doc.get("response").and_then(|v| v.get("numFound"))?;
    let count = found.as_u64();
    if count.is_none() && !found.is_null() {
        tracing::warn!(num_found = %found, "numFound is not a non-negative integer, ignoring");
    }
    count
}

pub fn extract_facets(
    doc: &Value,
    taxonomy: &impl TaxonomyLookup,
) -> Result<Vec<TranslatedFacet>, TranslateError> {
    let facet_values = decode_facet_pairs(system_name_facet(doc)?)?
        .into_iter()
        .map(|(key, count)| {
            let resolved = taxonomy.resolve(&key);
            TranslatedFacetValue {
                label: resolved.label,
                value: resolved.value,
                count,
            }
        })
        .collect::<Vec<_>>();

    if facet_values.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![TranslatedFacet {
        id: TAXONOMY_FACET_ID.to_string(),
        label: TAXONOMY_FACET_LABEL.to_string(),
        total: facet_values.len(),
        facet_values,
    }])
}

fn system_name_facet(doc: &Value) -> Result<&[Value], TranslateError> {
    let facet = doc
        .get("facet_counts")
        .and_then(|v| v.get("facet_fields"))
        .and_then(|v| v.get("system_name"));
    match facet {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(TranslateError::MalformedFacet(format!(
            "expected a flat [key, count, ...] array, found {other}"
        ))),
    }
}

/// Splits SOLR's flattened `[key0, count0, key1, count1, ...]` list into pairs.
///
/// Duplicate keys are kept as separate pairs. A trailing key without a count
/// is rejected rather than silently dropped.
pub fn decode_facet_pairs(flat: &[Value]) -> Result<Vec<(String, u64)>, TranslateError> {
    let mut pairs = Vec::with_capacity(flat.len() / 2);
    let mut items = flat.iter();
    while let Some(key) = items.next() {
        let key = render_scalar(key);
        let Some(count) = items.next() else {
            return Err(TranslateError::MalformedFacet(format!(
                "key {key} has no paired count (odd-length array of {})",
                flat.len()
            )));
        };
        let count = count.as_u64().ok_or_else(|| {
            TranslateError::MalformedFacet(format!(
                "count for {key} is not a non-negative integer: {count}"
            ))
        })?;
        pairs.push((key, count));
    }
    Ok(pairs)
}

pub fn extract_entries(
    doc: &Value,
    taxonomy: &impl TaxonomyLookup,
    fields: &FieldList,
) -> Result<Vec<TranslatedEntry>, TranslateError> {
    let docs = match doc.get("response").and_then(|v| v.get("docs")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(TranslateError::InvalidInput(format!(
                "Docs is not an array: {other}"
            )));
        }
    };

    docs.iter()
        .enumerate()
        .map(|(index, item)| {
            let entry = item.as_object().ok_or_else(|| {
                TranslateError::InvalidInput(format!("Doc {index} is not an object: {item}"))
            })?;
            translate_entry(entry, taxonomy, fields)
        })
        .collect()
}

fn translate_entry(
    entry: &Map<String, Value>,
    taxonomy: &impl TaxonomyLookup,
    fields: &FieldList,
) -> Result<TranslatedEntry, TranslateError> {
    validate_entry_fields(entry, fields)?;

    Ok(TranslatedEntry {
        id: text(entry, "id").unwrap_or_default(),
        source: ENTRY_SOURCE.to_string(),
        fields: project_entry_fields(entry, taxonomy),
    })
}

/// Builds the multi-valued field record for an already validated hit.
///
/// Fields outside a narrowed field list project to empty lists; the
/// synthesized `name` and `location` render them as empty text.
pub fn project_entry_fields(
    entry: &Map<String, Value>,
    taxonomy: &impl TaxonomyLookup,
) -> TranslatedFields {
    let id = text(entry, "id");
    let system_name = text(entry, "system_name");
    let part = |field: &str| text(entry, field).unwrap_or_default();

    let name = format!("{} [{}]", part("name"), part("id"));
    let location = format!("{}:{}-{}", part("region"), part("start"), part("end"));
    let species = system_name
        .as_deref()
        .map(|code| taxonomy.species_name(code));

    TranslatedFields {
        id: id.into_iter().collect(),
        name: vec![name],
        description: text(entry, "description").into_iter().collect(),
        location: vec![location],
        species: species.into_iter().collect(),
        system_name: system_name.into_iter().collect(),
        database: text(entry, "db_type").into_iter().collect(),
        genetree: entry
            .get("genetree")
            .filter(|value| is_truthy(value))
            .map(render_scalar)
            .into_iter()
            .collect(),
        gene_synonym: synonyms(entry),
        transcript: Vec::new(),
        genomic_unit: vec![GENOMIC_UNIT.to_string()],
        featuretype: vec![FEATURE_TYPE.to_string()],
    }
}

fn text(entry: &Map<String, Value>, field: &str) -> Option<String> {
    entry
        .get(field)
        .filter(|value| !value.is_null())
        .map(render_scalar)
}

fn synonyms(entry: &Map<String, Value>) -> Vec<String> {
    match entry.get("synonyms") {
        Some(Value::Array(items)) => items.iter().map(render_scalar).collect(),
        Some(value) if is_truthy(value) => vec![render_scalar(value)],
        _ => Vec::new(),
    }
}
