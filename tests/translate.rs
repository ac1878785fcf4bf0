use std::collections::HashMap;
use std::fs;

use assert_matches::assert_matches;
use serde_json::{Value, json};

use gene_search_translator::error::TranslateError;
use gene_search_translator::fields::FieldList;
use gene_search_translator::taxonomy::{TaxonomyEntry, TaxonomyLut};
use gene_search_translator::translate::ResponseTranslator;

fn fixture_response() -> Value {
    let raw = fs::read_to_string("tests/fixtures/gene_search_response.json").unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn fixture_taxonomy() -> TaxonomyLut {
    let raw = fs::read_to_string("tests/fixtures/taxonomy.json").unwrap();
    TaxonomyLut::from_json(&raw).unwrap()
}

fn sample_lut() -> HashMap<String, TaxonomyEntry> {
    HashMap::from([("sp1".to_string(), TaxonomyEntry::new("Species One", 100))])
}

fn sample_response() -> Value {
    json!({
        "obj": {
            "response": {
                "numFound": 2,
                "docs": [
                    {
                        "id": "G1", "name": "geneA", "description": "d", "region": "1",
                        "start": 10, "end": 20, "db_type": "core", "system_name": "sp1"
                    },
                    {
                        "id": "G2", "name": "geneB", "description": "e", "region": "Pt",
                        "start": 5, "end": 9, "db_type": "core", "system_name": "sp2",
                        "genetree": "GT1", "synonyms": ["b1", "b2"]
                    }
                ]
            },
            "facet_counts": { "facet_fields": { "system_name": ["sp1", 3, "sp2", 5] } }
        }
    })
}

#[test]
fn translate_worked_example() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let result = translator.translate(&sample_response()).unwrap();

    assert_eq!(result.hit_count, Some(2));

    assert_eq!(result.facets.len(), 1);
    let facet = &result.facets[0];
    assert_eq!(facet.id, "TAXONOMY");
    assert_eq!(facet.label, "Organisms");
    assert_eq!(facet.total, 2);
    assert_eq!(facet.facet_values[0].label, "Species One");
    assert_eq!(facet.facet_values[0].value, "100");
    assert_eq!(facet.facet_values[0].count, 3);
    assert_eq!(facet.facet_values[1].label, "sp2");
    assert_eq!(facet.facet_values[1].value, "sp2");
    assert_eq!(facet.facet_values[1].count, 5);

    let g1 = &result.entries[0];
    assert_eq!(g1.id, "G1");
    assert_eq!(g1.source, "ensemblGenomes_gene");
    assert_eq!(g1.fields.species, ["Species One"]);
    assert_eq!(g1.fields.location, ["1:10-20"]);
    assert_eq!(g1.fields.name, ["geneA [G1]"]);
    assert_eq!(g1.fields.database, ["core"]);
    assert!(g1.fields.genetree.is_empty());
    assert!(g1.fields.gene_synonym.is_empty());

    let g2 = &result.entries[1];
    assert_eq!(g2.fields.species, ["sp2"]);
    assert_eq!(g2.fields.genetree, ["GT1"]);
    assert_eq!(g2.fields.gene_synonym, ["b1", "b2"]);
}

#[test]
fn translate_serializes_aggregator_shape() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let result = translator.translate(&sample_response()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    let keys = value.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys.len(), 3);
    assert_eq!(value["hitCount"], json!(2));
    assert_eq!(value["facets"][0]["facetValues"][0]["value"], json!("100"));
    assert_eq!(
        value["entries"][0]["fields"],
        json!({
            "id": ["G1"],
            "name": ["geneA [G1]"],
            "description": ["d"],
            "location": ["1:10-20"],
            "species": ["Species One"],
            "system_name": ["sp1"],
            "database": ["core"],
            "genetree": [],
            "gene_synonym": [],
            "transcript": [],
            "genomic_unit": ["plants"],
            "featuretype": ["Gene"]
        })
    );
}

#[test]
fn translate_fixture_response() {
    let translator = ResponseTranslator::new(fixture_taxonomy(), FieldList::default());
    let result = translator.translate(&fixture_response()).unwrap();

    assert_eq!(result.hit_count, Some(57));
    let facet = &result.facets[0];
    assert_eq!(facet.total, 3);
    assert_eq!(
        facet
            .facet_values
            .iter()
            .map(|v| (v.label.as_str(), v.value.as_str(), v.count))
            .collect::<Vec<_>>(),
        vec![
            ("Arabidopsis thaliana", "3702", 21),
            ("Brachypodium distachyon", "15368", 19),
            ("zea_mays_b73", "zea_mays_b73", 17),
        ]
    );

    assert_eq!(
        result.entries.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
        ["AT3G52430", "BRADI_2g54540v3", "Zm00001d012345"]
    );
    let pad4 = &result.entries[0].fields;
    assert_eq!(pad4.location, ["3:19432345-19434975"]);
    assert_eq!(pad4.name, ["PAD4 [AT3G52430]"]);
    assert_eq!(pad4.gene_synonym, ["PHYTOALEXIN DEFICIENT 4", "T25B15.70"]);
    assert_eq!(result.entries[2].fields.species, ["zea_mays_b73"]);
    assert_eq!(result.entries[2].fields.database, ["otherfeatures"]);
}

#[test]
fn translate_is_idempotent() {
    let translator = ResponseTranslator::new(fixture_taxonomy(), FieldList::default());
    let response = fixture_response();
    let first = translator.translate(&response).unwrap();
    let second = translator.translate(&response).unwrap();
    assert_eq!(first, second);
}

#[test]
fn translate_soft_missing_parts() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let result = translator.translate(&json!({ "obj": {} })).unwrap();
    assert_eq!(result.hit_count, None);
    assert!(result.facets.is_empty());
    assert!(result.entries.is_empty());

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value, json!({ "hitCount": null, "facets": [], "entries": [] }));
}

#[test]
fn translate_null_docs_and_facets() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let response = json!({
        "obj": {
            "response": { "docs": null, "numFound": 0 },
            "facet_counts": { "facet_fields": { "system_name": null } }
        }
    });
    let result = translator.translate(&response).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value, json!({ "hitCount": 0, "facets": [], "entries": [] }));
}

#[test]
fn translate_rejects_non_object_response() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let err = translator.translate(&json!("oops")).unwrap_err();
    assert_matches!(err, TranslateError::InvalidInput(ref msg) if msg == "Response is not an object: oops");
}

#[test]
fn translate_rejects_string_payload() {
    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let err = translator
        .translate(&json!({ "obj": "<html>Bad Gateway</html>" }))
        .unwrap_err();
    assert_matches!(err, TranslateError::InvalidInput(ref msg) if msg.starts_with("Doc is not an object"));
}

#[test]
fn translate_aborts_on_missing_required_field() {
    let mut response = sample_response();
    response["obj"]["response"]["docs"][1]
        .as_object_mut()
        .unwrap()
        .remove("db_type");

    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let err = translator.translate(&response).unwrap_err();
    assert_matches!(
        err,
        TranslateError::MissingField { ref id, ref field } if id == "G2" && field == "db_type"
    );
    assert_eq!(err.to_string(), "Doc G2 missing field db_type");
}

#[test]
fn translate_honours_narrowed_field_list() {
    let mut response = sample_response();
    response["obj"]["response"]["docs"][0]["description"] = json!("");

    let fields: FieldList = "id,name,system_name".parse().unwrap();
    let translator = ResponseTranslator::new(sample_lut(), fields);
    let result = translator.translate(&response).unwrap();
    assert_eq!(result.entries[0].fields.description, [""]);

    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let err = translator.translate(&response).unwrap_err();
    assert_matches!(err, TranslateError::MissingField { ref field, .. } if field == "description");
}

#[test]
fn translate_rejects_odd_length_facet() {
    let mut response = sample_response();
    response["obj"]["facet_counts"]["facet_fields"]["system_name"] = json!(["sp1", 3, "sp2"]);

    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let err = translator.translate(&response).unwrap_err();
    assert_matches!(err, TranslateError::MalformedFacet(_));
}

#[test]
fn translate_passes_duplicate_facet_keys_through() {
    let mut response = sample_response();
    response["obj"]["facet_counts"]["facet_fields"]["system_name"] =
        json!(["sp1", 3, "sp1", 4]);

    let translator = ResponseTranslator::new(sample_lut(), FieldList::default());
    let result = translator.translate(&response).unwrap();
    assert_eq!(result.facets[0].total, 2);
    assert_eq!(result.facets[0].facet_values[1].count, 4);
}

#[test]
fn translator_shared_across_threads() {
    let translator = ResponseTranslator::new(fixture_taxonomy(), FieldList::default());
    let response = fixture_response();
    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| translator.translate(&response).unwrap()))
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap().hit_count, Some(57));
        }
    });
}
