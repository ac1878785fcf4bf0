use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Doc {id} missing field {field}")]
    #[diagnostic(help("every field in the field list except genetree and synonyms is required"))]
    MissingField { id: String, field: String },

    #[error("invalid field list: {0}")]
    InvalidFieldList(String),

    #[error("malformed system_name facet: {0}")]
    MalformedFacet(String),

    #[error("missing config file gst.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to read taxonomy table at {0}")]
    TaxonomyRead(Utf8PathBuf),

    #[error("failed to parse taxonomy table: {0}")]
    TaxonomyParse(String),

    #[error("failed to parse search response: {0}")]
    ResponseParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
