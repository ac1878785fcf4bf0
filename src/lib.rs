pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod model;
pub mod output;
pub mod taxonomy;
pub mod translate;

pub use error::TranslateError;
pub use fields::FieldList;
pub use model::TranslatedResult;
pub use taxonomy::{TaxonomyEntry, TaxonomyLookup, TaxonomyLut};
pub use translate::ResponseTranslator;
