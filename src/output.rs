use std::io::{self, Write};

use serde::Serialize;

use crate::fields::FieldList;
use crate::model::TranslatedResult;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldsReport<'a> {
    pub required: Vec<&'a str>,
    pub optional: Vec<&'a str>,
}

impl<'a> FieldsReport<'a> {
    pub fn new(fields: &'a FieldList) -> Self {
        Self {
            required: fields.required().collect(),
            optional: fields.optional().collect(),
        }
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_result(result: &TranslatedResult, mode: OutputMode) -> io::Result<()> {
        Self::print_json(result, mode)
    }

    pub fn print_fields(report: &FieldsReport<'_>) -> io::Result<()> {
        Self::print_json(report, OutputMode::Pretty)
    }

    pub fn render<T: Serialize>(value: &T, mode: OutputMode) -> io::Result<String> {
        let json = match mode {
            OutputMode::Pretty => serde_json::to_string_pretty(value),
            OutputMode::Compact => serde_json::to_string(value),
        };
        json.map_err(io::Error::other)
    }

    fn print_json<T: Serialize>(value: &T, mode: OutputMode) -> io::Result<()> {
        let json = Self::render(value, mode)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
