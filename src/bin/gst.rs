use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use gene_search_translator::cli::{ConfigOverrides, exit_code, wrap_document};
use gene_search_translator::error::TranslateError;
use gene_search_translator::output::{FieldsReport, JsonOutput, OutputMode};
use gene_search_translator::translate::ResponseTranslator;

#[derive(Parser)]
#[command(name = "gst")]
#[command(about = "Translate Ensembl Genomes gene search responses into aggregator results")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Translate a search response envelope")]
    Translate(TranslateArgs),
    #[command(about = "Show the required and optional hit fields")]
    Fields(ConfigArgs),
}

#[derive(Args, Clone)]
struct ConfigArgs {
    #[arg(long)]
    config: Option<String>,

    #[arg(long, help = "Comma-separated field list, overrides the config file")]
    fields: Option<String>,
}

#[derive(Args, Clone)]
struct TranslateArgs {
    #[arg(help = "Response JSON file, or - for stdin")]
    input: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, help = "Taxonomy table JSON, overrides the config file")]
    taxonomy: Option<Utf8PathBuf>,

    #[arg(long, help = "Input is a bare search document rather than an envelope")]
    document: bool,

    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<TranslateError>() {
            return ExitCode::from(exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Translate(args) => run_translate(args),
        Commands::Fields(args) => {
            let overrides = ConfigOverrides {
                config: args.config,
                fields: args.fields,
                taxonomy: None,
            };
            let resolved = overrides.resolve_in(Utf8Path::new(""))?;
            JsonOutput::print_fields(&FieldsReport::new(&resolved.field_list)).into_diagnostic()
        }
    }
}

fn run_translate(args: TranslateArgs) -> miette::Result<()> {
    let overrides = ConfigOverrides {
        config: args.config.config,
        fields: args.config.fields,
        taxonomy: args.taxonomy,
    };
    let resolved = overrides.resolve_in(Utf8Path::new(""))?;

    let raw = read_input(args.input.as_deref())?;
    let mut response: Value =
        serde_json::from_str(&raw).map_err(|err| TranslateError::ResponseParse(err.to_string()))?;
    if args.document {
        response = wrap_document(response);
    }

    let translator = ResponseTranslator::new(resolved.taxonomy, resolved.field_list);
    let result = translator.translate(&response)?;

    let mode = if args.compact {
        OutputMode::Compact
    } else {
        OutputMode::Pretty
    };
    JsonOutput::print_result(&result, mode).into_diagnostic()
}

fn read_input(input: Option<&str>) -> Result<String, TranslateError> {
    match input {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| TranslateError::Filesystem(format!("read stdin: {err}")))?;
            Ok(buffer)
        }
        Some(path) => fs::read_to_string(path)
            .map_err(|err| TranslateError::Filesystem(format!("read {path}: {err}"))),
    }
}
