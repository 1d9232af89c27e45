//! Resolve command - turn text into a value for a field type.

use std::sync::Arc;

use clap::Args;
use tracing::{debug, info};

use ocrfmt_core::catalog::{FormatCatalog, FormatSelector};
use ocrfmt_core::format::FormatCategory;
use ocrfmt_core::models::value::FieldType;
use ocrfmt_core::resolve::{OcrTextBuffer, OcrTextSource, ValueResolver};

use super::load_config;

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Recognized text
    #[arg(required = true)]
    text: String,

    /// Destination field type (text, number, percent, currency, amount, date, time, date_time, timestamp)
    #[arg(short, long, default_value = "text")]
    field: FieldType,

    /// Resolve only the first occurrence of this part of the text
    #[arg(short, long)]
    select: Option<String>,

    /// Pin a category to a format index from `ocrfmt formats` (0 = automatic)
    #[arg(short, long, value_name = "CATEGORY=INDEX", value_parser = parse_pin)]
    pin: Vec<(FormatCategory, usize)>,

    /// Start from this locale's formats instead of automatic
    #[arg(short, long)]
    locale: Option<String>,

    /// Also list every failed parse attempt
    #[arg(long)]
    failures: bool,
}

fn parse_pin(value: &str) -> Result<(FormatCategory, usize), String> {
    let (category, index) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=INDEX, got {value:?}"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid format index {index:?}"))?;
    Ok((category.trim().parse()?, index))
}

pub fn run(args: ResolveArgs, config: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config)?;

    if let Some(locale) = args.locale {
        config.formats.locale = locale;
        config.formats.automatic_format_initially_selected = false;
        config.formats.locale()?;
    }

    let catalog = Arc::new(FormatCatalog::from_config(&config.formats));
    let mut selector = FormatSelector::new(catalog.clone(), &config.formats);
    for (category, index) in args.pin {
        selector.select_index(category, index)?;
        debug!("Pinned {} to {}", category, selector.get_active(category));
    }

    let mut buffer = OcrTextBuffer::new(args.text);
    if let Some(part) = args.select.as_deref() {
        if !buffer.select_match(part) {
            anyhow::bail!("{:?} does not occur in the text", part);
        }
    }

    let input = buffer.input_text();
    let resolver = ValueResolver::new(catalog);
    let resolution = resolver.resolve_detailed(&input, &selector.snapshot(), &args.field.categories());

    info!(
        "Resolved {:?} for a {} field after {} failed attempts",
        input,
        args.field,
        resolution.failures.len()
    );

    let mut output = serde_json::json!({
        "input": input,
        "field": args.field,
        "value": resolution.value,
        "format": resolution.format.as_ref().map(|f| serde_json::json!({
            "category": f.category(),
            "rendered": f.rendered(),
            "pattern": f.rule().pattern(),
            "representative": f.representative(),
        })),
    });

    if args.failures {
        let failures: Vec<String> = resolution.failures.iter().map(ToString::to_string).collect();
        output["failures"] = serde_json::json!(failures);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
