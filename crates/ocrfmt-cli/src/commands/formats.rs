//! Formats command - list the distinct formats of the catalog.

use clap::Args;
use console::style;

use ocrfmt_core::catalog::FormatCatalog;
use ocrfmt_core::format::FormatCategory;

use super::load_config;

/// Arguments for the formats command.
#[derive(Args)]
pub struct FormatsArgs {
    /// Only list this category (number, percent, currency, date, time, date_time)
    #[arg(long)]
    category: Option<FormatCategory>,

    /// Show every locale sharing a format
    #[arg(long)]
    locales: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: FormatsArgs, config: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let catalog = FormatCatalog::from_config(&config.formats);

    let categories: Vec<FormatCategory> = match args.category {
        Some(category) => vec![category],
        None => FormatCategory::ALL.to_vec(),
    };

    if args.json {
        let listing: serde_json::Map<String, serde_json::Value> = categories
            .iter()
            .map(|&category| {
                let formats: Vec<_> = catalog
                    .formats(category)
                    .iter()
                    .enumerate()
                    .map(|(i, format)| {
                        serde_json::json!({
                            "index": i + 1,
                            "rendered": format.rendered(),
                            "variant": format.variant().to_string(),
                            "pattern": format.rule().pattern(),
                            "representative": format.representative(),
                            "locales": format.locales(),
                        })
                    })
                    .collect();
                (category.to_string(), serde_json::Value::Array(formats))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for category in categories {
        let formats = catalog.formats(category);
        println!(
            "{} ({} formats)",
            style(category.to_string().to_uppercase()).bold(),
            formats.len()
        );
        println!("  {:>4}  {}", style("[0]").dim(), "Automatic");

        for (i, format) in formats.iter().enumerate() {
            println!(
                "  {:>4}  {}  {}",
                style(format!("[{}]", i + 1)).dim(),
                format.rendered(),
                style(format!("{} {}", format.representative(), format.variant())).cyan()
            );
            if args.locales {
                let tags: Vec<String> = format.locales().iter().map(ToString::to_string).collect();
                println!("        {}", style(tags.join(", ")).dim());
            }
        }
        println!();
    }

    Ok(())
}
