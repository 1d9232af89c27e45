//! Locales command - list the built-in locale table.

use clap::Args;
use console::style;

use ocrfmt_core::format::{FormatCategory, FormatVariant};
use ocrfmt_core::locale::LocaleDatabase;

use super::load_config;

/// Arguments for the locales command.
#[derive(Args)]
pub struct LocalesArgs {
    /// Show how each locale renders the probe values
    #[arg(long)]
    samples: bool,
}

pub fn run(args: LocalesArgs, config: Option<&str>) -> anyhow::Result<()> {
    let database = LocaleDatabase::builtin();

    if !args.samples {
        for locale in database.locales() {
            println!("{locale}");
        }
        return Ok(());
    }

    let probe = load_config(config)?.formats.probe();
    for data in database.iter() {
        let sample = |category: FormatCategory, variant: FormatVariant| {
            data.rule(category, variant)
                .map(|rule| rule.render_probe(&probe))
                .unwrap_or_default()
        };

        println!(
            "{:<6}  {}  |  {}  |  {}",
            style(data.locale()).bold(),
            sample(FormatCategory::Number, FormatVariant::Numeric),
            sample(FormatCategory::Currency, FormatVariant::Numeric),
            sample(FormatCategory::Percent, FormatVariant::Numeric),
        );
    }

    Ok(())
}
