//! Providers command handlers.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use modelboard_core::config::Config;
use modelboard_core::directory::{ProviderSummary, provider_summaries};
use modelboard_core::i18n::{Locale, t, t_found, t_with};
use serde_json::json;

use super::load_catalog;

pub async fn list(
    config: &Config,
    snapshot: Option<&Path>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(config, snapshot).await?;
    let summaries = provider_summaries(
        &catalog.models,
        &catalog.providers,
        search.unwrap_or_default().trim(),
    );

    if json {
        let rows: Vec<_> = summaries
            .iter()
            .map(|summary| {
                json!({
                    "provider": summary.provider,
                    "model_count": summary.model_count,
                    "sample_models": summary.samples.iter().map(|m| &m.id).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("serialize providers")?
        );
        return Ok(());
    }

    let locale = config.locale;
    if summaries.is_empty() {
        println!("{}", t("providers.noResults", locale));
    } else {
        println!("{}", providers_table(&summaries, locale));
    }
    println!("{}", t_found("providers", summaries.len(), locale));
    Ok(())
}

fn providers_table(summaries: &[ProviderSummary<'_>], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        t("models.columns.provider", locale),
        t("providers.slug", locale),
        t("providers.models", locale),
        t("providers.sampleModels", locale),
    ]);

    for summary in summaries {
        table.add_row(vec![
            summary.provider.name.clone(),
            summary.provider.slug.clone(),
            summary.model_count.to_string(),
            sample_cell(summary, locale),
        ]);
    }
    table
}

fn sample_cell(summary: &ProviderSummary<'_>, locale: Locale) -> String {
    let mut lines: Vec<String> = summary
        .samples
        .iter()
        .map(|model| model.display_name().to_string())
        .collect();
    let remaining = summary.remaining();
    if remaining > 0 {
        lines.push(t_with(
            "providers.moreModels",
            locale,
            &[("count", &remaining.to_string())],
        ));
    }
    lines.join("\n")
}
