//! Models command handlers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::{ContentArrangement, Table};
use modelboard_core::config::Config;
use modelboard_core::details::model_details;
use modelboard_core::format::{format_context_length, format_price};
use modelboard_core::i18n::{Locale, t, t_found, t_with};
use modelboard_core::pagination::PageInfo;
use modelboard_core::providers::{resolve_from_list, resolve_static};
use modelboard_core::{FilterState, ModelBrowser};
use modelboard_types::Model;
use serde::Serialize;

use super::load_catalog;

pub struct ListOptions {
    pub filters: FilterState,
    pub page: usize,
    pub page_size: Option<usize>,
    pub json: bool,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    page: PageInfo,
    models: Vec<&'a Model>,
}

pub async fn list(config: &Config, snapshot: Option<&Path>, options: &ListOptions) -> Result<()> {
    let catalog = load_catalog(config, snapshot).await?;
    let page_size = options
        .page_size
        .map_or_else(|| config.effective_page_size(), |size| size.max(1));

    let mut browser = ModelBrowser::new(catalog.models, catalog.providers, page_size)
        .with_filters(options.filters.clone());
    if !browser.set_page(options.page) {
        tracing::debug!(requested = options.page, "Page out of range, staying on page 1");
    }

    let info = browser.page_info();
    let page = browser.page_models();

    if options.json {
        let output = ListOutput {
            page: info,
            models: page,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize models")?
        );
        return Ok(());
    }

    let locale = config.locale;
    if page.is_empty() {
        println!("{}", t("models.noResults", locale));
    } else {
        println!("{}", models_table(&page, locale));
    }
    println!("{}", page_footer(&info, locale));
    Ok(())
}

pub async fn show(config: &Config, snapshot: Option<&Path>, id: &str) -> Result<()> {
    let catalog = load_catalog(config, snapshot).await?;
    let locale = config.locale;

    let Some(model) = catalog.find_model(id) else {
        bail!("{}", t_with("models.notFound", locale, &[("id", id)]));
    };
    let listed = resolve_from_list(&model.id, &catalog.providers);

    println!("{}", model.display_name());
    println!("{}", model.id);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    for (label, value) in model_details(model, listed, locale) {
        table.add_row(vec![label, value]);
    }
    println!("{table}");

    if let Some(description) = model.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!();
        println!("{}:", t("models.details.description", locale));
        println!("{description}");
    }
    Ok(())
}

pub async fn snapshot(config: &Config, source: Option<&Path>, out_path: &Path) -> Result<()> {
    let catalog = load_catalog(config, source).await?;
    catalog
        .save(out_path)
        .with_context(|| format!("write snapshot to {}", out_path.display()))?;
    println!(
        "Saved {} models and {} providers to {}",
        catalog.models.len(),
        catalog.providers.len(),
        out_path.display()
    );
    Ok(())
}

fn models_table(models: &[&Model], locale: Locale) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header: Vec<String> = [
        "name", "id", "provider", "modality", "context", "prompt", "completion",
    ]
    .iter()
    .map(|column| t(&format!("models.columns.{column}"), locale))
    .collect();
    if locale.is_rtl() {
        header.reverse();
    }
    table.set_header(header);

    for model in models {
        let mut row = vec![
            model.display_name().to_string(),
            model.id.clone(),
            resolve_static(&model.id).to_string(),
            model.architecture.modality.clone(),
            format_context_length(model.context_length),
            format_price(&model.pricing.prompt),
            format_price(&model.pricing.completion),
        ];
        if locale.is_rtl() {
            row.reverse();
        }
        table.add_row(row);
    }
    table
}

fn page_footer(info: &PageInfo, locale: Locale) -> String {
    format!(
        "{} · {}",
        t_with(
            "models.page",
            locale,
            &[
                ("page", &info.current_page.to_string()),
                ("total", &info.total_pages.max(1).to_string()),
            ],
        ),
        t_found("models", info.total_count, locale)
    )
}
