//! Full-screen model browser.

pub mod common;
pub mod effects;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::{Result, bail};
use modelboard_core::{Catalog, FilterState, Locale, ModelBrowser};
pub use runtime::TuiRuntime;

use crate::state::AppState;

/// Runs the interactive browser over `catalog` until the user quits.
pub fn run_browser(
    catalog: Catalog,
    filters: FilterState,
    locale: Locale,
    page_size: usize,
) -> Result<()> {
    if !stdout().is_terminal() {
        bail!(
            "The model browser requires a terminal.\n\
             Use `modelboard models list` for non-interactive output."
        );
    }

    let browser =
        ModelBrowser::new(catalog.models, catalog.providers, page_size).with_filters(filters);
    tracing::info!(
        models = browser.models().len(),
        providers = browser.providers().len(),
        "Starting browser"
    );

    let mut runtime = TuiRuntime::new(AppState::new(browser, locale))?;
    runtime.run()
}
