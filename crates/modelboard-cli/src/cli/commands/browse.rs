//! Full-screen browser command.

use std::path::Path;

use anyhow::Result;
use modelboard_core::FilterState;
use modelboard_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, snapshot: Option<&Path>, filters: FilterState) -> Result<()> {
    use anyhow::Context;
    use modelboard_core::i18n::t;
    use modelboard_core::logging;

    let _log_guard = logging::init_file(&config.logs_dir(), "info")?;

    eprintln!("{}", t("common.loading", config.locale));
    let catalog = super::load_catalog(config, snapshot).await?;

    modelboard_tui::run_browser(catalog, filters, config.locale, config.effective_page_size())
        .context("model browser failed")
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _snapshot: Option<&Path>, _filters: FilterState) -> Result<()> {
    anyhow::bail!(
        "This build has no full-screen browser.\n\
         Use `modelboard models list` instead."
    )
}
