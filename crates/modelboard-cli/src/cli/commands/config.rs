//! Config command handlers.

use anyhow::{Context, Result};
use modelboard_core::Locale;
use modelboard_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn generate() -> Result<()> {
    let toml = config::Config::generate()?;
    print!("{toml}");
    Ok(())
}

pub fn locale(locale: Locale) -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::save_locale_to(&config_path, locale)
        .with_context(|| format!("save locale to {}", config_path.display()))?;
    println!("Saved locale {locale} to {}", config_path.display());
    Ok(())
}
