//! Core modelboard library: provider resolution, filtering, pagination,
//! filter state, catalog I/O, config, localization and logging.

pub mod browser;
pub mod catalog;
pub mod config;
pub mod details;
pub mod directory;
pub mod filter;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod openrouter;
pub mod pagination;
pub mod providers;
pub mod store;

pub use browser::ModelBrowser;
pub use catalog::Catalog;
pub use filter::{FilterState, Moderation};
pub use i18n::Locale;
