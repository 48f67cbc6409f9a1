//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They carry I/O only, so `update` stays pure and testable.

use modelboard_core::Locale;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Persist the chosen locale to the config file.
    SaveLocale(Locale),
}
