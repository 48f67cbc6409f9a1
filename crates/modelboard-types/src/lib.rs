//! Shared catalog record types (models, providers).

pub mod lenient;
pub mod model;
pub mod provider;

pub use model::{Architecture, Model, PerRequestLimits, Pricing, TopProvider};
pub use provider::Provider;
