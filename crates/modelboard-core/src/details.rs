//! Label/value breakdown of a single model for detail views.

use modelboard_types::{Model, Provider};

use crate::format::{NOT_AVAILABLE, format_context_length, format_created, format_price};
use crate::i18n::{Locale, t};
use crate::providers::resolve_static;

/// Localized label/value rows describing one model, in display order.
///
/// `listed` is the provider matched through the provider list; the
/// `provider` row always comes from the static table.
pub fn model_details(
    model: &Model,
    listed: Option<&Provider>,
    locale: Locale,
) -> Vec<(String, String)> {
    let label = |key: &str| t(&format!("models.details.{key}"), locale);
    let yes_no = |flag: bool| t(if flag { "common.yes" } else { "common.no" }, locale);
    let optional_price =
        |raw: Option<&str>| raw.map_or_else(|| NOT_AVAILABLE.to_string(), format_price);

    let mut rows = vec![
        (label("provider"), resolve_static(&model.id).to_string()),
        (
            label("listedProvider"),
            listed.map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.name.clone()),
        ),
        (label("modality"), model.architecture.modality.clone()),
        (label("tokenizer"), model.architecture.tokenizer.clone()),
        (
            label("instructType"),
            model
                .architecture
                .instruct_type
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (label("contextLength"), format_context_length(model.context_length)),
        (
            label("maxCompletion"),
            format_context_length(model.top_provider.max_completion_tokens),
        ),
        (label("promptPrice"), format_price(&model.pricing.prompt)),
        (label("completionPrice"), format_price(&model.pricing.completion)),
        (label("requestPrice"), optional_price(model.pricing.request.as_deref())),
        (label("imagePrice"), optional_price(model.pricing.image.as_deref())),
        (
            label("moderated"),
            model
                .top_provider
                .is_moderated
                .map_or_else(|| NOT_AVAILABLE.to_string(), yes_no),
        ),
    ];

    if let Some(limits) = &model.per_request_limits {
        let prompt = limits.prompt_tokens.as_deref().unwrap_or(NOT_AVAILABLE);
        let completion = limits.completion_tokens.as_deref().unwrap_or(NOT_AVAILABLE);
        rows.push((label("perRequestLimits"), format!("{prompt} / {completion}")));
    }
    rows.push((label("created"), format_created(model.created)));
    rows
}
