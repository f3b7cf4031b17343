//! Confirmation selection and formatting.

use ferroform_schema::{Confirmation, ConfirmationType};

/// Fallback confirmation text, used when no message confirmation
/// applies.
// TODO: route through a proper localization layer once one exists;
// page and redirect confirmations also fall back to this for now.
pub const FALLBACK_CONFIRMATION: &str =
    "Thanks for contacting us! We will get in touch with you shortly.";

/// Selects the applicable confirmation and returns its display text.
///
/// The first candidate is the fallback; any candidate flagged default
/// replaces it, scanning in order, so when several carry the flag the
/// last one wins. This tie-break is deliberate, not an accident of
/// iteration. Non-message confirmations yield the fixed fallback
/// string. Message bodies are paragraph-formatted unless the
/// confirmation disables auto-formatting.
pub fn resolve_confirmation(confirmations: &[Confirmation]) -> String {
    let mut selected = confirmations.first();
    for candidate in confirmations {
        if candidate.is_default() {
            selected = Some(candidate);
        }
    }

    let Some(confirmation) = selected else {
        return FALLBACK_CONFIRMATION.to_string();
    };

    if confirmation.confirmation_type != ConfirmationType::Message {
        return FALLBACK_CONFIRMATION.to_string();
    }

    if confirmation.auto_formatting_disabled() {
        confirmation.message.clone()
    } else {
        autop(&confirmation.message)
    }
}

/// Paragraph auto-formatting: blank-line separated blocks become `<p>`
/// elements, remaining single newlines become `<br />`.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");

    normalized
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| format!("<p>{}</p>", block.trim().replace('\n', "<br />\n")))
        .collect::<Vec<_>>()
        .join("\n")
}
