use serde::de::DeserializeOwned;

use crate::domain::DomainError;

/// Locate the structured payload inside free-form model output.
///
/// Scans for the first `{` or `[` and returns the span up to the *last*
/// matching closer (`}` or `]` respectively), newlines included. When an
/// opener has no closer after it the scan moves on to the next opener.
///
/// The match is greedy and does not validate JSON: prose that follows the
/// payload but precedes a later closer ends up inside the span. Callers parse
/// the result and report a parse failure separately.
pub fn extract_json(text: &str) -> Result<&str, DomainError> {
    for (start, opener) in text.char_indices().filter(|(_, c)| *c == '{' || *c == '[') {
        let closer = if opener == '{' { '}' } else { ']' };
        if let Some(end) = text.rfind(closer) {
            if end > start {
                return Ok(&text[start..=end]);
            }
        }
    }

    Err(DomainError::model_output(
        "no JSON object or array found in model response",
        text,
    ))
}

/// Extract the payload with [`extract_json`] and deserialize it.
///
/// A missing payload and a payload of the wrong shape are both reported as
/// model-output errors carrying the raw text.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, DomainError> {
    let payload = extract_json(text)?;
    serde_json::from_str(payload).map_err(|e| DomainError::invalid_structured_data(e, text))
}
