//! Response-shape normalization
//!
//! The chat endpoint has returned several body shapes over time. Each known
//! shape is a rule; rules are tried in order and the first one that matches
//! decides the answer, even when the text it yields is empty.

use serde_json::Value;

/// Answer used when a successful response carries no recognizable text.
pub const PLACEHOLDER_ANSWER: &str = "(No text returned)";

type Rule = fn(&Value) -> Option<String>;

/// Known response shapes, highest priority first.
const RULES: &[(&str, Rule)] = &[
    ("plain string", plain_string),
    ("text", text_field),
    ("content", content_field),
    ("choices[0].message.content", first_choice_content),
    ("output_text", output_text_field),
    ("output[0].content[0].text", first_output_text),
];

/// Pull a candidate answer out of a decoded response body.
pub fn extract_text(body: &Value) -> Option<String> {
    RULES.iter().find_map(|(name, rule)| {
        let text = rule(body)?;
        tracing::debug!("Response matched shape '{}'", name);
        Some(text)
    })
}

/// Normalize a response body to the text shown to the user.
pub fn answer_from(body: &Value) -> String {
    match extract_text(body) {
        Some(text) if !text.is_empty() => text,
        _ => {
            tracing::debug!("No text found in response, using placeholder");
            PLACEHOLDER_ANSWER.to_string()
        }
    }
}

fn plain_string(body: &Value) -> Option<String> {
    body.as_str().map(str::to_string)
}

fn text_field(body: &Value) -> Option<String> {
    body.as_object()?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

fn content_field(body: &Value) -> Option<String> {
    truthy(body.as_object()?.get("content")?).map(render)
}

fn first_choice_content(body: &Value) -> Option<String> {
    truthy(body.pointer("/choices/0/message/content")?).map(render)
}

fn output_text_field(body: &Value) -> Option<String> {
    body.as_object()?
        .get("output_text")?
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn first_output_text(body: &Value) -> Option<String> {
    let first = body.as_object()?.get("output")?.as_array()?.first()?;
    truthy(first.pointer("/content/0/text")?).map(render)
}

/// `null`, `false`, zero and `""` do not count as a value.
fn truthy(value: &Value) -> Option<&Value> {
    let present = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    present.then_some(value)
}

/// Strings as-is, anything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
