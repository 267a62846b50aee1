use serde_json::Value;

/// Outcome of interpreting the gateway's search reply. Parsing is
/// best-effort: anything that is not a JSON object degrades to
/// `Unparsed`, never to an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchReply {
    Parsed {
        message: String,
        property_ids: Vec<i64>,
    },
    Unparsed {
        raw: String,
    },
}

/// Interpret the generated text as `{"message": ..., "property_ids": [...]}`.
///
/// Missing keys default (empty message / no ids). Non-numeric elements
/// inside `property_ids` are dropped individually rather than failing
/// the whole reply.
pub fn interpret(text: &str) -> SearchReply {
    let value: Value = match serde_json::from_str(text.trim()) {
        Ok(v) => v,
        Err(_) => {
            return SearchReply::Unparsed {
                raw: text.to_string(),
            }
        }
    };

    let Some(obj) = value.as_object() else {
        return SearchReply::Unparsed {
            raw: text.to_string(),
        };
    };

    let message = obj
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let property_ids = obj
        .get("property_ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();

    SearchReply::Parsed {
        message,
        property_ids,
    }
}
