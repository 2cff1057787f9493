//! JSON import parsing.

use serde_json::Value;

use shared::{ActionType, MatchType, QueryHandling};

use super::{ImportRecord, ParseError, ParseResult};

fn err(row: usize, message: impl Into<String>) -> ParseError {
    ParseError {
        row,
        message: message.into(),
    }
}

/// Boolean flag accepted either nested under `source_flags` or flattened on
/// the record itself.
fn flag(raw: &Value, name: &str) -> bool {
    raw.get("source_flags")
        .and_then(|f| f.get(name))
        .and_then(Value::as_bool)
        .or_else(|| raw.get(name).and_then(Value::as_bool))
        .unwrap_or(false)
}

fn opt_string(raw: &Value, name: &str) -> Option<String> {
    raw.get(name).and_then(Value::as_str).map(str::to_string)
}

fn validate_record(raw: &Value, index: usize) -> Result<ImportRecord, ParseError> {
    let Some(source_url) = raw
        .get("source_url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    else {
        return Err(err(index, "Missing or invalid source_url"));
    };

    let match_type = match raw.get("match_type").filter(|v| !v.is_null()) {
        None => MatchType::Url,
        Some(v) => {
            let s = v.as_str().unwrap_or_default();
            MatchType::parse(s).ok_or_else(|| err(index, format!("Invalid match_type: {v}")))?
        }
    };

    let action_type = match raw.get("action_type").filter(|v| !v.is_null()) {
        None => ActionType::Redirect,
        Some(v) => {
            let s = v.as_str().unwrap_or_default();
            ActionType::parse(s).ok_or_else(|| err(index, format!("Invalid action_type: {v}")))?
        }
    };

    let query_handling = match raw
        .get("source_flags")
        .and_then(|f| f.get("query_handling"))
        .or_else(|| raw.get("query_handling"))
        .filter(|v| !v.is_null())
    {
        None => QueryHandling::Exact,
        Some(v) => {
            let s = v.as_str().unwrap_or_default();
            QueryHandling::parse(s)
                .ok_or_else(|| err(index, format!("Invalid query_handling: {v}")))?
        }
    };

    let mut record = ImportRecord::with_source(source_url.to_string());
    record.source_flags.case_insensitive = flag(raw, "case_insensitive");
    record.source_flags.ignore_trailing_slash = flag(raw, "ignore_trailing_slash");
    record.source_flags.query_handling = query_handling;
    record.source_flags.is_regex = flag(raw, "is_regex");
    record.match_type = match_type;
    record.match_value = opt_string(raw, "match_value");
    record.match_is_regex = raw
        .get("match_is_regex")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    record.target_url = opt_string(raw, "target_url");
    record.alternate_target_url = opt_string(raw, "alternate_target_url");
    record.action_type = action_type;
    record.action_code = raw
        .get("action_code")
        .and_then(Value::as_u64)
        .and_then(|n| u16::try_from(n).ok())
        .unwrap_or(301);
    record.random_targets = raw
        .get("random_targets")
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    record.title = opt_string(raw, "title");

    Ok(record)
}

pub fn parse_json(source: &str) -> ParseResult {
    let parsed: Value = match serde_json::from_str(source) {
        Ok(v) => v,
        Err(_) => {
            return ParseResult {
                records: Vec::new(),
                errors: vec![err(0, "Invalid JSON")],
            };
        }
    };

    let Some(array) = parsed.as_array() else {
        return ParseResult {
            records: Vec::new(),
            errors: vec![err(0, "Expected JSON array")],
        };
    };

    let mut result = ParseResult::default();
    for (i, raw) in array.iter().enumerate() {
        match validate_record(raw, i) {
            Ok(record) => result.records.push(record),
            Err(error) => result.errors.push(error),
        }
    }
    result
}
