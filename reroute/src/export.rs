//! Redirect and log export.

use serde_json::{Map, Value, json};

use shared::{NotFoundLog, Redirect, RedirectLog};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

fn escape_csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn redirect_to_csv_row(r: &Redirect) -> String {
    [
        escape_csv_field(&r.source_url),
        escape_csv_field(r.target_url.as_deref().unwrap_or("")),
        r.action_type.as_str().to_string(),
        r.action_code.to_string(),
        r.match_type.as_str().to_string(),
        escape_csv_field(r.title.as_deref().unwrap_or("")),
    ]
    .join(",")
}

/// JSON shape mirrors what the importer accepts, so an export can be fed
/// straight back in. Absent optionals and empty random-target lists are
/// omitted rather than serialized as null.
fn redirect_to_json_value(r: &Redirect) -> Value {
    let mut obj = Map::new();
    obj.insert("source_url".to_string(), json!(r.source_url));
    if let Some(target) = &r.target_url {
        obj.insert("target_url".to_string(), json!(target));
    }
    if let Some(alternate) = &r.alternate_target_url {
        obj.insert("alternate_target_url".to_string(), json!(alternate));
    }
    obj.insert(
        "source_flags".to_string(),
        serde_json::to_value(r.source_flags).unwrap_or(Value::Null),
    );
    obj.insert("match_type".to_string(), json!(r.match_type.as_str()));
    if let Some(value) = &r.match_value {
        obj.insert("match_value".to_string(), json!(value));
    }
    obj.insert("match_is_regex".to_string(), json!(r.match_is_regex));
    obj.insert("action_type".to_string(), json!(r.action_type.as_str()));
    obj.insert("action_code".to_string(), json!(r.action_code));
    if !r.random_targets.is_empty() {
        obj.insert("random_targets".to_string(), json!(r.random_targets));
    }
    if let Some(title) = &r.title {
        obj.insert("title".to_string(), json!(title));
    }
    Value::Object(obj)
}

pub fn export_redirects(redirects: &[Redirect], format: ExportFormat) -> String {
    match format {
        ExportFormat::Json => {
            let values: Vec<Value> = redirects.iter().map(redirect_to_json_value).collect();
            serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
        }
        ExportFormat::Csv => {
            let header = "source_url,target_url,action_type,action_code,match_type,title";
            let mut out = vec![header.to_string()];
            out.extend(redirects.iter().map(redirect_to_csv_row));
            out.join("\n")
        }
    }
}

pub fn export_redirect_logs_csv(logs: &[RedirectLog]) -> String {
    let header =
        "created_at,source_url,target_url,domain,ip,http_code,user_agent,referrer,request_method";
    let mut out = vec![header.to_string()];
    out.extend(logs.iter().map(|l| {
        [
            l.created_at.to_rfc3339(),
            escape_csv_field(&l.source_url),
            escape_csv_field(l.target_url.as_deref().unwrap_or("")),
            escape_csv_field(l.domain.as_deref().unwrap_or("")),
            l.ip.clone().unwrap_or_default(),
            l.http_code.to_string(),
            escape_csv_field(l.user_agent.as_deref().unwrap_or("")),
            escape_csv_field(l.referrer.as_deref().unwrap_or("")),
            l.request_method.clone().unwrap_or_default(),
        ]
        .join(",")
    }));
    out.join("\n")
}

pub fn export_not_found_logs_csv(logs: &[NotFoundLog]) -> String {
    let header = "created_at,url,domain,ip,user_agent,referrer,request_method";
    let mut out = vec![header.to_string()];
    out.extend(logs.iter().map(|l| {
        [
            l.created_at.to_rfc3339(),
            escape_csv_field(&l.url),
            escape_csv_field(l.domain.as_deref().unwrap_or("")),
            l.ip.clone().unwrap_or_default(),
            escape_csv_field(l.user_agent.as_deref().unwrap_or("")),
            escape_csv_field(l.referrer.as_deref().unwrap_or("")),
            l.request_method.clone().unwrap_or_default(),
        ]
        .join(",")
    }));
    out.join("\n")
}
