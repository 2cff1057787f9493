//! Bulk redirect import.
//!
//! Parsing is lenient at the row level: a malformed row becomes a
//! [`ParseError`] and the remaining rows still import. Unknown enum values
//! are row errors here, since the closed `MatchType`/`ActionType` types
//! cannot represent them.

mod csv;
mod json;

use shared::{
    ActionType, MatchType, QueryHandling, RedirectStatus, Result, SourceFlags,
};
use storage::{NewRedirect, StorageAdapter};

pub use csv::parse_csv;
pub use json::parse_json;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

/// One successfully parsed import row.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportRecord {
    pub source_url: String,
    pub source_flags: SourceFlags,
    pub match_type: MatchType,
    pub match_value: Option<String>,
    pub match_is_regex: bool,
    pub target_url: Option<String>,
    pub alternate_target_url: Option<String>,
    pub action_type: ActionType,
    pub action_code: u16,
    pub random_targets: Vec<String>,
    pub title: Option<String>,
}

impl ImportRecord {
    /// Row defaults: a plain literal redirect.
    fn with_source(source_url: String) -> Self {
        ImportRecord {
            source_url,
            source_flags: SourceFlags {
                case_insensitive: false,
                ignore_trailing_slash: false,
                query_handling: QueryHandling::Exact,
                is_regex: false,
            },
            match_type: MatchType::Url,
            match_value: None,
            match_is_regex: false,
            target_url: None,
            alternate_target_url: None,
            action_type: ActionType::Redirect,
            action_code: 301,
            random_targets: Vec::new(),
            title: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub row: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseResult {
    pub records: Vec<ImportRecord>,
    pub errors: Vec<ParseError>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportResult {
    pub created: usize,
    pub errors: Vec<ParseError>,
}

/// Parses `source_data` and appends the resulting rules to
/// `target_group_id`, after the group's existing rules.
pub async fn import_redirects(
    storage: &dyn StorageAdapter,
    source_data: &str,
    format: ImportFormat,
    target_group_id: &str,
) -> Result<ImportResult> {
    let parse_result = match format {
        ImportFormat::Json => parse_json(source_data),
        ImportFormat::Csv => parse_csv(source_data),
    };

    if parse_result.records.is_empty() {
        return Ok(ImportResult {
            created: 0,
            errors: parse_result.errors,
        });
    }

    let existing_count = storage
        .redirects()
        .count_by_group_id(target_group_id)
        .await?;

    let new_redirects: Vec<NewRedirect> = parse_result
        .records
        .into_iter()
        .enumerate()
        .map(|(i, record)| NewRedirect {
            group_id: target_group_id.to_string(),
            position: existing_count + i as u32,
            title: record.title,
            status: RedirectStatus::Enabled,
            source_url: record.source_url,
            source_flags: record.source_flags,
            match_type: record.match_type,
            match_value: record.match_value,
            match_is_regex: record.match_is_regex,
            target_url: record.target_url,
            alternate_target_url: record.alternate_target_url,
            action_type: record.action_type,
            action_code: record.action_code,
            random_targets: record.random_targets,
            hit_count: 0,
            last_hit_at: None,
            log_excluded: false,
        })
        .collect();

    let created = new_redirects.len();
    storage.redirects().create_many(new_redirects).await?;

    tracing::debug!(
        group_id = %target_group_id,
        created,
        errors = parse_result.errors.len(),
        "imported redirects"
    );

    Ok(ImportResult {
        created,
        errors: parse_result.errors,
    })
}
