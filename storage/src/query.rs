//! Log filtering, sorting, grouping and pagination.
//!
//! The generic machinery here is shared by any [`crate::repository`]
//! implementation; the in-memory adapter uses it directly and a database
//! adapter would translate the same query values to SQL.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::cmp::Ordering;

use shared::{NotFoundLog, RedirectLog};

/// A typed filter/sort value. Comparisons never coerce across variants;
/// a type mismatch simply fails the filter.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Str(String),
    Int(i64),
    Time(DateTime<Utc>),
}

impl FilterValue {
    fn partial_cmp_same_type(&self, other: &FilterValue) -> Option<Ordering> {
        match (self, other) {
            (FilterValue::Str(a), FilterValue::Str(b)) => Some(a.cmp(b)),
            (FilterValue::Int(a), FilterValue::Int(b)) => Some(a.cmp(b)),
            (FilterValue::Time(a), FilterValue::Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    fn display(&self) -> String {
        match self {
            FilterValue::Str(s) => s.clone(),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::Time(t) => t.to_rfc3339(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFilterOperator {
    Eq,
    Neq,
    Contains,
    NotContains,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Clone, Debug)]
pub struct LogFilter {
    pub field: String,
    pub operator: LogFilterOperator,
    pub value: FilterValue,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

/// A paged, filtered, sorted log listing request.
#[derive(Clone, Debug)]
pub struct LogQuery {
    pub tenant_id: String,
    pub filters: Vec<LogFilter>,
    /// Defaults to `created_at`.
    pub sort_by: Option<String>,
    pub sort_dir: SortDir,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl LogQuery {
    pub fn for_tenant(tenant_id: impl Into<String>) -> Self {
        LogQuery {
            tenant_id: tenant_id.into(),
            filters: Vec::new(),
            sort_by: None,
            sort_dir: SortDir::Desc,
            page: None,
            per_page: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupSortBy {
    #[default]
    Count,
    Field,
}

/// A paged group-by-field count request.
#[derive(Clone, Debug)]
pub struct LogGroupQuery {
    pub tenant_id: String,
    pub group_by: String,
    pub filters: Vec<LogFilter>,
    pub sort_by: GroupSortBy,
    pub sort_dir: SortDir,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogGroupResult {
    pub value: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Field access by name, implemented by each log row type.
pub trait LogRecord {
    fn tenant_id(&self) -> &str;
    /// `None` for unknown fields and absent optional values.
    fn field(&self, name: &str) -> Option<FilterValue>;
}

fn opt_str(value: &Option<String>) -> Option<FilterValue> {
    value.as_ref().map(|s| FilterValue::Str(s.clone()))
}

impl LogRecord for RedirectLog {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::Str(self.id.clone())),
            "tenant_id" => Some(FilterValue::Str(self.tenant_id.clone())),
            "redirect_id" => opt_str(&self.redirect_id),
            "created_at" => Some(FilterValue::Time(self.created_at)),
            "source_url" => Some(FilterValue::Str(self.source_url.clone())),
            "target_url" => opt_str(&self.target_url),
            "domain" => opt_str(&self.domain),
            "ip" => opt_str(&self.ip),
            "http_code" => Some(FilterValue::Int(i64::from(self.http_code))),
            "user_agent" => opt_str(&self.user_agent),
            "referrer" => opt_str(&self.referrer),
            "request_method" => opt_str(&self.request_method),
            "redirect_source" => opt_str(&self.redirect_source),
            _ => None,
        }
    }
}

impl LogRecord for NotFoundLog {
    fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(FilterValue::Str(self.id.clone())),
            "tenant_id" => Some(FilterValue::Str(self.tenant_id.clone())),
            "created_at" => Some(FilterValue::Time(self.created_at)),
            "url" => Some(FilterValue::Str(self.url.clone())),
            "domain" => opt_str(&self.domain),
            "ip" => opt_str(&self.ip),
            "user_agent" => opt_str(&self.user_agent),
            "referrer" => opt_str(&self.referrer),
            "request_method" => opt_str(&self.request_method),
            _ => None,
        }
    }
}

fn matches_filter<T: LogRecord>(record: &T, filter: &LogFilter) -> bool {
    let actual = record.field(&filter.field);

    match filter.operator {
        LogFilterOperator::Eq => actual.as_ref() == Some(&filter.value),
        LogFilterOperator::Neq => actual.as_ref() != Some(&filter.value),
        LogFilterOperator::Contains => match (&actual, &filter.value) {
            (Some(FilterValue::Str(a)), FilterValue::Str(e)) => {
                a.to_lowercase().contains(&e.to_lowercase())
            }
            _ => false,
        },
        LogFilterOperator::NotContains => match (&actual, &filter.value) {
            (Some(FilterValue::Str(a)), FilterValue::Str(e)) => {
                !a.to_lowercase().contains(&e.to_lowercase())
            }
            _ => true,
        },
        LogFilterOperator::Gt => ordered(&actual, &filter.value, &[Ordering::Greater]),
        LogFilterOperator::Gte => {
            ordered(&actual, &filter.value, &[Ordering::Greater, Ordering::Equal])
        }
        LogFilterOperator::Lt => ordered(&actual, &filter.value, &[Ordering::Less]),
        LogFilterOperator::Lte => ordered(&actual, &filter.value, &[Ordering::Less, Ordering::Equal]),
    }
}

fn ordered(actual: &Option<FilterValue>, expected: &FilterValue, accept: &[Ordering]) -> bool {
    actual
        .as_ref()
        .and_then(|a| a.partial_cmp_same_type(expected))
        .is_some_and(|ord| accept.contains(&ord))
}

fn apply_sort<T: LogRecord>(items: &mut [T], sort_by: &str, dir: SortDir) {
    items.sort_by(|a, b| {
        let ord = match (a.field(sort_by), b.field(sort_by)) {
            (Some(va), Some(vb)) => va.partial_cmp_same_type(&vb).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

/// Slices `items` into the requested page. Page and page size are clamped
/// to at least 1; page size defaults to 50.
pub fn paginate<T>(items: Vec<T>, page: Option<u64>, per_page: Option<u64>) -> PaginatedResult<T> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(50).max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(per_page).max(1);
    let start = (page - 1).saturating_mul(per_page);

    let items = items
        .into_iter()
        .skip(start as usize)
        .take(per_page as usize)
        .collect();

    PaginatedResult {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

/// Runs a full listing query over an in-memory slice of rows.
pub fn query_items<T: LogRecord + Clone>(all_items: &[T], query: &LogQuery) -> PaginatedResult<T> {
    let mut items: Vec<T> = all_items
        .iter()
        .filter(|item| item.tenant_id() == query.tenant_id)
        .filter(|item| query.filters.iter().all(|f| matches_filter(*item, f)))
        .cloned()
        .collect();

    let sort_by = query.sort_by.as_deref().unwrap_or("created_at");
    apply_sort(&mut items, sort_by, query.sort_dir);

    paginate(items, query.page, query.per_page)
}

/// Runs a group-by count query over an in-memory slice of rows.
pub fn group_items<T: LogRecord>(
    all_items: &[T],
    query: &LogGroupQuery,
) -> PaginatedResult<LogGroupResult> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for item in all_items
        .iter()
        .filter(|item| item.tenant_id() == query.tenant_id)
        .filter(|item| query.filters.iter().all(|f| matches_filter(*item, f)))
    {
        let value = item
            .field(&query.group_by)
            .map_or_else(String::new, |v| v.display());
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut results: Vec<LogGroupResult> = counts
        .into_iter()
        .map(|(value, count)| LogGroupResult { value, count })
        .collect();

    match query.sort_by {
        GroupSortBy::Field => results.sort_by(|a, b| match query.sort_dir {
            SortDir::Asc => a.value.cmp(&b.value),
            SortDir::Desc => b.value.cmp(&a.value),
        }),
        GroupSortBy::Count => results.sort_by(|a, b| match query.sort_dir {
            SortDir::Asc => a.count.cmp(&b.count),
            SortDir::Desc => b.count.cmp(&a.count),
        }),
    }

    paginate(results, query.page, query.per_page)
}
