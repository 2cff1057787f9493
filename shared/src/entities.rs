//! Domain entities.
//!
//! # Model
//!
//! The storage hierarchy is three levels deep:
//!
//! 1. **Tenant → Hosts**: a tenant owns one or more hostnames
//! 2. **Tenant → Groups**: ordered, independently togglable rule containers
//! 3. **Group → Redirects**: ordered matching rules
//!
//! ```text
//! Tenant "acme"
//!   ├─ Host "www.acme.com"
//!   └─ Group "legacy paths" (position 0)
//!        ├─ Redirect /old → /new      (position 0)
//!        └─ Redirect ^/blog/(\d+)$ …  (position 1)
//! ```
//!
//! The matching core treats all of these as immutable value objects for the
//! duration of one pipeline invocation; mutation happens only through the
//! repository layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ActionType, MatchType, QueryHandling, RedirectStatus, TenantStatus};

/// Per-rule source-pattern flags.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SourceFlags {
    pub case_insensitive: bool,
    pub ignore_trailing_slash: bool,
    pub query_handling: QueryHandling,
    /// When set, `source_url` is a regular expression applied to the whole
    /// request URL (path and query together) instead of a literal path.
    pub is_regex: bool,
}

impl Default for SourceFlags {
    fn default() -> Self {
        SourceFlags {
            case_insensitive: false,
            ignore_trailing_slash: false,
            query_handling: QueryHandling::Exact,
            is_regex: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub status: TenantStatus,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TenantHost {
    pub id: String,
    pub tenant_id: String,
    pub hostname: String,
    pub environment: Option<String>,
    pub status: RedirectStatus,
}

/// An ordered, togglable container of redirects within a tenant.
///
/// Disabling a group cascade-disables its redirects (they are not deleted);
/// re-enabling cascades back. The cascade lives in the operations layer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Group {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub status: RedirectStatus,
    pub position: u32,
}

/// The unit of matching policy.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Redirect {
    pub id: String,
    pub group_id: String,
    /// Priority within the owning group, ascending.
    pub position: u32,
    pub title: Option<String>,
    pub status: RedirectStatus,
    /// Literal path+query template, or a regex source when
    /// `source_flags.is_regex` is set.
    pub source_url: String,
    pub source_flags: SourceFlags,
    pub match_type: MatchType,
    /// Comparand for the auxiliary condition; format depends on `match_type`.
    /// Never consulted when `match_type` is `Url`.
    pub match_value: Option<String>,
    /// Switches the condition evaluator (not the URL pattern) to regex mode.
    pub match_is_regex: bool,
    pub target_url: Option<String>,
    /// Fallback destination used when an auxiliary condition was checked
    /// and did not match.
    pub alternate_target_url: Option<String>,
    pub action_type: ActionType,
    /// HTTP status to emit for redirect/error actions.
    pub action_code: u16,
    /// Candidate destinations for the `random` action.
    pub random_targets: Vec<String>,
    /// Telemetry, mutated by the hit tracker only.
    pub hit_count: u64,
    pub last_hit_at: Option<DateTime<Utc>>,
    /// Consulted by the redirect logger, not by the matching core.
    pub log_excluded: bool,
}

/// A redirect annotated with its owning group's position, as produced by
/// the storage layer for pipeline consumption. Candidate lists are sorted
/// by (`group_position` asc, `redirect.position` asc).
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub redirect: Redirect,
    pub group_position: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RedirectLog {
    pub id: String,
    pub tenant_id: String,
    pub redirect_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub source_url: String,
    pub target_url: Option<String>,
    pub domain: Option<String>,
    pub ip: Option<String>,
    pub http_code: u16,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub request_method: Option<String>,
    /// JSON-serialized request headers, present only when header logging
    /// is enabled in the config.
    pub request_headers: Option<String>,
    pub redirect_source: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NotFoundLog {
    pub id: String,
    pub tenant_id: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub domain: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub request_method: Option<String>,
    pub request_headers: Option<String>,
}

/// A content item whose public URL may have moved; consumed by the
/// content-change monitor.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ContentItem {
    pub content_type: String,
    pub current_url: String,
    pub previous_url: Option<String>,
}
