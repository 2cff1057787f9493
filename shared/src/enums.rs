//! Closed enums for the decision engine.
//!
//! The original rule model stored these as free strings; here they are closed
//! types so that adding a variant forces every dispatch site to handle it.
//! Unknown strings are rejected at the deserialization/import boundary.

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by hosts, groups and redirects.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedirectStatus {
    Enabled,
    Disabled,
}

/// Tenant lifecycle status.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Suspended,
}

/// How the request query string participates in matching and in the
/// composed target (see the pattern matcher and target resolver).
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryHandling {
    Ignore,
    Exact,
    Pass,
    ExactOrder,
}

impl QueryHandling {
    pub const fn as_str(&self) -> &'static str {
        match self {
            QueryHandling::Ignore => "ignore",
            QueryHandling::Exact => "exact",
            QueryHandling::Pass => "pass",
            QueryHandling::ExactOrder => "exact_order",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ignore" => Some(QueryHandling::Ignore),
            "exact" => Some(QueryHandling::Exact),
            "pass" => Some(QueryHandling::Pass),
            "exact_order" => Some(QueryHandling::ExactOrder),
            _ => None,
        }
    }
}

/// Which auxiliary-condition strategy a rule runs after its URL pattern
/// matches. `Url` means the rule has no auxiliary condition.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Url,
    Ip,
    UserAgent,
    Referrer,
    LoginStatus,
    Header,
    Cookie,
    Role,
    ServerVariable,
    Language,
}

impl MatchType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchType::Url => "url",
            MatchType::Ip => "ip",
            MatchType::UserAgent => "user_agent",
            MatchType::Referrer => "referrer",
            MatchType::LoginStatus => "login_status",
            MatchType::Header => "header",
            MatchType::Cookie => "cookie",
            MatchType::Role => "role",
            MatchType::ServerVariable => "server_variable",
            MatchType::Language => "language",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "url" => Some(MatchType::Url),
            "ip" => Some(MatchType::Ip),
            "user_agent" => Some(MatchType::UserAgent),
            "referrer" => Some(MatchType::Referrer),
            "login_status" => Some(MatchType::LoginStatus),
            "header" => Some(MatchType::Header),
            "cookie" => Some(MatchType::Cookie),
            "role" => Some(MatchType::Role),
            "server_variable" => Some(MatchType::ServerVariable),
            "language" => Some(MatchType::Language),
            _ => None,
        }
    }
}

/// Outbound decision a resolved rule produces.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Redirect,
    Error,
    Nothing,
    Rewrite,
    Random,
}

impl ActionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionType::Redirect => "redirect",
            ActionType::Error => "error",
            ActionType::Nothing => "nothing",
            ActionType::Rewrite => "rewrite",
            ActionType::Random => "random",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "redirect" => Some(ActionType::Redirect),
            "error" => Some(ActionType::Error),
            "nothing" => Some(ActionType::Nothing),
            "rewrite" => Some(ActionType::Rewrite),
            "random" => Some(ActionType::Random),
            _ => None,
        }
    }
}

/// How client IPs are captured into log rows.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IpLogging {
    Full,
    Anonymized,
    None,
}
