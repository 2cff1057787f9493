//! The request value object the host hands to the engine.
//!
//! The host owns the HTTP transport; by the time a request reaches this
//! library every attribute has already been extracted. The engine never
//! touches a socket or a framework request type.

use std::collections::HashMap;

/// Pre-extracted attributes of one incoming HTTP request.
///
/// `url` is the raw path+query as received (e.g. `/old?a=1`), not an
/// absolute URL. Empty maps mean "no headers/cookies/variables were
/// captured"; lookups simply miss.
#[derive(Clone, Debug, Default)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    /// Hostname the request arrived on; resolves the tenant.
    pub domain: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub accept_language: Option<String>,
    pub is_authenticated: bool,
    pub user_role: Option<String>,
    /// Upstream response status, used only to decide whether a not-found
    /// event should be logged when nothing matched.
    pub response_code: Option<u16>,
    pub headers: HashMap<String, String>,
    pub cookies: HashMap<String, String>,
    pub server_variables: HashMap<String, String>,
}

impl HttpRequest {
    /// Convenience constructor for the common case of a bare GET.
    pub fn get<U, D>(url: U, domain: D) -> Self
    where
        U: Into<String>,
        D: Into<String>,
    {
        HttpRequest {
            url: url.into(),
            method: "GET".to_string(),
            domain: domain.into(),
            ..Default::default()
        }
    }
}
