pub mod config;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod metrics_defs;
pub mod request;
pub mod results;

pub use config::RerouteConfig;
pub use entities::{
    Candidate, ContentItem, Group, NotFoundLog, Redirect, RedirectLog, SourceFlags, Tenant,
    TenantHost,
};
pub use enums::{ActionType, IpLogging, MatchType, QueryHandling, RedirectStatus, TenantStatus};
pub use errors::{Result, RerouteError};
pub use request::HttpRequest;
pub use results::{ActionResult, ConditionEvaluation, ProcessResult, UrlMatchResult};
