//! The matching-and-resolution pipeline.
//!
//! Given a sorted candidate list and a request, decides which rule applies
//! and what target URL it resolves to. The whole crate is pure and
//! synchronous: no I/O, no shared mutable state, safe to call concurrently.
//! Side effects (hit counting, logging, persistence) belong to the caller.
//!
//! # Control flow
//!
//! ```text
//! find_redirect(candidates, request)
//!   └─ for each candidate, in (group_position, position) order:
//!        evaluate_url_pattern ── no match ──▶ next candidate
//!        evaluate_condition
//!        resolve_target ──────── no target ─▶ next candidate
//!        ▶ first fully resolved match wins
//! ```
//!
//! The caller then feeds the winning rule and target to [`execute_action`].

pub mod action;
pub mod conditions;
pub mod helpers;
pub mod metrics_defs;
pub mod pipeline;
pub mod target_resolver;
pub mod url_pattern;

pub use action::execute_action;
pub use conditions::evaluate_condition;
pub use pipeline::{PipelineMatch, find_redirect};
pub use target_resolver::resolve_target;
pub use url_pattern::evaluate_url_pattern;
