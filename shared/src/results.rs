//! Result values produced by the matching pipeline and action executor.

use serde::Serialize;

/// Outcome of evaluating one rule's URL pattern against a request URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlMatchResult {
    pub matched: bool,
    /// Ordered explicit capture groups (whole-match excluded). Always empty
    /// for literal matches; unmatched optional groups yield empty strings.
    pub captured_groups: Vec<String>,
}

impl UrlMatchResult {
    pub fn no_match() -> Self {
        UrlMatchResult {
            matched: false,
            captured_groups: Vec::new(),
        }
    }
}

/// Outcome of evaluating a rule's auxiliary condition.
///
/// `checked == false` means the rule has no auxiliary condition and always
/// proceeds as if matched. The distinction lets the target resolver tell
/// "no condition" apart from "condition failed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionEvaluation {
    pub checked: bool,
    pub matched: bool,
}

impl ConditionEvaluation {
    pub const UNCHECKED: ConditionEvaluation = ConditionEvaluation {
        checked: false,
        matched: true,
    };

    pub fn checked(matched: bool) -> Self {
        ConditionEvaluation {
            checked: true,
            matched,
        }
    }
}

/// Outbound decision handed back to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionResult {
    Redirect { url: String, code: u16 },
    Error { code: u16 },
    Rewrite { original_url: String, target_url: String },
    RandomRedirect { url: String, code: u16 },
    Nothing,
    /// Do not intervene; the host serves the request as usual.
    Pass,
}

/// Full outcome of processing one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessResult {
    pub action: ActionResult,
    pub redirect_id: Option<String>,
    pub tenant_id: Option<String>,
}

impl ProcessResult {
    /// The engine declined to intervene.
    pub fn pass() -> Self {
        ProcessResult {
            action: ActionResult::Pass,
            redirect_id: None,
            tenant_id: None,
        }
    }
}
