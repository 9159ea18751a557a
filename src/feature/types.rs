//! Result types for feature lookup and command dispatch.

use serde::Serialize;
use serde_json::Value;

/// One entry produced while iterating a store's features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureInfo {
    pub feature: &'static str,
    pub exists: bool,
}

/// Answer to [`can_do_cmd`](super::Feature::can_do_cmd).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdCheck {
    pub cmd: String,
    pub exists: bool,
}

/// Outcome of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmdResult {
    pub cmd: String,
    pub payload: Option<Value>,
    pub data: Value,

    /// Caller-supplied metadata, present only for
    /// [`do_cmd_with_meta`](super::Feature::do_cmd_with_meta).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}
