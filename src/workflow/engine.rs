use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::state::{next_state, Action, WorkflowState};
use crate::error::{ApprovalError, ErrorCode};
use crate::notify::DecisionSink;
use crate::remote::{ContentStateApi, StateResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Outcome handed to the presentation client. Either a clear success with
/// the remote store's updated state payload, or an error with a diagnostic
/// message and machine-readable code; never partially populated.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionResult {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TransitionResult {
    fn success(action: Action, data: serde_json::Value) -> Self {
        Self {
            status: Status::Success,
            message: format!("{} request sent successfully!", action.as_str()),
            code: None,
            data: Some(data),
        }
    }

    fn failure(err: &ApprovalError) -> Self {
        Self {
            status: Status::Error,
            message: err.to_string(),
            code: Some(err.code()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Orchestrates one approval action end to end: read the page's current
/// state, advance the approval table, resolve the target state's remote
/// identifier, write it back, then report the decision to the automation
/// webhook.
///
/// The read and write are sequential round-trips with no retry and no
/// conditional-write precondition; a concurrent transition between them can
/// win the write (last writer wins, accepted limitation). The webhook report
/// runs for every invocation that carried a page id, independent of the
/// write outcome, and its own failure never alters the returned result.
pub struct TransitionEngine {
    remote: Arc<dyn ContentStateApi>,
    resolver: StateResolver,
    notifier: Arc<dyn DecisionSink>,
}

impl TransitionEngine {
    pub fn new(remote: Arc<dyn ContentStateApi>, notifier: Arc<dyn DecisionSink>) -> Self {
        let resolver = StateResolver::new(Arc::clone(&remote));
        Self {
            remote,
            resolver,
            notifier,
        }
    }

    pub async fn apply_action(
        &self,
        page_id: &str,
        space_key: &str,
        action: Action,
    ) -> TransitionResult {
        if page_id.is_empty() {
            // Short-circuit before any network call, including the webhook.
            return TransitionResult::failure(&ApprovalError::MissingContentId);
        }

        let outcome = self.run_transition(page_id, space_key, action).await;

        if let Err(err) = self.notifier.notify(action, page_id, space_key).await {
            warn!(page_id, action = %action, error = %err, "decision notification failed");
        }

        match outcome {
            Ok(data) => {
                info!(page_id, space_key, action = %action, "workflow transition applied");
                TransitionResult::success(action, data)
            }
            Err(err) => {
                warn!(page_id, space_key, action = %action, error = %err, "workflow transition failed");
                TransitionResult::failure(&err)
            }
        }
    }

    /// Read-only lookup of the page's recorded workflow state, used by the
    /// presentation client to decide which actions to enable. `None` when
    /// the page has no content state set.
    pub async fn current_state(
        &self,
        page_id: &str,
    ) -> Result<Option<WorkflowState>, ApprovalError> {
        if page_id.is_empty() {
            return Err(ApprovalError::MissingContentId);
        }
        let payload = self.remote.fetch_content_state(page_id).await?;
        Ok(payload.state_name().map(WorkflowState::from))
    }

    async fn run_transition(
        &self,
        page_id: &str,
        space_key: &str,
        action: Action,
    ) -> Result<serde_json::Value, ApprovalError> {
        let payload = self.remote.fetch_content_state(page_id).await?;
        let current = payload.state_name().map(WorkflowState::from);

        let target =
            next_state(current.as_ref(), action).ok_or_else(|| ApprovalError::InvalidTransition {
                current: current
                    .as_ref()
                    .map(|state| state.name().to_string())
                    .unwrap_or_else(|| "unset".to_string()),
                action: action.as_str().to_string(),
            })?;

        debug!(page_id, current = ?current, target = %target, "advancing workflow state");

        let state_id = self.resolver.resolve_state_id(space_key, target.name()).await?;
        self.remote.put_content_state(page_id, &state_id).await
    }
}
