use serde::{Deserialize, Serialize};

/// Publication stage of a page. The remote content-state store owns the
/// current value; these variants are parsed from the state names it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    Draft,
    PendingInternalReview,
    PendingBusinessReview,
    Published,
    /// A space-configured state this workflow does not manage.
    Unknown(String),
}

impl WorkflowState {
    /// State name as configured in the remote store. Resolution against the
    /// space's state settings is case-insensitive on both sides.
    pub fn name(&self) -> &str {
        match self {
            WorkflowState::Draft => "Draft",
            WorkflowState::PendingInternalReview => "Pending Internal Review",
            WorkflowState::PendingBusinessReview => "Pending Business Review",
            WorkflowState::Published => "Published",
            WorkflowState::Unknown(name) => name,
        }
    }
}

impl From<&str> for WorkflowState {
    fn from(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "draft" => WorkflowState::Draft,
            "pending internal review" => WorkflowState::PendingInternalReview,
            "pending business review" => WorkflowState::PendingBusinessReview,
            "published" => WorkflowState::Published,
            _ => WorkflowState::Unknown(name.to_string()),
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A user-initiated intent. Not itself a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Approve,
    Reject,
    RequestReReview,
}

impl Action {
    /// Wire name, used as the webhook `buttonType` and in result messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::RequestReReview => "re-review",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The approval table. `current` is `None` when the page has no recorded
/// state. `Reject` and `RequestReReview` reset without consulting the
/// current state; `Approve` advances one stage and is terminal at
/// `Published`. `None` means the action is invalid where the page stands.
pub fn next_state(current: Option<&WorkflowState>, action: Action) -> Option<WorkflowState> {
    match action {
        Action::RequestReReview => Some(WorkflowState::PendingInternalReview),
        Action::Reject => Some(WorkflowState::Draft),
        Action::Approve => match current {
            Some(WorkflowState::Draft) => Some(WorkflowState::PendingInternalReview),
            Some(WorkflowState::PendingInternalReview) => {
                Some(WorkflowState::PendingBusinessReview)
            }
            Some(WorkflowState::PendingBusinessReview) => Some(WorkflowState::Published),
            Some(WorkflowState::Published) | Some(WorkflowState::Unknown(_)) | None => None,
        },
    }
}
