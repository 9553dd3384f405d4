// Content Approval - publication workflow core for content-management pages
// Exposes the transition engine, state resolver, and decision notifier for
// presentation clients and tests.

pub mod config;
pub mod error;
pub mod notify;
pub mod remote;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{ApprovalConfig, ObservabilityConfig, RemoteConfig, WebhookConfig};
pub use error::{ApprovalError, ErrorCode};
pub use notify::{DecisionSink, WebhookNotifier, WEBHOOK_TOKEN_HEADER};
pub use remote::{ContentStateApi, ContentStateClient, StateResolver};
pub use telemetry::init_telemetry;
pub use workflow::{next_state, Action, Status, TransitionEngine, TransitionResult, WorkflowState};
