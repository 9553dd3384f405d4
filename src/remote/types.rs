//! Typed wire schemas for the content-management REST surface.
//!
//! Each response is decoded into one of these shapes up front; a payload
//! that does not match fails with a typed error instead of propagating a
//! missing field into later steps.

use serde::{Deserialize, Serialize};

/// Response of `GET /content/{page_id}/state`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStatePayload {
    /// Absent when the page has no recorded workflow state.
    #[serde(default)]
    pub content_state: Option<NamedState>,
}

impl ContentStatePayload {
    pub fn state_name(&self) -> Option<&str> {
        self.content_state.as_ref().map(|state| state.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedState {
    pub name: String,
}

/// Response of `GET /space/{space_key}/state/settings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceStatesPayload {
    #[serde(default)]
    pub space_content_states: Vec<SpaceContentState>,
}

/// One space-configured state option. The `id` is the remote identifier the
/// write endpoint expects; the semantic state machine only ever sees `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceContentState {
    pub name: String,
    pub id: String,
}
