use std::sync::Arc;
use tracing::debug;

use super::client::ContentStateApi;
use crate::error::ApprovalError;

/// Maps a workflow state name to the identifier the space has configured
/// for it.
///
/// The name→id mapping is workspace-editable and can change between calls,
/// so every resolution re-reads the space's state settings. Matching is
/// case-insensitive; an unmatched name is an explicit [`ApprovalError::StateNotFound`],
/// never a silent `None` flowing into the write step.
#[derive(Clone)]
pub struct StateResolver {
    remote: Arc<dyn ContentStateApi>,
}

impl StateResolver {
    pub fn new(remote: Arc<dyn ContentStateApi>) -> Self {
        Self { remote }
    }

    pub async fn resolve_state_id(
        &self,
        space_key: &str,
        state_name: &str,
    ) -> Result<String, ApprovalError> {
        if space_key.is_empty() {
            return Err(ApprovalError::MissingSpaceKey);
        }

        let payload = self.remote.fetch_space_states(space_key).await?;
        match payload
            .space_content_states
            .iter()
            .find(|state| state.name.eq_ignore_ascii_case(state_name))
        {
            Some(state) => {
                debug!(space_key, state_name, state_id = %state.id, "resolved space state id");
                Ok(state.id.clone())
            }
            None => Err(ApprovalError::StateNotFound {
                name: state_name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::types::{ContentStatePayload, SpaceContentState, SpaceStatesPayload};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSpaceStates {
        states: Vec<SpaceContentState>,
        fetch_calls: AtomicUsize,
    }

    impl FakeSpaceStates {
        fn new(states: Vec<(&str, &str)>) -> Self {
            Self {
                states: states
                    .into_iter()
                    .map(|(name, id)| SpaceContentState {
                        name: name.to_string(),
                        id: id.to_string(),
                    })
                    .collect(),
                fetch_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ContentStateApi for FakeSpaceStates {
        async fn fetch_content_state(
            &self,
            _page_id: &str,
        ) -> Result<ContentStatePayload, ApprovalError> {
            Err(ApprovalError::InvalidResponse {
                message: "not exercised by resolver tests".to_string(),
            })
        }

        async fn fetch_space_states(
            &self,
            _space_key: &str,
        ) -> Result<SpaceStatesPayload, ApprovalError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SpaceStatesPayload {
                space_content_states: self.states.clone(),
            })
        }

        async fn put_content_state(
            &self,
            _page_id: &str,
            _state_id: &str,
        ) -> Result<serde_json::Value, ApprovalError> {
            Err(ApprovalError::InvalidResponse {
                message: "not exercised by resolver tests".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn resolves_case_insensitively() {
        let api = Arc::new(FakeSpaceStates::new(vec![("Published", "42")]));
        let resolver = StateResolver::new(api);

        for name in ["published", "PUBLISHED", "Published"] {
            let id = resolver.resolve_state_id("ENG", name).await.unwrap();
            assert_eq!(id, "42", "resolving '{name}'");
        }
    }

    #[tokio::test]
    async fn unmatched_name_is_state_not_found() {
        let api = Arc::new(FakeSpaceStates::new(vec![("Draft", "1")]));
        let resolver = StateResolver::new(api);

        let err = resolver.resolve_state_id("ENG", "Published").await.unwrap_err();
        assert!(matches!(err, ApprovalError::StateNotFound { ref name } if name == "Published"));
    }

    #[tokio::test]
    async fn empty_space_key_fails_without_fetching() {
        let api = Arc::new(FakeSpaceStates::new(vec![("Draft", "1")]));
        let resolver = StateResolver::new(Arc::clone(&api) as Arc<dyn ContentStateApi>);

        let err = resolver.resolve_state_id("", "Draft").await.unwrap_err();
        assert!(matches!(err, ApprovalError::MissingSpaceKey));
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fetches_fresh_settings_per_resolution() {
        let api = Arc::new(FakeSpaceStates::new(vec![("Draft", "1")]));
        let resolver = StateResolver::new(Arc::clone(&api) as Arc<dyn ContentStateApi>);

        resolver.resolve_state_id("ENG", "Draft").await.unwrap();
        resolver.resolve_state_id("ENG", "Draft").await.unwrap();
        assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 2);
    }
}
