pub mod client;
pub mod resolver;
pub mod types;

pub use client::{ContentStateApi, ContentStateClient};
pub use resolver::StateResolver;
pub use types::{ContentStatePayload, NamedState, SpaceContentState, SpaceStatesPayload};
