use serde::{Deserialize, Serialize};

/// Identifier of the marketplace user on whose behalf a tool runs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self { ActorId(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<&str> for ActorId {
    fn from(val: &str) -> Self { ActorId(val.to_string()) }
}

impl From<String> for ActorId {
    fn from(val: String) -> Self { ActorId(val) }
}

impl AsRef<str> for ActorId {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Per-request context handed to every tool call. Tools never look the actor up from
/// ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolContext {
    actor: Option<ActorId>,
}

impl ToolContext {
    /// A context with no signed-in user; only catalog-wide tools can run in it
    pub fn anonymous() -> Self { Self { actor: None } }

    pub fn for_actor(actor: impl Into<ActorId>) -> Self { Self { actor: Some(actor.into()) } }

    pub fn actor(&self) -> Option<&ActorId> { self.actor.as_ref() }
}
