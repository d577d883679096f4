//! Deploy lifecycle events
//!
//! Events provide an observable stream of deploy and teardown activity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping every emitted event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployEventEnvelope {
    /// Unique event ID
    pub id: Uuid,

    /// Event timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Event source
    pub source: EventSource,

    /// The actual event
    pub event: DeployEvent,
}

impl DeployEventEnvelope {
    /// Wrap an event with a fresh id and the current timestamp
    pub fn new(event: DeployEvent, source: EventSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            source,
            event,
        }
    }
}

/// Event sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    /// Deployment orchestrator
    Deployment,
    /// Teardown orchestrator
    Teardown,
}

/// Deploy and teardown events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeployEvent {
    /// The cloud function was provisioned
    FunctionDeployed {
        function_name: String,
    },

    /// The gateway service was provisioned
    GatewayDeployed {
        service_id: String,
        url: String,
    },

    /// Both collaborators returned and state was persisted
    DeployCompleted {
        function_name: String,
        url: String,
    },

    /// A collaborator call failed; the sequence was aborted
    DeployFailed {
        reason: String,
    },

    /// The function remove call returned
    FunctionRemoved,

    /// The gateway remove call returned
    GatewayRemoved,

    /// Teardown finished
    RemoveCompleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ids_are_unique() {
        let a = DeployEventEnvelope::new(DeployEvent::RemoveCompleted, EventSource::Teardown);
        let b = DeployEventEnvelope::new(DeployEvent::RemoveCompleted, EventSource::Teardown);
        assert_ne!(a.id, b.id);
    }
}
