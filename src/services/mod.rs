//! Resource services.
//!
//! Each service borrows the [`Client`](crate::Client) and maps one resource's
//! operations onto paths below the API root. Every call goes through
//! [`Client::execute`](crate::Client::execute), so the client-wide retry
//! policy applies to all of them.

mod component_groups;
mod components;
mod incident_updates;
mod incidents;
mod metrics;
mod page_access;
mod pages;
mod status_embed_config;
mod subscribers;
mod templates;

pub use component_groups::ComponentGroups;
pub use components::Components;
pub use incident_updates::IncidentUpdates;
pub use incidents::Incidents;
pub use metrics::Metrics;
pub use page_access::{PageAccessGroups, PageAccessUsers};
pub use pages::Pages;
pub use status_embed_config::StatusEmbedConfigs;
pub use subscribers::Subscribers;
pub use templates::Templates;

use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder for calls without a request body.
const NO_BODY: Option<&()> = None;

/// Wraps an input in the single-key object the API expects,
/// e.g. `{"component": {...}}`.
fn envelope<'a, T: Serialize>(key: &'static str, value: &'a T) -> BTreeMap<&'static str, &'a T> {
    BTreeMap::from([(key, value)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentInput;

    #[test]
    fn test_envelope_shape() {
        let input = ComponentInput {
            name: Some("API".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(envelope("component", &input)).unwrap(),
            serde_json::json!({"component": {"name": "API"}})
        );
    }
}
