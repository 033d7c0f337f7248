use super::{envelope, NO_BODY};
use crate::decode::Json;
use crate::models::{IncidentUpdate, IncidentUpdateInput};
use crate::{Client, Response, Result};
use http::Method;

/// Timeline updates of one incident.
#[derive(Debug, Clone, Copy)]
pub struct IncidentUpdates<'a> {
    client: &'a Client,
}

impl<'a> IncidentUpdates<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the updates posted to an incident.
    pub async fn list(
        &self,
        page_id: &str,
        incident_id: &str,
    ) -> Result<Response<Vec<IncidentUpdate>>> {
        let path = format!("pages/{}/incidents/{}/incident_updates", page_id, incident_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single incident update.
    pub async fn get(
        &self,
        page_id: &str,
        incident_id: &str,
        update_id: &str,
    ) -> Result<Response<IncidentUpdate>> {
        let path = format!(
            "pages/{}/incidents/{}/incident_updates/{}",
            page_id, incident_id, update_id
        );
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Posts a new update to an incident.
    pub async fn create(
        &self,
        page_id: &str,
        incident_id: &str,
        update: &IncidentUpdateInput,
    ) -> Result<Response<IncidentUpdate>> {
        let path = format!("pages/{}/incidents/{}/incident_updates", page_id, incident_id);
        let body = envelope("incident_update", update);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Edits a posted update.
    pub async fn update(
        &self,
        page_id: &str,
        incident_id: &str,
        update_id: &str,
        update: &IncidentUpdateInput,
    ) -> Result<Response<IncidentUpdate>> {
        let path = format!(
            "pages/{}/incidents/{}/incident_updates/{}",
            page_id, incident_id, update_id
        );
        let body = envelope("incident_update", update);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }
}
