use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{Incident, IncidentInput, IncidentListOptions};
use crate::{Client, Response, Result};
use http::Method;

/// Incidents and scheduled maintenances of a page.
#[derive(Debug, Clone, Copy)]
pub struct Incidents<'a> {
    client: &'a Client,
}

impl<'a> Incidents<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists incidents matching `options`, newest first.
    pub async fn list(
        &self,
        page_id: &str,
        options: &IncidentListOptions,
    ) -> Result<Response<Vec<Incident>>> {
        let path = format!("pages/{}/incidents", page_id);
        self.client
            .call(Method::GET, &path, options.query_pairs(), NO_BODY, Json::new())
            .await
    }

    /// Incidents that are not yet resolved.
    pub async fn list_unresolved(&self, page_id: &str) -> Result<Response<Vec<Incident>>> {
        let path = format!("pages/{}/incidents/unresolved", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Upcoming scheduled maintenances.
    pub async fn list_scheduled(&self, page_id: &str) -> Result<Response<Vec<Incident>>> {
        let path = format!("pages/{}/incidents/scheduled", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single incident.
    pub async fn get(&self, page_id: &str, incident_id: &str) -> Result<Response<Incident>> {
        let path = format!("pages/{}/incidents/{}", page_id, incident_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Opens an incident or schedules a maintenance.
    pub async fn create(
        &self,
        page_id: &str,
        incident: &IncidentInput,
    ) -> Result<Response<Incident>> {
        let path = format!("pages/{}/incidents", page_id);
        let body = envelope("incident", incident);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates an incident. Only the fields set in the input are sent.
    pub async fn update(
        &self,
        page_id: &str,
        incident_id: &str,
        incident: &IncidentInput,
    ) -> Result<Response<Incident>> {
        let path = format!("pages/{}/incidents/{}", page_id, incident_id);
        let body = envelope("incident", incident);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes an incident.
    pub async fn delete(&self, page_id: &str, incident_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/incidents/{}", page_id, incident_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
