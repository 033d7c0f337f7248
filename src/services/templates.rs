use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{Template, TemplateInput};
use crate::{Client, Response, Result};
use http::Method;

/// Incident templates of a page.
#[derive(Debug, Clone, Copy)]
pub struct Templates<'a> {
    client: &'a Client,
}

impl<'a> Templates<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the incident templates of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<Template>>> {
        let path = format!("pages/{}/incident_templates", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single template.
    pub async fn get(&self, page_id: &str, template_id: &str) -> Result<Response<Template>> {
        let path = format!("pages/{}/incident_templates/{}", page_id, template_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates an incident template.
    pub async fn create(
        &self,
        page_id: &str,
        template: &TemplateInput,
    ) -> Result<Response<Template>> {
        let path = format!("pages/{}/incident_templates", page_id);
        let body = envelope("template", template);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates an incident template.
    pub async fn update(
        &self,
        page_id: &str,
        template_id: &str,
        template: &TemplateInput,
    ) -> Result<Response<Template>> {
        let path = format!("pages/{}/incident_templates/{}", page_id, template_id);
        let body = envelope("template", template);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a template.
    pub async fn delete(&self, page_id: &str, template_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/incident_templates/{}", page_id, template_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
