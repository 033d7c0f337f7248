use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{Component, ComponentInput, ComponentStatus};
use crate::{Client, Response, Result};
use http::Method;
use serde::Serialize;

/// Components of a page.
#[derive(Debug, Clone, Copy)]
pub struct Components<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct StatusOnly {
    status: ComponentStatus,
}

impl<'a> Components<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the components of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<Component>>> {
        let path = format!("pages/{}/components", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single component.
    pub async fn get(&self, page_id: &str, component_id: &str) -> Result<Response<Component>> {
        let path = format!("pages/{}/components/{}", page_id, component_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a component.
    pub async fn create(
        &self,
        page_id: &str,
        component: &ComponentInput,
    ) -> Result<Response<Component>> {
        let path = format!("pages/{}/components", page_id);
        let body = envelope("component", component);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a component. Only the fields set in the input are sent.
    pub async fn update(
        &self,
        page_id: &str,
        component_id: &str,
        component: &ComponentInput,
    ) -> Result<Response<Component>> {
        let path = format!("pages/{}/components/{}", page_id, component_id);
        let body = envelope("component", component);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a component.
    pub async fn delete(&self, page_id: &str, component_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/components/{}", page_id, component_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }

    /// Changes only the component's status.
    pub async fn update_status(
        &self,
        page_id: &str,
        component_id: &str,
        status: ComponentStatus,
    ) -> Result<Response<Component>> {
        let path = format!("pages/{}/components/{}", page_id, component_id);
        let status = StatusOnly { status };
        let body = envelope("component", &status);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }
}
