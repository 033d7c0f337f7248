use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{ComponentGroup, ComponentGroupInput};
use crate::{Client, Response, Result};
use http::Method;

/// Component groups of a page.
#[derive(Debug, Clone, Copy)]
pub struct ComponentGroups<'a> {
    client: &'a Client,
}

impl<'a> ComponentGroups<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the component groups of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<ComponentGroup>>> {
        let path = format!("pages/{}/component-groups", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single component group.
    pub async fn get(&self, page_id: &str, group_id: &str) -> Result<Response<ComponentGroup>> {
        let path = format!("pages/{}/component-groups/{}", page_id, group_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a component group.
    pub async fn create(
        &self,
        page_id: &str,
        group: &ComponentGroupInput,
    ) -> Result<Response<ComponentGroup>> {
        let path = format!("pages/{}/component-groups", page_id);
        let body = envelope("component_group", group);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a component group.
    pub async fn update(
        &self,
        page_id: &str,
        group_id: &str,
        group: &ComponentGroupInput,
    ) -> Result<Response<ComponentGroup>> {
        let path = format!("pages/{}/component-groups/{}", page_id, group_id);
        let body = envelope("component_group", group);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a component group.
    pub async fn delete(&self, page_id: &str, group_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/component-groups/{}", page_id, group_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
