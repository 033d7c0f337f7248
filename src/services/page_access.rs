//! Audience-specific page membership.

use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{PageAccessGroup, PageAccessGroupInput, PageAccessUser, PageAccessUserInput};
use crate::{Client, Response, Result};
use http::Method;

/// Users of an audience-specific page.
#[derive(Debug, Clone, Copy)]
pub struct PageAccessUsers<'a> {
    client: &'a Client,
}

impl<'a> PageAccessUsers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the page access users of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<PageAccessUser>>> {
        let path = format!("pages/{}/page_access_users", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single page access user.
    pub async fn get(&self, page_id: &str, user_id: &str) -> Result<Response<PageAccessUser>> {
        let path = format!("pages/{}/page_access_users/{}", page_id, user_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a page access user.
    pub async fn create(
        &self,
        page_id: &str,
        user: &PageAccessUserInput,
    ) -> Result<Response<PageAccessUser>> {
        let path = format!("pages/{}/page_access_users", page_id);
        let body = envelope("page_access_user", user);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a page access user.
    pub async fn update(
        &self,
        page_id: &str,
        user_id: &str,
        user: &PageAccessUserInput,
    ) -> Result<Response<PageAccessUser>> {
        let path = format!("pages/{}/page_access_users/{}", page_id, user_id);
        let body = envelope("page_access_user", user);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a page access user.
    pub async fn delete(&self, page_id: &str, user_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/page_access_users/{}", page_id, user_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}

/// Groups of an audience-specific page.
#[derive(Debug, Clone, Copy)]
pub struct PageAccessGroups<'a> {
    client: &'a Client,
}

impl<'a> PageAccessGroups<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the page access groups of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<PageAccessGroup>>> {
        let path = format!("pages/{}/page_access_groups", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single page access group.
    pub async fn get(&self, page_id: &str, group_id: &str) -> Result<Response<PageAccessGroup>> {
        let path = format!("pages/{}/page_access_groups/{}", page_id, group_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a page access group.
    pub async fn create(
        &self,
        page_id: &str,
        group: &PageAccessGroupInput,
    ) -> Result<Response<PageAccessGroup>> {
        let path = format!("pages/{}/page_access_groups", page_id);
        let body = envelope("page_access_group", group);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a page access group.
    pub async fn update(
        &self,
        page_id: &str,
        group_id: &str,
        group: &PageAccessGroupInput,
    ) -> Result<Response<PageAccessGroup>> {
        let path = format!("pages/{}/page_access_groups/{}", page_id, group_id);
        let body = envelope("page_access_group", group);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a page access group.
    pub async fn delete(&self, page_id: &str, group_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/page_access_groups/{}", page_id, group_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
