use super::{envelope, NO_BODY};
use crate::decode::Json;
use crate::models::{Page, PageInput};
use crate::{Client, Response, Result};
use http::Method;

/// Status pages visible to the API key.
#[derive(Debug, Clone, Copy)]
pub struct Pages<'a> {
    client: &'a Client,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists every page the key can access.
    pub async fn list(&self) -> Result<Response<Vec<Page>>> {
        self.client
            .call(Method::GET, "pages", Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single page.
    pub async fn get(&self, page_id: &str) -> Result<Response<Page>> {
        let path = format!("pages/{}", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Applies the fields set in `page`.
    pub async fn update(&self, page_id: &str, page: &PageInput) -> Result<Response<Page>> {
        let path = format!("pages/{}", page_id);
        let body = envelope("page", page);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }
}
