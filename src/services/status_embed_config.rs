use super::{envelope, NO_BODY};
use crate::decode::Json;
use crate::models::{StatusEmbedConfig, StatusEmbedConfigInput};
use crate::{Client, Response, Result};
use http::Method;

/// Status embed widget settings of a page.
#[derive(Debug, Clone, Copy)]
pub struct StatusEmbedConfigs<'a> {
    client: &'a Client,
}

impl<'a> StatusEmbedConfigs<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the page's status widget settings.
    pub async fn get(&self, page_id: &str) -> Result<Response<StatusEmbedConfig>> {
        let path = format!("pages/{}/status_embed_config", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Changes the page's status widget settings.
    pub async fn update(
        &self,
        page_id: &str,
        config: &StatusEmbedConfigInput,
    ) -> Result<Response<StatusEmbedConfig>> {
        let path = format!("pages/{}/status_embed_config", page_id);
        let body = envelope("status_embed_config", config);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }
}
