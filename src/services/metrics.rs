use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{Metric, MetricData, MetricDataInput, MetricDataListOptions, MetricInput};
use crate::{Client, Response, Result};
use http::Method;

/// System metrics of a page and their data points.
#[derive(Debug, Clone, Copy)]
pub struct Metrics<'a> {
    client: &'a Client,
}

impl<'a> Metrics<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists the metrics of a page.
    pub async fn list(&self, page_id: &str) -> Result<Response<Vec<Metric>>> {
        let path = format!("pages/{}/metrics", page_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single metric.
    pub async fn get(&self, page_id: &str, metric_id: &str) -> Result<Response<Metric>> {
        let path = format!("pages/{}/metrics/{}", page_id, metric_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a metric.
    pub async fn create(&self, page_id: &str, metric: &MetricInput) -> Result<Response<Metric>> {
        let path = format!("pages/{}/metrics", page_id);
        let body = envelope("metric", metric);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a metric.
    pub async fn update(
        &self,
        page_id: &str,
        metric_id: &str,
        metric: &MetricInput,
    ) -> Result<Response<Metric>> {
        let path = format!("pages/{}/metrics/{}", page_id, metric_id);
        let body = envelope("metric", metric);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a metric.
    pub async fn delete(&self, page_id: &str, metric_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/metrics/{}", page_id, metric_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }

    /// Submits one data point.
    pub async fn add_data(
        &self,
        page_id: &str,
        metric_id: &str,
        data: &MetricDataInput,
    ) -> Result<Response<MetricData>> {
        let path = format!("pages/{}/metrics/{}/data", page_id, metric_id);
        let body = envelope("data", data);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Reads data points, optionally limited to a time window.
    pub async fn get_data(
        &self,
        page_id: &str,
        metric_id: &str,
        options: &MetricDataListOptions,
    ) -> Result<Response<Vec<MetricData>>> {
        let path = format!("pages/{}/metrics/{}/data", page_id, metric_id);
        self.client
            .call(Method::GET, &path, options.query_pairs(), NO_BODY, Json::new())
            .await
    }

    /// Removes every data point of the metric.
    pub async fn delete_data(&self, page_id: &str, metric_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/metrics/{}/data", page_id, metric_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
