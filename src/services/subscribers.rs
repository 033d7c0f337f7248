use super::{envelope, NO_BODY};
use crate::decode::{Discard, Json};
use crate::models::{Subscriber, SubscriberInput, SubscriberListOptions};
use crate::{Client, Response, Result};
use http::Method;

/// Notification subscribers of a page.
#[derive(Debug, Clone, Copy)]
pub struct Subscribers<'a> {
    client: &'a Client,
}

impl<'a> Subscribers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists subscribers matching `options`.
    pub async fn list(
        &self,
        page_id: &str,
        options: &SubscriberListOptions,
    ) -> Result<Response<Vec<Subscriber>>> {
        let path = format!("pages/{}/subscribers", page_id);
        self.client
            .call(Method::GET, &path, options.query_pairs(), NO_BODY, Json::new())
            .await
    }

    /// Fetches a single subscriber.
    pub async fn get(&self, page_id: &str, subscriber_id: &str) -> Result<Response<Subscriber>> {
        let path = format!("pages/{}/subscribers/{}", page_id, subscriber_id);
        self.client
            .call(Method::GET, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Creates a subscriber.
    pub async fn create(
        &self,
        page_id: &str,
        subscriber: &SubscriberInput,
    ) -> Result<Response<Subscriber>> {
        let path = format!("pages/{}/subscribers", page_id);
        let body = envelope("subscriber", subscriber);
        self.client
            .call(Method::POST, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Updates a subscriber.
    pub async fn update(
        &self,
        page_id: &str,
        subscriber_id: &str,
        subscriber: &SubscriberInput,
    ) -> Result<Response<Subscriber>> {
        let path = format!("pages/{}/subscribers/{}", page_id, subscriber_id);
        let body = envelope("subscriber", subscriber);
        self.client
            .call(Method::PATCH, &path, Vec::new(), Some(&body), Json::new())
            .await
    }

    /// Deletes a subscriber.
    pub async fn delete(&self, page_id: &str, subscriber_id: &str) -> Result<Response<()>> {
        let path = format!("pages/{}/subscribers/{}", page_id, subscriber_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Discard)
            .await
    }

    /// Reactivates a quarantined subscriber.
    pub async fn reactivate(
        &self,
        page_id: &str,
        subscriber_id: &str,
    ) -> Result<Response<Subscriber>> {
        let path = format!("pages/{}/subscribers/{}/reactivate", page_id, subscriber_id);
        self.client
            .call(Method::POST, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Unsubscribes a subscriber and returns its final state.
    pub async fn unsubscribe(
        &self,
        page_id: &str,
        subscriber_id: &str,
    ) -> Result<Response<Subscriber>> {
        let path = format!("pages/{}/subscribers/{}/unsubscribe", page_id, subscriber_id);
        self.client
            .call(Method::DELETE, &path, Vec::new(), NO_BODY, Json::new())
            .await
    }

    /// Sends the confirmation notification again.
    pub async fn resend_confirmation(
        &self,
        page_id: &str,
        subscriber_id: &str,
    ) -> Result<Response<()>> {
        let path = format!(
            "pages/{}/subscribers/{}/resend_confirmation",
            page_id, subscriber_id
        );
        self.client
            .call(Method::POST, &path, Vec::new(), NO_BODY, Discard)
            .await
    }
}
