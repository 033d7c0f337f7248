//! Response body decode modes.
//!
//! Callers choose explicitly how a successful body is consumed:
//!
//! - [`Json<T>`] decodes into a typed value (an empty body yields `T::default()`),
//! - [`Raw`] returns the body bytes untouched,
//! - [`Discard`] drops the body.
//!
//! The set is closed; [`Decoder`] is sealed.

use crate::{Error, Result};
use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
}

/// Turns a successful response body into a value.
pub trait Decoder: sealed::Sealed + Send + Sync {
    /// The decoded value.
    type Output;

    /// Decodes one response body. Called once per successful attempt.
    fn decode(&self, status: StatusCode, body: Bytes) -> Result<Self::Output>;
}

/// Decode the body as JSON into `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    /// Creates the decoder.
    pub fn new() -> Self {
        Json(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Json<{}>", std::any::type_name::<T>())
    }
}

impl<T> sealed::Sealed for Json<T> {}

impl<T> Decoder for Json<T>
where
    T: DeserializeOwned + Default,
{
    type Output = T;

    fn decode(&self, status: StatusCode, body: Bytes) -> Result<T> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        match serde_json::from_slice(&body) {
            Ok(value) => Ok(value),
            Err(source) => {
                tracing::error!(
                    error = %source,
                    status = status.as_u16(),
                    raw_response = %String::from_utf8_lossy(&body),
                    "Failed to deserialize response"
                );
                Err(Error::Decode {
                    status,
                    raw_body: body,
                    source,
                })
            }
        }
    }
}

/// Return the body bytes as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw;

impl sealed::Sealed for Raw {}

impl Decoder for Raw {
    type Output = Bytes;

    fn decode(&self, _status: StatusCode, body: Bytes) -> Result<Bytes> {
        Ok(body)
    }
}

/// Ignore the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl sealed::Sealed for Discard {}

impl Decoder for Discard {
    type Output = ();

    fn decode(&self, _status: StatusCode, _body: Bytes) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Page {
        id: String,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_json_decodes_typed_value() {
        let page: Page = Json::new()
            .decode(StatusCode::OK, Bytes::from_static(br#"{"id":"p1","name":"Acme"}"#))
            .unwrap();
        assert_eq!(
            page,
            Page {
                id: "p1".to_string(),
                name: "Acme".to_string()
            }
        );
    }

    #[test]
    fn test_json_empty_body_is_default() {
        let page: Page = Json::new()
            .decode(StatusCode::NO_CONTENT, Bytes::new())
            .unwrap();
        assert_eq!(page, Page::default());

        let pages: Vec<Page> = Json::new()
            .decode(StatusCode::OK, Bytes::from_static(b" \n"))
            .unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_json_malformed_body() {
        let err = Json::<Page>::new()
            .decode(StatusCode::OK, Bytes::from_static(b"invalid json"))
            .unwrap_err();

        match err {
            Error::Decode {
                status, raw_body, ..
            } => {
                assert_eq!(status, StatusCode::OK);
                assert_eq!(raw_body, Bytes::from_static(b"invalid json"));
            }
            other => panic!("Expected Decode, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_and_discard() {
        let body = Bytes::from_static(b"id,value\n1,2\n");
        assert_eq!(Raw.decode(StatusCode::OK, body.clone()).unwrap(), body);
        Discard.decode(StatusCode::OK, body).unwrap();
    }
}
