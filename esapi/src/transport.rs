// Licensed to Elasticsearch B.V. under one or more contributor
// license agreements. See the NOTICE file distributed with
// this work for additional information regarding copyright
// ownership. Elasticsearch B.V. licenses this file to you under
// the Apache License, Version 2.0 (the "License"); you may
// not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The seam between request dispatch and the HTTP client that performs it.

use crate::endpoint::Method;
use crate::error::Error;
use crate::instrument::Instrumentation;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Everything a transport needs to perform one HTTP call.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Percent-encoded path starting with `/`.
    pub path: String,
    /// Ordered, unencoded query pairs.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl TransportRequest {
    /// Query rendered as `application/x-www-form-urlencoded`, empty when
    /// there are no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormEncode`] if the pairs cannot be serialized.
    pub fn query_string(&self) -> Result<String, Error> {
        crate::query::to_query_string(&self.query)
    }

    /// Path and query, e.g. `/books/_search?size=10`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormEncode`] if the query cannot be serialized.
    pub fn path_and_query(&self) -> Result<String, Error> {
        let query = self.query_string()?;
        if query.is_empty() {
            Ok(self.path.clone())
        } else {
            Ok(format!("{}?{query}", self.path))
        }
    }
}

/// Performs HTTP calls on behalf of a [`Client`](crate::Client).
///
/// Implementations own connection handling, authentication, TLS and any
/// retry policy. They receive the timeout and cancellation token of the
/// request and are expected to honor them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one call. A response with any status code is `Ok`.
    async fn perform(&self, request: TransportRequest) -> Result<Response, Error>;

    /// Instrumentation the transport provides, if any. Queried once when the
    /// client is built.
    fn instrumentation(&self) -> Option<Arc<dyn Instrumentation>> {
        None
    }
}

/// Streamed response body.
pub struct ResponseBody {
    inner: BoxStream<'static, Result<Bytes, Error>>,
}

impl ResponseBody {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, Error>> + Send + 'static,
    {
        ResponseBody {
            inner: stream.boxed(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        ResponseBody::new(stream::empty())
    }

    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        ResponseBody::new(stream::once(async move { Ok(bytes) }))
    }

    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn collect(mut self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Stream for ResponseBody {
    type Item = Result<Bytes, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

/// Response as delivered by the transport.
///
/// The status code is not interpreted; see
/// [`error_for_status_code`](Response::error_for_status_code).
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl Response {
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Response {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    #[must_use]
    pub fn into_parts(self) -> (StatusCode, HeaderMap, ResponseBody) {
        (self.status, self.headers, self.body)
    }

    /// Reads the whole body.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying stream.
    pub async fn bytes(self) -> Result<Bytes, Error> {
        self.body.collect().await
    }

    /// Reads the whole body as text, replacing invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying stream.
    pub async fn text(self) -> Result<String, Error> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads the whole body and deserializes it from JSON.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying stream, or [`Error::Json`].
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Turns a 4xx or 5xx response into [`Error::Status`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] for client and server error codes.
    pub fn error_for_status_code(self) -> Result<Self, Error> {
        if self.status.is_client_error() || self.status.is_server_error() {
            Err(Error::Status {
                status: self.status,
            })
        } else {
            Ok(self)
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> Response {
        Response::new(
            StatusCode::from_u16(status).unwrap(),
            HeaderMap::new(),
            ResponseBody::from_bytes(body),
        )
    }

    #[tokio::test]
    async fn body_chunks_are_concatenated() {
        let body = ResponseBody::new(stream::iter(vec![
            Ok(Bytes::from_static(b"{\"a\":")),
            Ok(Bytes::from_static(b"1}")),
        ]));
        let response = Response::new(StatusCode::OK, HeaderMap::new(), body);
        let value: serde_json::Value = response.json().await.unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[tokio::test]
    async fn stream_error_is_returned() {
        let body = ResponseBody::new(stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(Error::Cancelled),
        ]));
        assert!(matches!(body.collect().await, Err(Error::Cancelled)));
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error_by_default() {
        let response = response(404, r#"{"found":false}"#);
        assert!(!response.is_success());
        assert_eq!(response.text().await.unwrap(), r#"{"found":false}"#);
    }

    #[test]
    fn error_for_status_code_rejects_client_and_server_errors() {
        let err = response(404, "").error_for_status_code().unwrap_err();
        assert!(matches!(err, Error::Status { status } if status == StatusCode::NOT_FOUND));
        assert!(response(503, "").error_for_status_code().is_err());
        assert!(response(200, "").error_for_status_code().is_ok());
    }

    #[test]
    fn path_and_query_skips_empty_query() {
        let mut request = TransportRequest {
            method: Method::Get,
            path: "/books/_search".to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            cancellation: None,
        };
        assert_eq!(request.path_and_query().unwrap(), "/books/_search");

        request.query = vec![("q".to_string(), "title:rust".to_string())];
        assert_eq!(
            request.path_and_query().unwrap(),
            "/books/_search?q=title%3Arust"
        );
    }
}
