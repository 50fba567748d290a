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

//! [`Transport`] backed by the official `elasticsearch` crate.
//!
//! The wrapped transport owns the connection pool, authentication and TLS
//! settings; this adapter only converts values between the two crates.

use crate::endpoint::Method;
use crate::error::Error;
use crate::instrument::{Instrumentation, TracingInstrumentation};
use crate::transport::{Response, ResponseBody, Transport, TransportRequest};
use async_trait::async_trait;
use elasticsearch::http::headers as es_headers;
use elasticsearch::http::transport::Transport as EsTransport;
use elasticsearch::http::{Method as EsMethod, Url};
use futures::stream;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Adapter from [`Transport`] to `elasticsearch::http::transport::Transport`.
///
/// Provides [`TracingInstrumentation`] unless built
/// [`without_instrumentation`](ElasticsearchTransport::without_instrumentation).
#[derive(Clone)]
pub struct ElasticsearchTransport {
    inner: EsTransport,
    instrumentation: Option<Arc<dyn Instrumentation>>,
}

impl ElasticsearchTransport {
    pub fn new(inner: EsTransport) -> Self {
        ElasticsearchTransport {
            inner,
            instrumentation: Some(Arc::new(TracingInstrumentation::new())),
        }
    }

    /// Transport to a single node, without authentication.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a malformed URL, or
    /// [`Error::Transport`] if the HTTP client cannot be built.
    pub fn single_node(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url)?;
        let inner = EsTransport::single_node(url.as_str()).map_err(Error::transport)?;
        Ok(ElasticsearchTransport::new(inner))
    }

    pub fn without_instrumentation(mut self) -> Self {
        self.instrumentation = None;
        self
    }

    /// The wrapped transport, e.g. to change credentials.
    #[must_use]
    pub fn inner(&self) -> &EsTransport {
        &self.inner
    }
}

impl fmt::Debug for ElasticsearchTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticsearchTransport")
            .field("instrumented", &self.instrumentation.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ElasticsearchTransport {
    async fn perform(&self, request: TransportRequest) -> Result<Response, Error> {
        let TransportRequest {
            method,
            path,
            query,
            headers,
            body,
            timeout,
            cancellation,
        } = request;

        let headers = to_es_headers(&headers)?;
        let query = if query.is_empty() { None } else { Some(&query) };
        let body = body.map(|body| body.to_vec());
        trace!(%method, %path, "sending through elasticsearch transport");

        let send = self
            .inner
            .send(to_es_method(method), &path, headers, query, body, timeout);

        let response = match &cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => return Err(Error::Cancelled),
                    response = send => response,
                }
            }
            None => send.await,
        }
        .map_err(Error::transport)?;

        let status = StatusCode::from_u16(response.status_code().as_u16()).map_err(Error::transport)?;
        let headers = from_es_headers(response.headers())?;
        let body = ResponseBody::new(stream::once(async move {
            let bytes = response.bytes();
            match cancellation {
                Some(token) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => Err(Error::Cancelled),
                        bytes = bytes => bytes.map_err(Error::transport),
                    }
                }
                None => bytes.await.map_err(Error::transport),
            }
        }));

        Ok(Response::new(status, headers, body))
    }

    fn instrumentation(&self) -> Option<Arc<dyn Instrumentation>> {
        self.instrumentation.clone()
    }
}

fn to_es_method(method: Method) -> EsMethod {
    match method {
        Method::Get => EsMethod::Get,
        Method::Head => EsMethod::Head,
        Method::Post => EsMethod::Post,
        Method::Put => EsMethod::Put,
        Method::Delete => EsMethod::Delete,
    }
}

fn to_es_headers(headers: &HeaderMap) -> Result<es_headers::HeaderMap, Error> {
    let mut converted = es_headers::HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = es_headers::HeaderName::from_bytes(name.as_str().as_bytes())
            .map_err(Error::transport)?;
        let value = es_headers::HeaderValue::from_bytes(value.as_bytes())
            .map_err(Error::transport)?;
        converted.append(name, value);
    }
    Ok(converted)
}

fn from_es_headers(headers: &es_headers::HeaderMap) -> Result<HeaderMap, Error> {
    let mut converted = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        converted.append(
            HeaderName::from_bytes(name.as_str().as_bytes())?,
            HeaderValue::from_bytes(value.as_bytes())?,
        );
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_survive_conversion_with_repeated_names() {
        let mut headers = HeaderMap::new();
        headers.append("x-opaque-id", HeaderValue::from_static("a"));
        headers.append("x-opaque-id", HeaderValue::from_static("b"));
        headers.append("content-type", HeaderValue::from_static("application/json"));

        let converted = to_es_headers(&headers).unwrap();
        assert_eq!(converted.get_all("x-opaque-id").iter().count(), 2);

        let back = from_es_headers(&converted).unwrap();
        assert_eq!(back, headers);
    }

    #[test]
    fn methods_map_one_to_one() {
        assert!(matches!(to_es_method(Method::Head), EsMethod::Head));
        assert!(matches!(to_es_method(Method::Put), EsMethod::Put));
    }

    #[test]
    fn single_node_rejects_malformed_url() {
        let err = ElasticsearchTransport::single_node("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
