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

use crate::endpoint::JSON;
use crate::error::Error;
use crate::headers;
use crate::instrument::{Instrumentation, Scope};
use crate::request::{Request, RequestBuilder};
use crate::transport::{Response, Transport, TransportRequest};
use http::HeaderMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Dispatches requests through a [`Transport`].
///
/// Cloning is cheap and clones share the transport, so one client can serve
/// any number of concurrent calls.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    instrumentation: Option<Arc<dyn Instrumentation>>,
    default_headers: HeaderMap,
}

impl Client {
    /// Creates a client using the transport's own instrumentation, if any.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Client::builder(transport).build()
    }

    pub fn builder<T: Transport + 'static>(transport: T) -> ClientBuilder {
        ClientBuilder::new(Arc::new(transport))
    }

    /// Builds `builder` and performs the resulting request.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`RequestBuilder::build`], or any
    /// error of [`perform`](Client::perform).
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        self.perform(builder.build()?).await
    }

    // Performs a validated request.
    //
    // The path, query, headers and content type are derived from the request
    // and its endpoint, then the transport is invoked exactly once. The
    // response is returned as is, whatever its status code.
    //
    // # Arguments
    //
    // * `request` - The request to send. It is consumed.
    //
    // # Returns
    //
    // The transport's response, or the transport's error wrapped once.
    pub async fn perform(&self, request: Request) -> Result<Response, Error> {
        let mut scope = match &self.inner.instrumentation {
            Some(instrumentation) if request.is_instrumented() => {
                Some(instrumentation.start(request.endpoint()))
            }
            _ => None,
        };

        let result = self.dispatch(request, &mut scope).await;

        if let Some(mut scope) = scope {
            match &result {
                Ok(response) => scope.after_response(response),
                Err(err) => scope.record_error(err),
            }
            scope.close();
        }
        result
    }

    async fn dispatch(
        &self,
        request: Request,
        scope: &mut Option<Box<dyn Scope>>,
    ) -> Result<Response, Error> {
        let endpoint = request.endpoint();
        let built = crate::path::build(&request, |name, value| {
            if let Some(scope) = scope.as_mut() {
                scope.record_path_part(name, value);
            }
        })?;
        let query = request.query();

        let Request {
            headers: request_headers,
            body,
            timeout,
            cancellation,
            ..
        } = request;

        let mut headers = self.inner.default_headers.clone();
        headers::merge(&mut headers, request_headers);
        if body.is_some() {
            headers::set_content_type(&mut headers, endpoint.body.content_type().unwrap_or(JSON));
        }

        let transport_request = TransportRequest {
            method: built.method,
            path: built.path,
            query,
            headers,
            body,
            timeout,
            cancellation,
        };

        if let Some(scope) = scope.as_mut() {
            scope.before_request(&transport_request);
        }
        debug!(
            endpoint = endpoint.name,
            method = %transport_request.method,
            path = %transport_request.path,
            "dispatching request"
        );

        self.inner.transport.perform(transport_request).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("instrumented", &self.inner.instrumentation.is_some())
            .field("default_headers", &self.inner.default_headers)
            .finish_non_exhaustive()
    }
}

enum InstrumentationChoice {
    FromTransport,
    Custom(Arc<dyn Instrumentation>),
    Disabled,
}

/// Configures a [`Client`].
#[must_use]
pub struct ClientBuilder {
    transport: Arc<dyn Transport>,
    instrumentation: InstrumentationChoice,
    default_headers: HeaderMap,
}

impl ClientBuilder {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        ClientBuilder {
            transport,
            instrumentation: InstrumentationChoice::FromTransport,
            default_headers: HeaderMap::new(),
        }
    }

    /// Uses `instrumentation` instead of the transport's.
    pub fn instrumentation(mut self, instrumentation: Arc<dyn Instrumentation>) -> Self {
        self.instrumentation = InstrumentationChoice::Custom(instrumentation);
        self
    }

    pub fn without_instrumentation(mut self) -> Self {
        self.instrumentation = InstrumentationChoice::Disabled;
        self
    }

    /// Headers sent with every request. Request headers are added to them.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        headers::merge(&mut self.default_headers, headers);
        self
    }

    pub fn build(self) -> Client {
        let instrumentation = match self.instrumentation {
            InstrumentationChoice::FromTransport => self.transport.instrumentation(),
            InstrumentationChoice::Custom(instrumentation) => Some(instrumentation),
            InstrumentationChoice::Disabled => None,
        };
        Client {
            inner: Arc::new(ClientInner {
                transport: self.transport,
                instrumentation,
                default_headers: self.default_headers,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use crate::instrument::TracingInstrumentation;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        lookups: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Transport for Counting {
        async fn perform(&self, _request: TransportRequest) -> Result<Response, Error> {
            Err(Error::Cancelled)
        }

        fn instrumentation(&self) -> Option<Arc<dyn Instrumentation>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Some(Arc::new(TracingInstrumentation::new()))
        }
    }

    struct Silent;

    impl Instrumentation for Silent {
        fn start(&self, _endpoint: &'static Endpoint) -> Box<dyn Scope> {
            struct Nothing;
            impl Scope for Nothing {}
            Box::new(Nothing)
        }
    }

    #[test]
    fn transport_instrumentation_is_read_once_at_construction() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let client = Client::new(Counting {
            lookups: lookups.clone(),
        });
        let _clone = client.clone();
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
        assert!(client.inner.instrumentation.is_some());
    }

    #[test]
    fn builder_overrides_or_disables_instrumentation() {
        let lookups = Arc::new(AtomicUsize::new(0));
        let client = Client::builder(Counting {
            lookups: lookups.clone(),
        })
        .without_instrumentation()
        .build();
        assert!(client.inner.instrumentation.is_none());

        let client = Client::builder(Counting {
            lookups: lookups.clone(),
        })
        .instrumentation(Arc::new(Silent))
        .build();
        assert!(client.inner.instrumentation.is_some());
        assert_eq!(lookups.load(Ordering::SeqCst), 0);
    }
}
