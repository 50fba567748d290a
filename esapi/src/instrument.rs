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

//! Observation hooks around a request.
//!
//! Instrumentation never changes what is sent or returned: a scope is
//! notified of each step of [`Client::perform`](crate::Client::perform) and
//! closed once the call is over.

use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::transport::{Response, TransportRequest};
use std::time::Instant;
use tracing::{Level, Span, debug, field, trace, warn};

/// Opens one [`Scope`] per instrumented request.
pub trait Instrumentation: Send + Sync {
    fn start(&self, endpoint: &'static Endpoint) -> Box<dyn Scope>;
}

/// Observer of a single request. Every hook defaults to doing nothing.
pub trait Scope: Send {
    /// Called for each path parameter written into the path, with its value
    /// before percent-encoding.
    fn record_path_part(&mut self, _name: &str, _value: &str) {}

    /// Called right before the transport is invoked.
    fn before_request(&mut self, _request: &TransportRequest) {}

    /// Called when the transport returned a response, whatever its status.
    fn after_response(&mut self, _response: &Response) {}

    /// Called when the transport failed.
    fn record_error(&mut self, _error: &Error) {}

    /// Ends the scope.
    fn close(self: Box<Self>) {}
}

/// [`Instrumentation`] writing `tracing` spans and events.
///
/// Each request gets an `elasticsearch.request` span carrying the
/// operation name, method, path and status code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation;

impl TracingInstrumentation {
    #[must_use]
    pub fn new() -> Self {
        TracingInstrumentation
    }
}

impl Instrumentation for TracingInstrumentation {
    fn start(&self, endpoint: &'static Endpoint) -> Box<dyn Scope> {
        let span = tracing::span!(
            Level::INFO,
            "elasticsearch.request",
            db.system = "elasticsearch",
            db.operation = %endpoint.name,
            http.request.method = field::Empty,
            url.path = field::Empty,
            http.response.status_code = field::Empty,
            error = field::Empty,
        );
        Box::new(TracingScope {
            span,
            started: Instant::now(),
        })
    }
}

struct TracingScope {
    span: Span,
    started: Instant,
}

impl Scope for TracingScope {
    fn record_path_part(&mut self, name: &str, value: &str) {
        trace!(parent: &self.span, part = name, value, "path part");
    }

    fn before_request(&mut self, request: &TransportRequest) {
        self.span
            .record("http.request.method", request.method.as_str());
        self.span.record("url.path", request.path.as_str());
        debug!(
            parent: &self.span,
            method = %request.method,
            path = %request.path,
            params = request.query.len(),
            "sending request"
        );
    }

    fn after_response(&mut self, response: &Response) {
        let status = response.status_code();
        self.span
            .record("http.response.status_code", status.as_u16());
        if status.is_client_error() || status.is_server_error() {
            self.span.record("error", true);
        }
        debug!(parent: &self.span, status = status.as_u16(), "response received");
    }

    fn record_error(&mut self, error: &Error) {
        self.span.record("error", true);
        warn!(parent: &self.span, error = %error, "request failed");
    }

    fn close(self: Box<Self>) {
        let elapsed = self.started.elapsed();
        debug!(
            parent: &self.span,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "request finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{BodySpec, Method, Route, Segment};
    use crate::transport::ResponseBody;
    use http::{HeaderMap, StatusCode};
    use tracing_test::traced_test;

    static HEALTH: Endpoint = Endpoint {
        name: "cluster.health",
        description: "",
        parts: &[],
        routes: &[Route {
            method: Method::Get,
            segments: &[Segment::Literal("_cluster"), Segment::Literal("health")],
        }],
        params: &[],
        body: BodySpec::None,
    };

    fn transport_request() -> TransportRequest {
        TransportRequest {
            method: Method::Get,
            path: "/_cluster/health".to_string(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            cancellation: None,
        }
    }

    #[test]
    #[traced_test]
    fn scope_logs_request_and_response() {
        let mut scope = TracingInstrumentation::new().start(&HEALTH);
        scope.before_request(&transport_request());
        scope.after_response(&Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            ResponseBody::empty(),
        ));
        scope.close();

        assert!(logs_contain("sending request"));
        assert!(logs_contain("cluster.health"));
        assert!(logs_contain("response received"));
        assert!(logs_contain("request finished"));
    }

    #[test]
    #[traced_test]
    fn scope_logs_transport_errors() {
        let mut scope = TracingInstrumentation::new().start(&HEALTH);
        scope.record_error(&Error::Cancelled);
        scope.close();

        assert!(logs_contain("request failed"));
        assert!(logs_contain("Request cancelled"));
    }

    #[test]
    fn default_hooks_do_nothing() {
        struct Quiet;
        impl Scope for Quiet {}

        let mut scope: Box<dyn Scope> = Box::new(Quiet);
        scope.record_path_part("index", "books");
        scope.record_error(&Error::Cancelled);
        scope.close();
    }
}
