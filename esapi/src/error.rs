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

use thiserror::Error;

/// Errors produced while building or dispatching a request.
///
/// Validation variants are returned before the transport is touched.
/// Transport failures are passed through inside [`Error::Transport`] with
/// the original error as source, so callers can downcast it.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required path parameter was absent or empty.
    #[error("{endpoint}: missing required parameter `{name}`")]
    MissingParameter {
        endpoint: &'static str,
        name: &'static str,
    },

    /// The endpoint does not declare a parameter with this name.
    #[error("{endpoint}: unknown parameter `{name}`")]
    UnknownParameter {
        endpoint: &'static str,
        name: String,
    },

    /// The value does not fit the declared kind of the parameter.
    #[error("{endpoint}: invalid value for `{name}`: {reason}")]
    InvalidParameter {
        endpoint: &'static str,
        name: &'static str,
        reason: String,
    },

    /// The endpoint requires a request body and none was given.
    #[error("{endpoint}: a request body is required")]
    MissingBody { endpoint: &'static str },

    /// The endpoint does not accept a request body.
    #[error("{endpoint}: this endpoint does not accept a request body")]
    UnexpectedBody { endpoint: &'static str },

    /// None of the endpoint's routes can be built from the given parts.
    #[error("{endpoint}: no route matches the given path parameters")]
    NoRoute { endpoint: &'static str },

    /// URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid header name
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Query string encoding failed.
    #[error("Form encoding failed: {0}")]
    FormEncode(#[from] serde_urlencoded::ser::Error),

    /// JSON (de)serialization of a body failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The transport failed to deliver the request or read the response.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The caller's cancellation token fired before the transport finished.
    #[error("Request cancelled")]
    Cancelled,

    /// Non-success status, produced only by
    /// [`Response::error_for_status_code`](crate::Response::error_for_status_code).
    #[error("HTTP {status}")]
    Status { status: http::StatusCode },
}

impl Error {
    /// Wraps any transport-level failure, keeping it as the error source.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// Returns `true` when the error was raised by local validation, before
    /// anything was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter { .. }
                | Error::UnknownParameter { .. }
                | Error::InvalidParameter { .. }
                | Error::MissingBody { .. }
                | Error::UnexpectedBody { .. }
                | Error::NoRoute { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::fmt;

    #[derive(Debug)]
    struct Refused;

    impl fmt::Display for Refused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection refused")
        }
    }

    impl std::error::Error for Refused {}

    #[test]
    fn transport_error_keeps_source() {
        let err = Error::transport(Refused);
        assert_eq!(err.to_string(), "Transport error: connection refused");
        let source = err.source().expect("source should be kept");
        assert!(source.downcast_ref::<Refused>().is_some());
        assert!(!err.is_validation());
    }

    #[test]
    fn missing_parameter_names_endpoint_and_parameter() {
        let err = Error::MissingParameter {
            endpoint: "get",
            name: "id",
        };
        assert_eq!(err.to_string(), "get: missing required parameter `id`");
        assert!(err.is_validation());
    }
}
