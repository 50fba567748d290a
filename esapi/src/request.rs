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

use crate::endpoint::{BodySpec, Endpoint, ParamKind, PartKind};
use crate::error::Error;
use crate::query::{CommonParams, QueryValue};
use bytes::Bytes;
use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Value of a path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Single(String),
    List(Vec<String>),
}

impl PartValue {
    /// Value as it goes into the path, before percent-encoding. List items
    /// are joined with `,` in input order.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            PartValue::Single(value) => value.clone(),
            PartValue::List(values) => values.join(","),
        }
    }

    /// An empty string or an empty list.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            PartValue::Single(value) => value.is_empty(),
            PartValue::List(values) => values.is_empty(),
        }
    }
}

/// One call to one endpoint, ready for dispatch.
///
/// Produced by [`RequestBuilder::build`], which has already checked every
/// value against the endpoint descriptor. A request is consumed by
/// [`Client::perform`](crate::Client::perform).
#[derive(Debug)]
pub struct Request {
    pub(crate) endpoint: &'static Endpoint,
    pub(crate) parts: HashMap<&'static str, PartValue>,
    pub(crate) params: HashMap<&'static str, QueryValue>,
    pub(crate) common: CommonParams,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Bytes>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancellation: Option<CancellationToken>,
    pub(crate) instrument: bool,
}

impl Request {
    /// Starts building a request for `endpoint`.
    #[must_use]
    pub fn builder(endpoint: &'static Endpoint) -> RequestBuilder {
        RequestBuilder::new(endpoint)
    }

    #[must_use]
    pub fn endpoint(&self) -> &'static Endpoint {
        self.endpoint
    }

    /// Path parameter value, if set and not blank.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&PartValue> {
        self.parts.get(name).filter(|value| !value.is_blank())
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&QueryValue> {
        self.params.get(name)
    }

    #[must_use]
    pub fn common(&self) -> &CommonParams {
        &self.common
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn is_instrumented(&self) -> bool {
        self.instrument
    }

    /// Builds the URL path, e.g. `/my-index/_doc/1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRoute`] when no route of the endpoint can be
    /// satisfied by the parts that are set.
    pub fn path(&self) -> Result<String, Error> {
        crate::path::build(self, |_, _| {}).map(|built| built.path)
    }

    /// Encoded query parameters, in encoding order.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        crate::query::encode(self)
    }
}

/// Builder for [`Request`], replacing per-endpoint option functions.
///
/// Setters never fail: the first problem is remembered and returned by
/// [`build`](RequestBuilder::build), so calls can be chained freely.
///
/// ```ignore
/// let request = Request::builder(&api::core::SEARCH)
///     .parts("index", ["logs-1", "logs-2"])
///     .param("from", 10)
///     .param("size", 20)
///     .pretty()
///     .build()?;
/// ```
#[derive(Debug)]
#[must_use]
pub struct RequestBuilder {
    request: Result<Request, Error>,
}

impl RequestBuilder {
    pub fn new(endpoint: &'static Endpoint) -> Self {
        RequestBuilder {
            request: Ok(Request {
                endpoint,
                parts: HashMap::new(),
                params: HashMap::new(),
                common: CommonParams::default(),
                headers: HeaderMap::new(),
                body: None,
                timeout: None,
                cancellation: None,
                instrument: true,
            }),
        }
    }

    fn and_then<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Request) -> Result<(), Error>,
    {
        if let Ok(request) = &mut self.request {
            if let Err(err) = f(request) {
                self.request = Err(err);
            }
        }
        self
    }

    /// Sets a path parameter to a single value. On a list-valued part this
    /// is a one-element list, or an empty list for an empty value.
    pub fn part(self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        self.and_then(|request| {
            let part = request
                .endpoint
                .part(name)
                .ok_or_else(|| Error::UnknownParameter {
                    endpoint: request.endpoint.name,
                    name: name.to_string(),
                })?;
            let value = match part.kind {
                PartKind::Single => PartValue::Single(value),
                PartKind::List if value.is_empty() => PartValue::List(Vec::new()),
                PartKind::List => PartValue::List(vec![value]),
            };
            request.parts.insert(part.name, value);
            Ok(())
        })
    }

    /// Sets a list-valued path parameter. Order is preserved. An empty item
    /// makes the request invalid, whether the part is required or not.
    pub fn parts<I, S>(self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.and_then(|request| {
            let endpoint = request.endpoint;
            let part = endpoint
                .part(name)
                .ok_or_else(|| Error::UnknownParameter {
                    endpoint: endpoint.name,
                    name: name.to_string(),
                })?;
            if values.len() > 1 && values.iter().any(String::is_empty) {
                return Err(Error::InvalidParameter {
                    endpoint: endpoint.name,
                    name: part.name,
                    reason: format!("empty item in `{}`", values.join(",")),
                });
            }
            let value = match part.kind {
                PartKind::List if values.iter().all(String::is_empty) => PartValue::List(Vec::new()),
                PartKind::List => PartValue::List(values),
                PartKind::Single if values.len() == 1 => PartValue::Single(values.remove(0)),
                PartKind::Single => {
                    return Err(Error::InvalidParameter {
                        endpoint: endpoint.name,
                        name: part.name,
                        reason: format!("expects a single value, got {}", values.len()),
                    });
                }
            };
            request.parts.insert(part.name, value);
            Ok(())
        })
    }

    /// Sets a query parameter. The value must fit the declared kind.
    pub fn param(self, name: &str, value: impl Into<QueryValue>) -> Self {
        let value = value.into();
        self.and_then(|request| {
            let endpoint = request.endpoint;
            let param = endpoint
                .param(name)
                .ok_or_else(|| Error::UnknownParameter {
                    endpoint: endpoint.name,
                    name: name.to_string(),
                })?;
            let value = check_kind(param.kind, value).map_err(|reason| Error::InvalidParameter {
                endpoint: endpoint.name,
                name: param.name,
                reason,
            })?;
            request.params.insert(param.name, value);
            Ok(())
        })
    }

    pub fn pretty(self) -> Self {
        self.and_then(|request| {
            request.common.pretty = true;
            Ok(())
        })
    }

    pub fn human(self) -> Self {
        self.and_then(|request| {
            request.common.human = true;
            Ok(())
        })
    }

    pub fn error_trace(self) -> Self {
        self.and_then(|request| {
            request.common.error_trace = true;
            Ok(())
        })
    }

    pub fn filter_path<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        self.and_then(|request| {
            request.common.filter_path = paths;
            Ok(())
        })
    }

    /// Replaces all common parameters at once.
    pub fn common(self, common: CommonParams) -> Self {
        self.and_then(|request| {
            request.common = common;
            Ok(())
        })
    }

    /// Appends a header. Existing values under the same name are kept.
    pub fn header(self, name: &str, value: &str) -> Self {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(Error::from)
            .and_then(|name| Ok((name, HeaderValue::from_str(value)?)));
        self.and_then(|request| {
            let (name, value) = header?;
            request.headers.append(name, value);
            Ok(())
        })
    }

    /// Appends every header of `headers`.
    pub fn headers(self, headers: HeaderMap) -> Self {
        self.and_then(|request| {
            crate::headers::merge(&mut request.headers, headers);
            Ok(())
        })
    }

    /// Sets a raw body. It is sent with the endpoint's content type.
    pub fn body(self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.and_then(|request| {
            request.body = Some(body);
            Ok(())
        })
    }

    /// Serializes `body` to JSON and sets it as the body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        let body = serde_json::to_vec(body);
        self.and_then(|request| {
            request.body = Some(Bytes::from(body?));
            Ok(())
        })
    }

    /// Forwarded to the transport; this layer enforces no timeout itself.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.and_then(|request| {
            request.timeout = Some(timeout);
            Ok(())
        })
    }

    /// Forwarded to the transport, which abandons the call once the token
    /// is cancelled.
    pub fn cancellation(self, token: CancellationToken) -> Self {
        self.and_then(|request| {
            request.cancellation = Some(token);
            Ok(())
        })
    }

    /// Skips instrumentation for this request only.
    pub fn without_instrumentation(self) -> Self {
        self.and_then(|request| {
            request.instrument = false;
            Ok(())
        })
    }

    /// Validates the collected values and returns the request.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by a setter, then
    /// [`Error::MissingParameter`] for a required part that is unset or
    /// blank, then [`Error::MissingBody`] or [`Error::UnexpectedBody`] when
    /// the body does not match the endpoint.
    pub fn build(self) -> Result<Request, Error> {
        let request = self.request?;
        let endpoint = request.endpoint;

        for part in endpoint.parts.iter().filter(|part| part.required) {
            if request.part(part.name).is_none() {
                return Err(Error::MissingParameter {
                    endpoint: endpoint.name,
                    name: part.name,
                });
            }
        }

        match (endpoint.body, &request.body) {
            (BodySpec::Required(_), None) => {
                return Err(Error::MissingBody {
                    endpoint: endpoint.name,
                });
            }
            (BodySpec::None, Some(_)) => {
                return Err(Error::UnexpectedBody {
                    endpoint: endpoint.name,
                });
            }
            _ => {}
        }

        Ok(request)
    }
}

fn check_kind(kind: ParamKind, value: QueryValue) -> Result<QueryValue, String> {
    match (kind, value) {
        (ParamKind::Flag | ParamKind::Boolean, value @ QueryValue::Bool(_))
        | (ParamKind::String, value @ QueryValue::String(_))
        | (ParamKind::List, value @ QueryValue::List(_))
        | (ParamKind::Integer, value @ QueryValue::Integer(_))
        | (ParamKind::Number, value @ QueryValue::Number(_))
        | (ParamKind::Duration, value @ QueryValue::Duration(_)) => Ok(value),
        (ParamKind::List, QueryValue::String(value)) => Ok(QueryValue::List(vec![value])),
        (ParamKind::Duration, QueryValue::String(value)) if value == "-1" || value == "0" => {
            Ok(QueryValue::String(value))
        }
        #[allow(clippy::cast_precision_loss)]
        (ParamKind::Number, QueryValue::Integer(value)) => Ok(QueryValue::Number(value as f64)),
        (ParamKind::Enum(values), QueryValue::String(value)) => {
            if values.contains(&value.as_str()) {
                Ok(QueryValue::String(value))
            } else {
                Err(format!(
                    "expected one of [{}], got `{value}`",
                    values.join(", ")
                ))
            }
        }
        (kind, value) => Err(format!("{value:?} does not fit a {kind:?} parameter")),
    }
}
