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

//! Static descriptions of REST operations.
//!
//! An [`Endpoint`] is plain `'static` data: its path parameters, the URL
//! templates it can be reached through, the query parameters it recognizes
//! and whether it takes a body. The runtime in [`crate::path`],
//! [`crate::query`] and [`crate::client`] is driven entirely by it.

use crate::query::{QueryValue, parse_duration};
use std::fmt::{Display, Formatter};

/// `Content-Type` of JSON request bodies.
pub const JSON: &str = "application/json";
/// `Content-Type` of newline-delimited JSON request bodies.
pub const NDJSON: &str = "application/x-ndjson";

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Head => http::Method::HEAD,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// Shape of a path parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// One string, e.g. a document id.
    Single,
    /// Strings joined with `,`, e.g. a list of indices.
    List,
}

/// A declared path parameter.
#[derive(Debug)]
pub struct Part {
    pub name: &'static str,
    pub kind: PartKind,
    pub required: bool,
    pub description: &'static str,
}

impl Part {
    pub const fn required(name: &'static str, kind: PartKind, description: &'static str) -> Self {
        Part {
            name,
            kind,
            required: true,
            description,
        }
    }

    pub const fn optional(name: &'static str, kind: PartKind, description: &'static str) -> Self {
        Part {
            name,
            kind,
            required: false,
            description,
        }
    }
}

/// One component of a URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Part(&'static str),
}

/// A URL template together with the method used to call it.
#[derive(Debug)]
pub struct Route {
    pub method: Method,
    pub segments: &'static [Segment],
}

impl Route {
    pub const fn new(method: Method, segments: &'static [Segment]) -> Self {
        Route { method, segments }
    }

    /// Names of the path parameters this route consumes, in path order.
    pub fn parts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Part(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template as it appears in the REST documentation,
    /// e.g. `/{index}/_doc/{id}`.
    #[must_use]
    pub fn template(&self) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => format!("/{literal}"),
                Segment::Part(name) => format!("/{{{name}}}"),
            })
            .collect()
    }
}

/// Value kind of a query parameter, deciding how it is validated and
/// rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Plain switch: only emitted when `true`.
    Flag,
    /// Explicit boolean: emitted as `true` or `false` whenever set.
    Boolean,
    String,
    /// Strings joined with `,`.
    List,
    Integer,
    Number,
    /// Time value rendered with a unit suffix. The literals `-1` and `0`
    /// are kept as strings.
    Duration,
    /// One of a closed set of strings.
    Enum(&'static [&'static str]),
}

impl ParamKind {
    // Parses a raw command-line value into a query value of this kind.
    //
    // # Arguments
    //
    // * `raw` - The text as typed by the user.
    //
    // # Returns
    //
    // The parsed value, or a message describing why `raw` does not fit.
    pub fn parse(self, raw: &str) -> Result<QueryValue, String> {
        match self {
            ParamKind::Flag | ParamKind::Boolean => match raw {
                "true" => Ok(QueryValue::Bool(true)),
                "false" => Ok(QueryValue::Bool(false)),
                _ => Err(format!("expected `true` or `false`, got `{raw}`")),
            },
            ParamKind::String => Ok(QueryValue::String(raw.to_string())),
            ParamKind::List => Ok(QueryValue::List(
                raw.split(',').map(str::to_string).collect(),
            )),
            ParamKind::Integer => raw
                .parse::<i64>()
                .map(QueryValue::Integer)
                .map_err(|e| format!("expected an integer, got `{raw}`: {e}")),
            ParamKind::Number => raw
                .parse::<f64>()
                .map(QueryValue::Number)
                .map_err(|e| format!("expected a number, got `{raw}`: {e}")),
            ParamKind::Duration => match raw {
                "-1" | "0" => Ok(QueryValue::String(raw.to_string())),
                _ => match parse_duration(raw)? {
                    zero if zero.is_zero() => Ok(QueryValue::String("0".to_string())),
                    duration => Ok(QueryValue::Duration(duration)),
                },
            },
            ParamKind::Enum(values) => {
                if values.contains(&raw) {
                    Ok(QueryValue::String(raw.to_string()))
                } else {
                    Err(format!(
                        "expected one of [{}], got `{raw}`",
                        values.join(", ")
                    ))
                }
            }
        }
    }
}

/// A recognized query parameter.
#[derive(Debug)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
}

impl Param {
    pub const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Param {
            name,
            kind,
            description,
        }
    }
}

/// Whether, and with which content type, an endpoint takes a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySpec {
    None,
    Optional(&'static str),
    Required(&'static str),
}

impl BodySpec {
    #[must_use]
    pub fn content_type(self) -> Option<&'static str> {
        match self {
            BodySpec::None => None,
            BodySpec::Optional(content_type) | BodySpec::Required(content_type) => {
                Some(content_type)
            }
        }
    }

    #[must_use]
    pub fn accepts_body(self) -> bool {
        !matches!(self, BodySpec::None)
    }
}

/// Static metadata of one REST operation.
#[derive(Debug)]
pub struct Endpoint {
    /// Dotted operation name, e.g. `cluster.stats`.
    pub name: &'static str,
    pub description: &'static str,
    pub parts: &'static [Part],
    pub routes: &'static [Route],
    /// Query parameters, in the order they are encoded.
    pub params: &'static [Param],
    pub body: BodySpec,
}

impl Endpoint {
    // Returns the namespace of the endpoint.
    //
    // This is the part of the name before the last dot (`.`), or "core" when
    // the name has no dot.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        match self.name.rsplit_once('.') {
            Some((namespace, _)) => namespace,
            None => "core",
        }
    }

    // Returns the part of the name after the last dot (`.`), or the full name
    // when there is no dot.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        match self.name.rsplit_once('.') {
            Some((_, name)) => name,
            None => self.name,
        }
    }

    // Returns the first line of the description.
    #[must_use]
    pub fn short_description(&self) -> &'static str {
        self.description.lines().next().unwrap_or("")
    }

    #[must_use]
    pub fn part(&self, name: &str) -> Option<&'static Part> {
        self.parts.iter().find(|part| part.name == name)
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static Param> {
        self.params.iter().find(|param| param.name == name)
    }
}
