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

use crate::endpoint::{Method, Route, Segment};
use crate::error::Error;
use crate::request::{PartValue, Request};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::cmp::Reverse;
use tracing::trace;

// Characters escaped inside one path segment. `,` and `*` stay readable.
const PATH_PART: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

// Method and path resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPath {
    pub method: Method,
    pub path: String,
}

// Selects the route used for a request.
//
// Routes are tried from the one consuming the most path parameters to the one
// consuming the fewest; ties keep declaration order. The first route whose
// parameters are all set wins, so optional parts are used whenever present.
//
// # Returns
//
// The selected route, or `Error::NoRoute` if none can be satisfied.
pub fn select_route(request: &Request) -> Result<&'static Route, Error> {
    let endpoint = request.endpoint();
    let mut routes: Vec<&'static Route> = endpoint.routes.iter().collect();
    routes.sort_by_key(|route| Reverse(route.parts().count()));

    routes
        .into_iter()
        .find(|route| route.parts().all(|name| request.part(name).is_some()))
        .ok_or(Error::NoRoute {
            endpoint: endpoint.name,
        })
}

// Builds the method and path of a request.
//
// Every segment of the selected route is written as `/` followed by the
// literal or by the percent-encoded part value. List values are joined with
// `,` before encoding each item.
//
// # Arguments
//
// * `request` - The request to build the path for.
// * `on_part` - Called with the name and raw value of every part written,
//   in path order.
pub fn build<F>(request: &Request, mut on_part: F) -> Result<BuiltPath, Error>
where
    F: FnMut(&str, &str),
{
    let route = select_route(request)?;
    trace!(
        endpoint = request.endpoint().name,
        route = %route.template(),
        "selected route"
    );

    let mut path = String::new();
    for segment in route.segments {
        path.push('/');
        match segment {
            Segment::Literal(literal) => path.push_str(literal),
            Segment::Part(name) => {
                let value = request.part(name).ok_or(Error::NoRoute {
                    endpoint: request.endpoint().name,
                })?;
                on_part(name, &value.joined());
                path.push_str(&encode_part(value));
            }
        }
    }
    if path.is_empty() {
        path.push('/');
    }

    Ok(BuiltPath {
        method: route.method,
        path,
    })
}

fn encode_part(value: &PartValue) -> String {
    match value {
        PartValue::Single(value) => utf8_percent_encode(value, PATH_PART).to_string(),
        PartValue::List(values) => values
            .iter()
            .map(|value| utf8_percent_encode(value, PATH_PART).to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{BodySpec, Endpoint, JSON, Part, PartKind};

    static SEARCH: Endpoint = Endpoint {
        name: "search",
        description: "",
        parts: &[Part::optional("index", PartKind::List, "")],
        routes: &[
            Route {
                method: Method::Post,
                segments: &[Segment::Literal("_search")],
            },
            Route {
                method: Method::Post,
                segments: &[Segment::Part("index"), Segment::Literal("_search")],
            },
        ],
        params: &[],
        body: BodySpec::Optional(JSON),
    };

    static INDEX: Endpoint = Endpoint {
        name: "index",
        description: "",
        parts: &[
            Part::optional("id", PartKind::Single, ""),
            Part::required("index", PartKind::Single, ""),
        ],
        routes: &[
            Route {
                method: Method::Post,
                segments: &[Segment::Part("index"), Segment::Literal("_doc")],
            },
            Route {
                method: Method::Put,
                segments: &[
                    Segment::Part("index"),
                    Segment::Literal("_doc"),
                    Segment::Part("id"),
                ],
            },
        ],
        params: &[],
        body: BodySpec::Required(JSON),
    };

    static INFO: Endpoint = Endpoint {
        name: "info",
        description: "",
        parts: &[],
        routes: &[Route {
            method: Method::Get,
            segments: &[],
        }],
        params: &[],
        body: BodySpec::None,
    };

    #[test]
    fn optional_part_is_omitted_with_its_separator() {
        let request = Request::builder(&SEARCH).build().unwrap();
        assert_eq!(request.path().unwrap(), "/_search");
    }

    #[test]
    fn list_part_is_comma_joined_in_order() {
        let request = Request::builder(&SEARCH)
            .parts("index", ["logs-b", "logs-a", "metrics-*"])
            .build()
            .unwrap();
        assert_eq!(request.path().unwrap(), "/logs-b,logs-a,metrics-*/_search");
    }

    #[test]
    fn route_with_most_parts_wins_and_sets_method() {
        let request = Request::builder(&INDEX)
            .part("index", "books")
            .part("id", "1")
            .body("{}")
            .build()
            .unwrap();
        let built = build(&request, |_, _| {}).unwrap();
        assert_eq!(built.method, Method::Put);
        assert_eq!(built.path, "/books/_doc/1");

        let request = Request::builder(&INDEX)
            .part("index", "books")
            .body("{}")
            .build()
            .unwrap();
        let built = build(&request, |_, _| {}).unwrap();
        assert_eq!(built.method, Method::Post);
        assert_eq!(built.path, "/books/_doc");
    }

    #[test]
    fn blank_optional_part_counts_as_absent() {
        let request = Request::builder(&INDEX)
            .part("index", "books")
            .part("id", "")
            .body("{}")
            .build()
            .unwrap();
        assert_eq!(request.path().unwrap(), "/books/_doc");
    }

    #[test]
    fn empty_item_never_falls_back_to_a_shorter_route() {
        let result = Request::builder(&SEARCH)
            .parts("index", ["logs-1", ""])
            .build()
            .and_then(|request| request.path());
        assert!(matches!(result, Err(Error::InvalidParameter { name: "index", .. })));

        let request = Request::builder(&SEARCH)
            .parts("index", ["logs-1"])
            .build()
            .unwrap();
        assert_eq!(request.path().unwrap(), "/logs-1/_search");
    }

    #[test]
    fn root_route_is_a_single_slash() {
        let request = Request::builder(&INFO).build().unwrap();
        assert_eq!(request.path().unwrap(), "/");
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        let request = Request::builder(&INDEX)
            .part("index", "books")
            .part("id", "a/b c?d#e%f")
            .body("{}")
            .build()
            .unwrap();
        assert_eq!(
            request.path().unwrap(),
            "/books/_doc/a%2Fb%20c%3Fd%23e%25f"
        );
    }

    #[test]
    fn parts_are_reported_with_raw_values() {
        let request = Request::builder(&SEARCH)
            .parts("index", ["a b", "c"])
            .build()
            .unwrap();
        let mut seen = Vec::new();
        let built = build(&request, |name, value| {
            seen.push((name.to_string(), value.to_string()));
        })
        .unwrap();
        assert_eq!(seen, vec![("index".to_string(), "a b,c".to_string())]);
        assert_eq!(built.path, "/a%20b,c/_search");
    }

    #[test]
    fn same_inputs_give_same_path() {
        let build_once = || {
            Request::builder(&INDEX)
                .part("id", "42")
                .part("index", "books")
                .body("{}")
                .build()
                .unwrap()
                .path()
                .unwrap()
        };
        assert_eq!(build_once(), build_once());
    }
}
