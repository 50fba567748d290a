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

//! Data-driven request runtime for the Elasticsearch REST API.
//!
//! Every operation is a static [`Endpoint`] descriptor. A [`RequestBuilder`]
//! collects path parts, query parameters, headers and a body, and checks them
//! against the descriptor. A [`Client`] turns the resulting [`Request`] into a
//! method, path and query string and hands it to a [`Transport`].
//!
//! ```ignore
//! use esapi::{Client, ElasticsearchTransport, Request, api};
//!
//! let client = Client::new(ElasticsearchTransport::single_node("http://localhost:9200")?);
//! let response = client
//!     .send(Request::builder(&api::core::GET).part("index", "books").part("id", "1"))
//!     .await?;
//! println!("{}", response.text().await?);
//! ```

pub mod api;
pub mod client;
pub mod elasticsearch;
pub mod endpoint;
pub mod error;
pub mod headers;
pub mod instrument;
pub mod path;
pub mod query;
pub mod request;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use self::elasticsearch::ElasticsearchTransport;
pub use endpoint::{BodySpec, Endpoint, Method, Param, ParamKind, Part, PartKind, Route, Segment};
pub use error::Error;
pub use instrument::{Instrumentation, Scope, TracingInstrumentation};
pub use query::{CommonParams, QueryValue};
pub use request::{PartValue, Request, RequestBuilder};
pub use transport::{Response, ResponseBody, Transport, TransportRequest};
