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

//! Compact, human readable `_cat` APIs.

use super::{EXPAND_WILDCARDS, MASTER_TIMEOUT};
use crate::endpoint::{BodySpec, Endpoint, Method, Param, ParamKind, Part, PartKind, Route, Segment};

const FORMAT: Param = Param::new(
    "format",
    ParamKind::String,
    "Response format, e.g. `json`, `yaml` or `text`.",
);
const H: Param = Param::new("h", ParamKind::List, "Columns to display.");
const HELP: Param = Param::new("help", ParamKind::Flag, "Print the available columns.");
const S: Param = Param::new("s", ParamKind::List, "Columns to sort by.");
const V: Param = Param::new("v", ParamKind::Flag, "Print column headings.");
const BYTES: Param = Param::new(
    "bytes",
    ParamKind::Enum(&["b", "kb", "mb", "gb", "tb", "pb"]),
    "Unit used to display byte values.",
);
const TIME: Param = Param::new(
    "time",
    ParamKind::Enum(&["nanos", "micros", "ms", "s", "m", "h", "d"]),
    "Unit used to display time values.",
);

pub static INDICES: Endpoint = Endpoint {
    name: "cat.indices",
    description: "Get index information.\nReturns high-level information about indices in a cluster.",
    parts: &[Part::optional(
        "index",
        PartKind::List,
        "Data streams, indices and aliases to limit the request. Supports wildcards (`*`).",
    )],
    routes: &[
        Route::new(Method::Get, &[Segment::Literal("_cat"), Segment::Literal("indices")]),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cat"),
                Segment::Literal("indices"),
                Segment::Part("index"),
            ],
        ),
    ],
    params: &[
        FORMAT,
        H,
        HELP,
        S,
        V,
        BYTES,
        EXPAND_WILDCARDS,
        Param::new(
            "health",
            ParamKind::Enum(&["green", "yellow", "red"]),
            "Only show indices with this health status.",
        ),
        Param::new(
            "include_unloaded_segments",
            ParamKind::Boolean,
            "Include information from segments not loaded into memory.",
        ),
        Param::new(
            "pri",
            ParamKind::Flag,
            "Only return information from primary shards.",
        ),
        TIME,
        MASTER_TIMEOUT,
    ],
    body: BodySpec::None,
};

pub static HEALTH: Endpoint = Endpoint {
    name: "cat.health",
    description: "Get the cluster health status.",
    parts: &[],
    routes: &[Route::new(
        Method::Get,
        &[Segment::Literal("_cat"), Segment::Literal("health")],
    )],
    params: &[
        FORMAT,
        H,
        HELP,
        S,
        V,
        TIME,
        Param::new("ts", ParamKind::Boolean, "Include a timestamp column."),
    ],
    body: BodySpec::None,
};

pub static COUNT: Endpoint = Endpoint {
    name: "cat.count",
    description: "Get a document count.\nProvides quick access to a document count for a data stream, an index, or an entire cluster.",
    parts: &[Part::optional(
        "index",
        PartKind::List,
        "Data streams, indices and aliases used to limit the request. Supports wildcards (`*`).",
    )],
    routes: &[
        Route::new(Method::Get, &[Segment::Literal("_cat"), Segment::Literal("count")]),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cat"),
                Segment::Literal("count"),
                Segment::Part("index"),
            ],
        ),
    ],
    params: &[FORMAT, H, HELP, S, V],
    body: BodySpec::None,
};

pub static ALIASES: Endpoint = Endpoint {
    name: "cat.aliases",
    description: "Get aliases.\nReturns the cluster's index aliases, including filter and routing information.",
    parts: &[Part::optional(
        "name",
        PartKind::List,
        "Aliases used to limit the request. Supports wildcards (`*`).",
    )],
    routes: &[
        Route::new(Method::Get, &[Segment::Literal("_cat"), Segment::Literal("aliases")]),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cat"),
                Segment::Literal("aliases"),
                Segment::Part("name"),
            ],
        ),
    ],
    params: &[FORMAT, H, HELP, S, V, EXPAND_WILDCARDS, MASTER_TIMEOUT],
    body: BodySpec::None,
};
