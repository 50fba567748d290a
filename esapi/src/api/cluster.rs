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

use super::{
    ALLOW_NO_INDICES, EXPAND_WILDCARDS, FLAT_SETTINGS, IGNORE_UNAVAILABLE, LOCAL, MASTER_TIMEOUT,
    TIMEOUT, WAIT_FOR_ACTIVE_SHARDS,
};
use crate::endpoint::{BodySpec, Endpoint, Method, Param, ParamKind, Part, PartKind, Route, Segment};

pub static HEALTH: Endpoint = Endpoint {
    name: "cluster.health",
    description: "Get the cluster health status.\nOptionally restricted to a list of indices.",
    parts: &[Part::optional(
        "index",
        PartKind::List,
        "Data streams, indices and aliases used to limit the request. Supports wildcards (`*`).",
    )],
    routes: &[
        Route::new(
            Method::Get,
            &[Segment::Literal("_cluster"), Segment::Literal("health")],
        ),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cluster"),
                Segment::Literal("health"),
                Segment::Part("index"),
            ],
        ),
    ],
    params: &[
        EXPAND_WILDCARDS,
        Param::new(
            "level",
            ParamKind::Enum(&["cluster", "indices", "shards"]),
            "Level of detail for the returned health information.",
        ),
        LOCAL,
        MASTER_TIMEOUT,
        TIMEOUT,
        WAIT_FOR_ACTIVE_SHARDS,
        Param::new(
            "wait_for_events",
            ParamKind::Enum(&["immediate", "urgent", "high", "normal", "low", "languid"]),
            "Wait until all queued events with this priority or higher are processed.",
        ),
        Param::new(
            "wait_for_nodes",
            ParamKind::String,
            "Wait until this number of nodes is available, e.g. `>=12`.",
        ),
        Param::new(
            "wait_for_no_initializing_shards",
            ParamKind::Boolean,
            "Wait until there are no initializing shards in the cluster.",
        ),
        Param::new(
            "wait_for_no_relocating_shards",
            ParamKind::Boolean,
            "Wait until there are no relocating shards in the cluster.",
        ),
        Param::new(
            "wait_for_status",
            ParamKind::Enum(&["green", "yellow", "red"]),
            "Wait until the cluster reaches this status or better.",
        ),
    ],
    body: BodySpec::None,
};

pub static STATS: Endpoint = Endpoint {
    name: "cluster.stats",
    description: "Get cluster statistics.\nReturns basic index metrics and information about the current nodes.",
    parts: &[Part::optional(
        "node_id",
        PartKind::List,
        "Node filters used to limit returned information.",
    )],
    routes: &[
        Route::new(
            Method::Get,
            &[Segment::Literal("_cluster"), Segment::Literal("stats")],
        ),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cluster"),
                Segment::Literal("stats"),
                Segment::Literal("nodes"),
                Segment::Part("node_id"),
            ],
        ),
    ],
    params: &[
        Param::new(
            "include_remotes",
            ParamKind::Boolean,
            "Include remote cluster data in the response.",
        ),
        TIMEOUT,
    ],
    body: BodySpec::None,
};

pub static STATE: Endpoint = Endpoint {
    name: "cluster.state",
    description: "Get the cluster state.\nReturns an internal representation of the cluster state for debugging.",
    parts: &[
        Part::optional(
            "metric",
            PartKind::List,
            "Metrics to return, e.g. `metadata`, `nodes` or `routing_table`.",
        ),
        Part::optional(
            "index",
            PartKind::List,
            "Indices used to limit the request. Only used together with a metric.",
        ),
    ],
    routes: &[
        Route::new(
            Method::Get,
            &[Segment::Literal("_cluster"), Segment::Literal("state")],
        ),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cluster"),
                Segment::Literal("state"),
                Segment::Part("metric"),
            ],
        ),
        Route::new(
            Method::Get,
            &[
                Segment::Literal("_cluster"),
                Segment::Literal("state"),
                Segment::Part("metric"),
                Segment::Part("index"),
            ],
        ),
    ],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        FLAT_SETTINGS,
        IGNORE_UNAVAILABLE,
        LOCAL,
        MASTER_TIMEOUT,
        Param::new(
            "wait_for_metadata_version",
            ParamKind::Integer,
            "Wait for the metadata version to be equal or greater than this value.",
        ),
        Param::new(
            "wait_for_timeout",
            ParamKind::Duration,
            "Maximum time to wait for `wait_for_metadata_version`.",
        ),
    ],
    body: BodySpec::None,
};
