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

//! Index management.

use super::{
    ALLOW_NO_INDICES, EXPAND_WILDCARDS, FLAT_SETTINGS, IGNORE_UNAVAILABLE, INCLUDE_DEFAULTS, LOCAL,
    MASTER_TIMEOUT, TIMEOUT, WAIT_FOR_ACTIVE_SHARDS,
};
use crate::endpoint::{
    BodySpec, Endpoint, JSON, Method, Param, ParamKind, Part, PartKind, Route, Segment,
};

const INDICES: Part = Part::required(
    "index",
    PartKind::List,
    "Data streams, indices and aliases. Supports wildcards (`*`).",
);
const OPTIONAL_INDICES: Part = Part::optional(
    "index",
    PartKind::List,
    "Data streams, indices and aliases used to limit the request. Supports wildcards (`*`).",
);

pub static CREATE: Endpoint = Endpoint {
    name: "indices.create",
    description: "Create an index.\nSettings, mappings and aliases can be given in the body.",
    parts: &[Part::required(
        "index",
        PartKind::Single,
        "Name of the index to create.",
    )],
    routes: &[Route::new(Method::Put, &[Segment::Part("index")])],
    params: &[MASTER_TIMEOUT, TIMEOUT, WAIT_FOR_ACTIVE_SHARDS],
    body: BodySpec::Optional(JSON),
};

pub static DELETE: Endpoint = Endpoint {
    name: "indices.delete",
    description: "Delete indices.\nDeleting an index deletes its documents, shards and metadata.",
    parts: &[INDICES],
    routes: &[Route::new(Method::Delete, &[Segment::Part("index")])],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        IGNORE_UNAVAILABLE,
        MASTER_TIMEOUT,
        TIMEOUT,
    ],
    body: BodySpec::None,
};

pub static EXISTS: Endpoint = Endpoint {
    name: "indices.exists",
    description: "Check indices.\nChecks if one or more indices, index aliases or data streams exist.",
    parts: &[INDICES],
    routes: &[Route::new(Method::Head, &[Segment::Part("index")])],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        FLAT_SETTINGS,
        IGNORE_UNAVAILABLE,
        INCLUDE_DEFAULTS,
        LOCAL,
    ],
    body: BodySpec::None,
};

pub static GET: Endpoint = Endpoint {
    name: "indices.get",
    description: "Get index information.\nReturns information about one or more indices.",
    parts: &[INDICES],
    routes: &[Route::new(Method::Get, &[Segment::Part("index")])],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        FLAT_SETTINGS,
        IGNORE_UNAVAILABLE,
        INCLUDE_DEFAULTS,
        LOCAL,
        MASTER_TIMEOUT,
        Param::new(
            "features",
            ParamKind::List,
            "Features to return: `aliases`, `mappings` or `settings`.",
        ),
    ],
    body: BodySpec::None,
};

pub static REFRESH: Endpoint = Endpoint {
    name: "indices.refresh",
    description: "Refresh an index.\nMakes recent operations available for search.",
    parts: &[OPTIONAL_INDICES],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_refresh")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_refresh")],
        ),
    ],
    params: &[ALLOW_NO_INDICES, EXPAND_WILDCARDS, IGNORE_UNAVAILABLE],
    body: BodySpec::None,
};

pub static GET_MAPPING: Endpoint = Endpoint {
    name: "indices.get_mapping",
    description: "Get mapping definitions.",
    parts: &[OPTIONAL_INDICES],
    routes: &[
        Route::new(Method::Get, &[Segment::Literal("_mapping")]),
        Route::new(
            Method::Get,
            &[Segment::Part("index"), Segment::Literal("_mapping")],
        ),
    ],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        IGNORE_UNAVAILABLE,
        LOCAL,
        MASTER_TIMEOUT,
    ],
    body: BodySpec::None,
};

pub static PUT_MAPPING: Endpoint = Endpoint {
    name: "indices.put_mapping",
    description: "Update field mappings.\nAdds new fields to an existing index or changes search settings of existing fields.",
    parts: &[INDICES],
    routes: &[Route::new(
        Method::Put,
        &[Segment::Part("index"), Segment::Literal("_mapping")],
    )],
    params: &[
        ALLOW_NO_INDICES,
        EXPAND_WILDCARDS,
        IGNORE_UNAVAILABLE,
        MASTER_TIMEOUT,
        TIMEOUT,
        Param::new(
            "write_index_only",
            ParamKind::Boolean,
            "Only apply the mappings to the current write index of the targets.",
        ),
    ],
    body: BodySpec::Required(JSON),
};

pub static PUT_ALIAS: Endpoint = Endpoint {
    name: "indices.put_alias",
    description: "Create or update an alias.\nAdds a data stream or index to an alias.",
    parts: &[
        INDICES,
        Part::required("name", PartKind::Single, "Alias to update."),
    ],
    routes: &[Route::new(
        Method::Put,
        &[
            Segment::Part("index"),
            Segment::Literal("_alias"),
            Segment::Part("name"),
        ],
    )],
    params: &[MASTER_TIMEOUT, TIMEOUT],
    body: BodySpec::Optional(JSON),
};

pub static DELETE_ALIAS: Endpoint = Endpoint {
    name: "indices.delete_alias",
    description: "Delete an alias.\nRemoves a data stream or index from an alias.",
    parts: &[
        INDICES,
        Part::required(
            "name",
            PartKind::List,
            "Aliases to remove. Supports wildcards (`*`).",
        ),
    ],
    routes: &[Route::new(
        Method::Delete,
        &[
            Segment::Part("index"),
            Segment::Literal("_alias"),
            Segment::Part("name"),
        ],
    )],
    params: &[MASTER_TIMEOUT, TIMEOUT],
    body: BodySpec::None,
};
