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

//! Endpoints outside any namespace: documents, search and cluster info.

use super::{
    ALLOW_NO_INDICES, ANALYZE_WILDCARD, ANALYZER, DEFAULT_OPERATOR, DF, EXPAND_WILDCARDS,
    IF_PRIMARY_TERM, IF_SEQ_NO, IGNORE_UNAVAILABLE, LENIENT, PIPELINE, PREFERENCE, Q, REFRESH,
    REQUIRE_ALIAS, REST_TOTAL_HITS_AS_INT, ROUTING, SEARCH_TYPE, SOURCE, SOURCE_EXCLUDES,
    SOURCE_INCLUDES, STORED_FIELDS, TERMINATE_AFTER, TIMEOUT, TYPED_KEYS, VERSION, VERSION_TYPE,
    WAIT_FOR_ACTIVE_SHARDS,
};
use crate::endpoint::{
    BodySpec, Endpoint, JSON, Method, NDJSON, Param, ParamKind, Part, PartKind, Route, Segment,
};

const DOC_ID: Part = Part::required("id", PartKind::Single, "Unique identifier of the document.");
const DOC_INDEX: Part = Part::required("index", PartKind::Single, "Name of the index.");
const TARGET_INDICES: Part = Part::optional(
    "index",
    PartKind::List,
    "Data streams, indices and aliases to target. Supports wildcards (`*`).",
);

// `realtime` and `refresh` are plain booleans on the read APIs.
const REALTIME: Param = Param::new(
    "realtime",
    ParamKind::Boolean,
    "Whether the request is real-time rather than near-real-time.",
);
const READ_REFRESH: Param = Param::new(
    "refresh",
    ParamKind::Boolean,
    "Refresh the relevant shards before retrieving the document.",
);

pub static INFO: Endpoint = Endpoint {
    name: "info",
    description: "Get cluster info.\nReturns basic information about the cluster.",
    parts: &[],
    routes: &[Route::new(Method::Get, &[])],
    params: &[],
    body: BodySpec::None,
};

pub static PING: Endpoint = Endpoint {
    name: "ping",
    description: "Ping the cluster.\nReturns whether the cluster is running.",
    parts: &[],
    routes: &[Route::new(Method::Head, &[])],
    params: &[],
    body: BodySpec::None,
};

pub static GET: Endpoint = Endpoint {
    name: "get",
    description: "Get a document by its ID.\nRetrieves the document with the specified ID from an index.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Get,
        &[
            Segment::Part("index"),
            Segment::Literal("_doc"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        PREFERENCE,
        REALTIME,
        READ_REFRESH,
        ROUTING,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        STORED_FIELDS,
        VERSION,
        VERSION_TYPE,
    ],
    body: BodySpec::None,
};

pub static EXISTS: Endpoint = Endpoint {
    name: "exists",
    description: "Check a document.\nChecks if a specified document exists.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Head,
        &[
            Segment::Part("index"),
            Segment::Literal("_doc"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        PREFERENCE,
        REALTIME,
        READ_REFRESH,
        ROUTING,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        STORED_FIELDS,
        VERSION,
        VERSION_TYPE,
    ],
    body: BodySpec::None,
};

pub static GET_SOURCE: Endpoint = Endpoint {
    name: "get_source",
    description: "Get a document's source.\nReturns the source of a document without its metadata.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Get,
        &[
            Segment::Part("index"),
            Segment::Literal("_source"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        PREFERENCE,
        REALTIME,
        READ_REFRESH,
        ROUTING,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        VERSION,
        VERSION_TYPE,
    ],
    body: BodySpec::None,
};

pub static INDEX: Endpoint = Endpoint {
    name: "index",
    description: "Create or update a document in an index.\nWithout an ID, one is generated.",
    parts: &[
        Part::optional("id", PartKind::Single, "Unique identifier of the document."),
        DOC_INDEX,
    ],
    routes: &[
        Route::new(Method::Post, &[Segment::Part("index"), Segment::Literal("_doc")]),
        Route::new(
            Method::Put,
            &[
                Segment::Part("index"),
                Segment::Literal("_doc"),
                Segment::Part("id"),
            ],
        ),
    ],
    params: &[
        IF_PRIMARY_TERM,
        IF_SEQ_NO,
        Param::new(
            "op_type",
            ParamKind::Enum(&["index", "create"]),
            "Set to `create` to only index the document if it does not already exist.",
        ),
        PIPELINE,
        REFRESH,
        ROUTING,
        TIMEOUT,
        VERSION,
        VERSION_TYPE,
        WAIT_FOR_ACTIVE_SHARDS,
        REQUIRE_ALIAS,
    ],
    body: BodySpec::Required(JSON),
};

pub static CREATE: Endpoint = Endpoint {
    name: "create",
    description: "Create a new document in the index.\nFails if a document with the same ID already exists.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Put,
        &[
            Segment::Part("index"),
            Segment::Literal("_create"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        PIPELINE,
        REFRESH,
        ROUTING,
        TIMEOUT,
        VERSION,
        VERSION_TYPE,
        WAIT_FOR_ACTIVE_SHARDS,
    ],
    body: BodySpec::Required(JSON),
};

pub static DELETE: Endpoint = Endpoint {
    name: "delete",
    description: "Delete a document.\nRemoves a JSON document from the specified index.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Delete,
        &[
            Segment::Part("index"),
            Segment::Literal("_doc"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        IF_PRIMARY_TERM,
        IF_SEQ_NO,
        REFRESH,
        ROUTING,
        TIMEOUT,
        VERSION,
        VERSION_TYPE,
        WAIT_FOR_ACTIVE_SHARDS,
    ],
    body: BodySpec::None,
};

pub static UPDATE: Endpoint = Endpoint {
    name: "update",
    description: "Update a document.\nUpdates a document by running a script or passing a partial document.",
    parts: &[DOC_ID, DOC_INDEX],
    routes: &[Route::new(
        Method::Post,
        &[
            Segment::Part("index"),
            Segment::Literal("_update"),
            Segment::Part("id"),
        ],
    )],
    params: &[
        IF_PRIMARY_TERM,
        IF_SEQ_NO,
        Param::new("lang", ParamKind::String, "Script language."),
        REFRESH,
        REQUIRE_ALIAS,
        Param::new(
            "retry_on_conflict",
            ParamKind::Integer,
            "Number of times the operation is retried when a conflict occurs.",
        ),
        ROUTING,
        TIMEOUT,
        WAIT_FOR_ACTIVE_SHARDS,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
    ],
    body: BodySpec::Required(JSON),
};

pub static SEARCH: Endpoint = Endpoint {
    name: "search",
    description: "Run a search.\nReturns search hits that match the query defined in the request.",
    parts: &[TARGET_INDICES],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_search")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_search")],
        ),
    ],
    params: &[
        ALLOW_NO_INDICES,
        Param::new(
            "allow_partial_search_results",
            ParamKind::Boolean,
            "Return partial results if there are shard request timeouts or failures.",
        ),
        ANALYZER,
        ANALYZE_WILDCARD,
        Param::new(
            "batched_reduce_size",
            ParamKind::Integer,
            "Number of shard results reduced at once on the coordinating node.",
        ),
        DEFAULT_OPERATOR,
        DF,
        Param::new(
            "docvalue_fields",
            ParamKind::List,
            "Fields to return as the docvalue representation.",
        ),
        EXPAND_WILDCARDS,
        Param::new(
            "explain",
            ParamKind::Boolean,
            "Return detailed information about score computation.",
        ),
        Param::new("from", ParamKind::Integer, "Starting document offset."),
        IGNORE_UNAVAILABLE,
        LENIENT,
        PREFERENCE,
        Q,
        Param::new(
            "request_cache",
            ParamKind::Boolean,
            "Whether to use the request cache.",
        ),
        REST_TOTAL_HITS_AS_INT,
        ROUTING,
        Param::new(
            "scroll",
            ParamKind::Duration,
            "Period to retain the search context for scrolling.",
        ),
        SEARCH_TYPE,
        Param::new("size", ParamKind::Integer, "Number of hits to return."),
        Param::new("sort", ParamKind::List, "List of `<field>:<direction>` pairs."),
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        Param::new(
            "stats",
            ParamKind::List,
            "Specific `tag` of the request for logging and statistical purposes.",
        ),
        STORED_FIELDS,
        TERMINATE_AFTER,
        TIMEOUT,
        Param::new(
            "track_scores",
            ParamKind::Boolean,
            "Calculate and return document scores even if they are not used for sorting.",
        ),
        Param::new(
            "track_total_hits",
            ParamKind::String,
            "Number of hits matching the query to count accurately (`true`, `false` or a number).",
        ),
        TYPED_KEYS,
        Param::new(
            "version",
            ParamKind::Boolean,
            "Return document version as part of a hit.",
        ),
    ],
    body: BodySpec::Optional(JSON),
};

pub static COUNT: Endpoint = Endpoint {
    name: "count",
    description: "Count search results.\nGet the number of documents matching a query.",
    parts: &[TARGET_INDICES],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_count")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_count")],
        ),
    ],
    params: &[
        ALLOW_NO_INDICES,
        ANALYZER,
        ANALYZE_WILDCARD,
        DEFAULT_OPERATOR,
        DF,
        EXPAND_WILDCARDS,
        IGNORE_UNAVAILABLE,
        LENIENT,
        Param::new(
            "min_score",
            ParamKind::Number,
            "Only include documents with a `_score` at least this value.",
        ),
        PREFERENCE,
        Q,
        ROUTING,
        TERMINATE_AFTER,
    ],
    body: BodySpec::Optional(JSON),
};

pub static BULK: Endpoint = Endpoint {
    name: "bulk",
    description: "Bulk index or delete documents.\nPerforms multiple indexing or delete operations in a single request.",
    parts: &[Part::optional(
        "index",
        PartKind::Single,
        "Default index for items which don't provide one.",
    )],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_bulk")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_bulk")],
        ),
    ],
    params: &[
        PIPELINE,
        REFRESH,
        ROUTING,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        TIMEOUT,
        WAIT_FOR_ACTIVE_SHARDS,
        REQUIRE_ALIAS,
    ],
    body: BodySpec::Required(NDJSON),
};

pub static MGET: Endpoint = Endpoint {
    name: "mget",
    description: "Get multiple documents.\nGet multiple JSON documents by ID from one or more indices.",
    parts: &[Part::optional(
        "index",
        PartKind::Single,
        "Name of the index to retrieve documents from when ids are given without an index.",
    )],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_mget")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_mget")],
        ),
    ],
    params: &[
        PREFERENCE,
        REALTIME,
        READ_REFRESH,
        ROUTING,
        SOURCE,
        SOURCE_EXCLUDES,
        SOURCE_INCLUDES,
        STORED_FIELDS,
    ],
    body: BodySpec::Required(JSON),
};

pub static MSEARCH: Endpoint = Endpoint {
    name: "msearch",
    description: "Run multiple searches.\nThe body is a header line followed by a body line, for each search.",
    parts: &[TARGET_INDICES],
    routes: &[
        Route::new(Method::Post, &[Segment::Literal("_msearch")]),
        Route::new(
            Method::Post,
            &[Segment::Part("index"), Segment::Literal("_msearch")],
        ),
    ],
    params: &[
        Param::new(
            "ccs_minimize_roundtrips",
            ParamKind::Boolean,
            "Minimize network round-trips between the coordinating node and remote clusters.",
        ),
        Param::new(
            "max_concurrent_searches",
            ParamKind::Integer,
            "Maximum number of concurrent searches the request can run.",
        ),
        REST_TOTAL_HITS_AS_INT,
        SEARCH_TYPE,
        TYPED_KEYS,
    ],
    body: BodySpec::Required(NDJSON),
};

pub static DELETE_BY_QUERY: Endpoint = Endpoint {
    name: "delete_by_query",
    description: "Delete documents.\nDeletes documents that match the specified query.",
    parts: &[Part::required(
        "index",
        PartKind::List,
        "Data streams, indices and aliases to search. Supports wildcards (`*`).",
    )],
    routes: &[Route::new(
        Method::Post,
        &[Segment::Part("index"), Segment::Literal("_delete_by_query")],
    )],
    params: &[
        ALLOW_NO_INDICES,
        Param::new(
            "conflicts",
            ParamKind::Enum(&["abort", "proceed"]),
            "What to do if delete by query hits version conflicts.",
        ),
        EXPAND_WILDCARDS,
        IGNORE_UNAVAILABLE,
        Param::new(
            "max_docs",
            ParamKind::Integer,
            "Maximum number of documents to process.",
        ),
        Q,
        Param::new(
            "refresh",
            ParamKind::Boolean,
            "Refresh all shards involved in the delete by query after the request completes.",
        ),
        ROUTING,
        Param::new(
            "scroll_size",
            ParamKind::Integer,
            "Size of the scroll request that powers the operation.",
        ),
        Param::new(
            "slices",
            ParamKind::String,
            "Number of slices this task should be divided into (a number or `auto`).",
        ),
        TIMEOUT,
        WAIT_FOR_ACTIVE_SHARDS,
        Param::new(
            "wait_for_completion",
            ParamKind::Boolean,
            "Block until the operation is complete.",
        ),
    ],
    body: BodySpec::Required(JSON),
};

pub static OPEN_POINT_IN_TIME: Endpoint = Endpoint {
    name: "open_point_in_time",
    description: "Open a point in time.\nA point in time preserves the current index state for searches.",
    parts: &[Part::required(
        "index",
        PartKind::List,
        "Indices used to open the point in time. Supports wildcards (`*`).",
    )],
    routes: &[Route::new(
        Method::Post,
        &[Segment::Part("index"), Segment::Literal("_pit")],
    )],
    params: &[
        Param::new(
            "keep_alive",
            ParamKind::Duration,
            "How long to keep the point in time alive.",
        ),
        IGNORE_UNAVAILABLE,
        PREFERENCE,
        ROUTING,
        EXPAND_WILDCARDS,
        Param::new(
            "allow_partial_search_results",
            ParamKind::Boolean,
            "Allow a point in time to be opened when some shards are unavailable.",
        ),
    ],
    body: BodySpec::Optional(JSON),
};

pub static CLOSE_POINT_IN_TIME: Endpoint = Endpoint {
    name: "close_point_in_time",
    description: "Close a point in time.\nThe body holds the `id` returned when the point in time was opened.",
    parts: &[],
    routes: &[Route::new(Method::Delete, &[Segment::Literal("_pit")])],
    params: &[],
    body: BodySpec::Required(JSON),
};
