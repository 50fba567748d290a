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

//! Catalog of endpoint descriptors, one module per namespace.

pub mod cat;
pub mod cluster;
pub mod core;
pub mod indices;

use crate::endpoint::{Endpoint, Param, ParamKind};

/// Every endpoint of the catalog.
pub static ENDPOINTS: &[&Endpoint] = &[
    &core::INFO,
    &core::PING,
    &core::GET,
    &core::EXISTS,
    &core::GET_SOURCE,
    &core::INDEX,
    &core::CREATE,
    &core::DELETE,
    &core::UPDATE,
    &core::SEARCH,
    &core::COUNT,
    &core::BULK,
    &core::MGET,
    &core::MSEARCH,
    &core::DELETE_BY_QUERY,
    &core::OPEN_POINT_IN_TIME,
    &core::CLOSE_POINT_IN_TIME,
    &cat::INDICES,
    &cat::HEALTH,
    &cat::COUNT,
    &cat::ALIASES,
    &cluster::HEALTH,
    &cluster::STATS,
    &cluster::STATE,
    &indices::CREATE,
    &indices::DELETE,
    &indices::EXISTS,
    &indices::GET,
    &indices::REFRESH,
    &indices::GET_MAPPING,
    &indices::PUT_MAPPING,
    &indices::PUT_ALIAS,
    &indices::DELETE_ALIAS,
];

/// Looks up an endpoint by its dotted name, e.g. `indices.create`.
#[must_use]
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS
        .iter()
        .copied()
        .find(|endpoint| endpoint.name == name)
}

// Query parameters shared by many endpoints.

pub(crate) const TIMEOUT: Param = Param::new(
    "timeout",
    ParamKind::Duration,
    "Period to wait for a response.",
);
pub(crate) const MASTER_TIMEOUT: Param = Param::new(
    "master_timeout",
    ParamKind::Duration,
    "Period to wait for a connection to the master node.",
);
pub(crate) const EXPAND_WILDCARDS: Param = Param::new(
    "expand_wildcards",
    ParamKind::List,
    "Type of index that wildcard patterns can match (all, open, closed, hidden, none).",
);
pub(crate) const ALLOW_NO_INDICES: Param = Param::new(
    "allow_no_indices",
    ParamKind::Boolean,
    "Whether to ignore wildcard expressions that resolve to no concrete index.",
);
pub(crate) const IGNORE_UNAVAILABLE: Param = Param::new(
    "ignore_unavailable",
    ParamKind::Boolean,
    "Whether missing or closed indices are ignored.",
);
pub(crate) const ROUTING: Param = Param::new(
    "routing",
    ParamKind::List,
    "Custom value used to route operations to a specific shard.",
);
pub(crate) const PREFERENCE: Param = Param::new(
    "preference",
    ParamKind::String,
    "Nodes and shards used for the operation.",
);
pub(crate) const REFRESH: Param = Param::new(
    "refresh",
    ParamKind::Enum(&["true", "false", "wait_for"]),
    "Whether to refresh the affected shards to make the change visible to search.",
);
pub(crate) const WAIT_FOR_ACTIVE_SHARDS: Param = Param::new(
    "wait_for_active_shards",
    ParamKind::String,
    "Number of shard copies that must be active before proceeding (a number or `all`).",
);
pub(crate) const SOURCE: Param = Param::new(
    "_source",
    ParamKind::List,
    "True or false to return the _source field, or a list of fields to return.",
);
pub(crate) const SOURCE_EXCLUDES: Param = Param::new(
    "_source_excludes",
    ParamKind::List,
    "Source fields to exclude from the response.",
);
pub(crate) const SOURCE_INCLUDES: Param = Param::new(
    "_source_includes",
    ParamKind::List,
    "Source fields to include in the response.",
);
pub(crate) const STORED_FIELDS: Param = Param::new(
    "stored_fields",
    ParamKind::List,
    "Stored fields to return.",
);
pub(crate) const VERSION: Param = Param::new(
    "version",
    ParamKind::Integer,
    "Explicit version number for concurrency control.",
);
pub(crate) const VERSION_TYPE: Param = Param::new(
    "version_type",
    ParamKind::Enum(&["internal", "external", "external_gte", "force"]),
    "Version type.",
);
pub(crate) const IF_SEQ_NO: Param = Param::new(
    "if_seq_no",
    ParamKind::Integer,
    "Only perform the operation if the document has this sequence number.",
);
pub(crate) const IF_PRIMARY_TERM: Param = Param::new(
    "if_primary_term",
    ParamKind::Integer,
    "Only perform the operation if the document has this primary term.",
);
pub(crate) const PIPELINE: Param = Param::new(
    "pipeline",
    ParamKind::String,
    "Ingest pipeline used to preprocess incoming documents.",
);
pub(crate) const REQUIRE_ALIAS: Param = Param::new(
    "require_alias",
    ParamKind::Boolean,
    "Whether the target must be an index alias.",
);
pub(crate) const LOCAL: Param = Param::new(
    "local",
    ParamKind::Boolean,
    "Return local information, do not retrieve the state from the master node.",
);
pub(crate) const FLAT_SETTINGS: Param = Param::new(
    "flat_settings",
    ParamKind::Boolean,
    "Return settings in flat format.",
);
pub(crate) const INCLUDE_DEFAULTS: Param = Param::new(
    "include_defaults",
    ParamKind::Boolean,
    "Return all default settings in the response.",
);
pub(crate) const Q: Param = Param::new(
    "q",
    ParamKind::String,
    "Query in the Lucene query string syntax.",
);
pub(crate) const ANALYZER: Param = Param::new(
    "analyzer",
    ParamKind::String,
    "Analyzer to use for the query string.",
);
pub(crate) const ANALYZE_WILDCARD: Param = Param::new(
    "analyze_wildcard",
    ParamKind::Boolean,
    "Whether wildcard and prefix queries are analyzed.",
);
pub(crate) const DEFAULT_OPERATOR: Param = Param::new(
    "default_operator",
    ParamKind::Enum(&["and", "or", "AND", "OR"]),
    "Default operator for the query string query.",
);
pub(crate) const DF: Param = Param::new(
    "df",
    ParamKind::String,
    "Field to use as default where no field prefix is given in the query string.",
);
pub(crate) const LENIENT: Param = Param::new(
    "lenient",
    ParamKind::Boolean,
    "Ignore format-based query failures.",
);
pub(crate) const TERMINATE_AFTER: Param = Param::new(
    "terminate_after",
    ParamKind::Integer,
    "Maximum number of documents to collect for each shard.",
);
pub(crate) const SEARCH_TYPE: Param = Param::new(
    "search_type",
    ParamKind::Enum(&["query_then_fetch", "dfs_query_then_fetch"]),
    "How distributed term frequencies are calculated for relevance scoring.",
);
pub(crate) const REST_TOTAL_HITS_AS_INT: Param = Param::new(
    "rest_total_hits_as_int",
    ParamKind::Boolean,
    "Return hits.total as an integer.",
);
pub(crate) const TYPED_KEYS: Param = Param::new(
    "typed_keys",
    ParamKind::Boolean,
    "Prefix aggregation and suggester names with their types in the response.",
);
