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

use clap::{Command, CommandFactory, Parser};
use esapi::query::{format_duration, parse_duration};
use esapi::{Client, Request, RequestBuilder, Response, ResponseBody, api};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Parser, Debug)]
pub struct Dump {
    #[arg(
        required = true,
        value_delimiter = ',',
        help = "List of indices to dump, comma separated"
    )]
    indices: Vec<String>,
    #[arg(
        short,
        long,
        help = "Size of each batch to dump, default is 500",
        default_value_t = 500
    )]
    size: usize,
    #[arg(
        short,
        long,
        help = "How long the point in time is kept alive between batches, default is 1 minute",
        default_value = "1m",
        value_parser = parse_duration
    )]
    keep_alive: Duration,
}

#[derive(Deserialize, Debug)]
struct PointInTime {
    id: String,
}

#[derive(Deserialize, Debug)]
struct SearchResult {
    pit_id: Option<String>,
    hits: Hits,
}

#[derive(Deserialize, Debug)]
struct Hits {
    hits: Vec<Hit>,
}

#[derive(Deserialize, Debug)]
struct Hit {
    #[serde(rename = "_index")]
    index: String,
    #[serde(rename = "_source", default)]
    source: Value,
    #[serde(default)]
    sort: Vec<Value>,
}

impl Dump {
    pub fn new_command() -> Command {
        Self::command()
            .name("dump")
            .about("Dump one or more index as ndjson.")
            .long_about(
                r#"
            This command dumps the contents of one or more indices in ndjson format.
            Each document is prefixed with an action line for bulk operations.
            The action line is in the format:
            { "index": { "_index": "<index_name>" } }

            The documents are sorted by shard and document ID.
            The command uses point-in-time (PIT) to ensure consistent reads across the index.
            The PIT is kept alive for the duration of the operation and closed at the end.

            The command supports specifying a size for each batch of documents to be dumped.
            The default size is 500 documents per batch.

            The command also supports specifying a keep-alive duration for the PIT.
            The default keep-alive duration is 1 minute.

            Example usage:
                escli utils dump index1,index2 --size 1000 --keep-alive 5m
            "#,
            )
    }

    // Dumps every index, one after the other.
    //
    // # Arguments
    //
    // * `client` - The client used for every request.
    // * `timeout` - Timeout applied to each request.
    //
    // # Returns
    //
    // A synthetic `200 OK` response whose body is the ndjson dump.
    pub async fn execute(
        self,
        client: &Client,
        timeout: Option<Duration>,
    ) -> Result<Response, esapi::Error> {
        let mut ndjson_output = String::new();

        for index in &self.indices {
            let documents = self
                .dump_index(client, index, timeout, &mut ndjson_output)
                .await?;
            tracing::debug!(index = %index, documents, "index dumped");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(esapi::endpoint::NDJSON),
        );
        Ok(Response::new(
            StatusCode::OK,
            headers,
            ResponseBody::from_bytes(ndjson_output),
        ))
    }

    // Dumps one index through a point in time, appending an action line
    // and the source of every hit to `out`. The point in time is closed
    // whether paging succeeded or not; a paging error takes precedence over
    // a close error.
    async fn dump_index(
        &self,
        client: &Client,
        index: &str,
        timeout: Option<Duration>,
        out: &mut String,
    ) -> Result<usize, esapi::Error> {
        let pit = client
            .send(with_timeout(
                Request::builder(&api::core::OPEN_POINT_IN_TIME)
                    .part("index", index)
                    .param("keep_alive", self.keep_alive),
                timeout,
            ))
            .await?
            .error_for_status_code()?
            .json::<PointInTime>()
            .await?;

        let mut pit_id = pit.id;
        let paged = self
            .page_through(client, index, timeout, &mut pit_id, out)
            .await;

        let closed = client
            .send(with_timeout(
                Request::builder(&api::core::CLOSE_POINT_IN_TIME).json(&json!({ "id": pit_id })),
                timeout,
            ))
            .await
            .and_then(Response::error_for_status_code);

        match (paged, closed) {
            (Ok(documents), Ok(_)) => Ok(documents),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(_)) => Err(err),
            (Err(err), Err(close_err)) => {
                tracing::warn!(index, error = %close_err, "failed to close point in time");
                Err(err)
            }
        }
    }

    // Reads search pages until one comes back empty. `pit_id` tracks the
    // latest point in time id returned by the cluster.
    async fn page_through(
        &self,
        client: &Client,
        index: &str,
        timeout: Option<Duration>,
        pit_id: &mut String,
        out: &mut String,
    ) -> Result<usize, esapi::Error> {
        let keep_alive = format_duration(self.keep_alive);
        let mut search_after: Option<Vec<Value>> = None;
        let mut documents = 0;

        loop {
            let mut payload = json!({
                "size": self.size,
                "pit": { "id": pit_id, "keep_alive": keep_alive },
                "query": { "match_all": {} },
                "sort": [{ "_shard_doc": { "order": "asc" } }]
            });
            if let Some(search_after) = &search_after {
                payload["search_after"] = json!(search_after);
            }

            let page = client
                .send(with_timeout(
                    Request::builder(&api::core::SEARCH).json(&payload),
                    timeout,
                ))
                .await?
                .error_for_status_code()?
                .json::<SearchResult>()
                .await?;

            if let Some(id) = page.pit_id {
                *pit_id = id;
            }
            let Some(last) = page.hits.hits.last() else {
                break;
            };
            search_after = Some(last.sort.clone());

            for hit in &page.hits.hits {
                // { "index": { "_index": "<index_name>" } }
                let action_line = json!({ "index": { "_index": hit.index } });
                out.push_str(&action_line.to_string());
                out.push('\n');
                out.push_str(&hit.source.to_string());
                out.push('\n');
            }
            documents += page.hits.hits.len();
            tracing::trace!(index, documents, "batch dumped");
        }

        Ok(documents)
    }
}

fn with_timeout(builder: RequestBuilder, timeout: Option<Duration>) -> RequestBuilder {
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}
