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

use clap::Command;
use esapi::{Client, ElasticsearchTransport};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn utils() -> Command {
    Command::new("escli").subcommand(
        Command::new("utils")
            .subcommand_required(true)
            .subcommands(staticcmds::commands()),
    )
}

async fn dump(server: &MockServer, args: &[&str]) -> Result<esapi::Response, staticcmds::Error> {
    let cmd = utils();
    let matches = cmd
        .clone()
        .try_get_matches_from(["escli", "utils", "dump"].iter().chain(args.iter()))
        .unwrap();
    let client = Client::new(ElasticsearchTransport::single_node(&server.uri()).unwrap());
    staticcmds::run_command(
        cmd,
        matches.subcommand_matches("utils").unwrap(),
        &client,
        None,
    )
    .await
}

#[tokio::test]
async fn dump_pages_through_point_in_time_and_closes_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books/_pit"))
        .and(query_param("keep_alive", "60000ms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pit-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search"))
        .and(body_partial_json(json!({"size": 2, "pit": {"id": "pit-1", "keep_alive": "60000ms"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pit_id": "pit-2",
            "hits": {"hits": [
                {"_index": "books", "_id": "1", "_source": {"title": "Dune"}, "sort": [0]},
                {"_index": "books", "_id": "2", "_source": {"title": "Emma"}, "sort": [1]}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search"))
        .and(body_partial_json(json!({"pit": {"id": "pit-2"}, "search_after": [1]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pit_id": "pit-2",
            "hits": {"hits": []}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/_pit"))
        .and(body_json(json!({"id": "pit-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"succeeded": true})))
        .expect(1)
        .mount(&server)
        .await;

    let response = dump(&server, &["books", "--size", "2"]).await.unwrap();

    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/x-ndjson"
    );
    assert_eq!(
        response.text().await.unwrap(),
        concat!(
            "{\"index\":{\"_index\":\"books\"}}\n",
            "{\"title\":\"Dune\"}\n",
            "{\"index\":{\"_index\":\"books\"}}\n",
            "{\"title\":\"Emma\"}\n",
        )
    );
}

#[tokio::test]
async fn missing_index_fails_the_dump() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/missing/_pit"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"type": "index_not_found_exception"},
            "status": 404
        })))
        .mount(&server)
        .await;

    let err = dump(&server, &["missing"]).await.unwrap_err();

    assert!(matches!(
        err,
        staticcmds::Error::Api(esapi::Error::Status { .. })
    ));
}

#[tokio::test]
async fn point_in_time_is_closed_when_a_page_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books/_pit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "pit-1"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"type": "search_phase_execution_exception"},
            "status": 500
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/_pit"))
        .and(body_json(json!({"id": "pit-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"succeeded": true})))
        .expect(1)
        .mount(&server)
        .await;

    let err = dump(&server, &["books"]).await.unwrap_err();

    assert!(matches!(
        err,
        staticcmds::Error::Api(esapi::Error::Status { status }) if status.as_u16() == 500
    ));
}

#[test]
fn keep_alive_must_be_a_time_value() {
    let err = utils()
        .try_get_matches_from(["escli", "utils", "dump", "books", "--keep-alive", "forever"])
        .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}
