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

use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderValue};

/// Adds every header of `source` to `destination`.
///
/// Values are appended: a name already present in `destination` keeps its
/// values and gains the new ones. An empty `destination` takes `source`
/// as is.
pub fn merge(destination: &mut HeaderMap, source: HeaderMap) {
    if source.is_empty() {
        return;
    }
    if destination.is_empty() {
        *destination = source;
        return;
    }
    for (name, value) in &source {
        destination.append(name.clone(), value.clone());
    }
}

/// Sets `Content-Type` unless one is already present.
pub fn set_content_type(headers: &mut HeaderMap, content_type: &'static str) {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{ACCEPT, USER_AGENT};

    fn map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(*name, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn empty_destination_adopts_source() {
        let mut destination = HeaderMap::new();
        merge(&mut destination, map(&[("x-opaque-id", "1")]));
        assert_eq!(destination, map(&[("x-opaque-id", "1")]));
    }

    #[test]
    fn merge_never_drops_existing_keys() {
        let mut destination = map(&[("user-agent", "esapi"), ("accept", "application/json")]);
        merge(
            &mut destination,
            map(&[("accept", "text/plain"), ("x-opaque-id", "7")]),
        );

        assert_eq!(destination.get(USER_AGENT).unwrap(), "esapi");
        let accept: Vec<_> = destination.get_all(ACCEPT).iter().collect();
        assert_eq!(accept, vec!["application/json", "text/plain"]);
        assert_eq!(destination.get("x-opaque-id").unwrap(), "7");
    }

    #[test]
    fn empty_source_is_a_no_op() {
        let mut destination = map(&[("accept", "application/json")]);
        merge(&mut destination, HeaderMap::new());
        assert_eq!(destination.len(), 1);
    }

    #[test]
    fn content_type_is_not_overridden() {
        let mut headers = map(&[("content-type", "application/vnd.elasticsearch+json")]);
        set_content_type(&mut headers, "application/json");
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/vnd.elasticsearch+json"
        );

        let mut headers = HeaderMap::new();
        set_content_type(&mut headers, "application/x-ndjson");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/x-ndjson");
    }
}
