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

// Command tree built from the endpoint catalog.
//
// Core endpoints are top-level subcommands, every other endpoint lives under
// a subcommand named after its namespace. Arguments are derived from the
// endpoint descriptor: required path parts are positional, everything else is
// a `--long` option.

use crate::Config;
use crate::error::EscliError;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory};
use esapi::{Endpoint, Param, ParamKind, Part, PartKind, QueryValue, Request, RequestBuilder, api};
use std::collections::{BTreeMap, HashMap};
use std::io::IsTerminal;
use tokio::io::AsyncReadExt;

type Registry = HashMap<String, &'static Endpoint>;

// Maps "namespace:command" to the endpoint it runs.
fn registry() -> Registry {
    api::ENDPOINTS
        .iter()
        .map(|endpoint| {
            (
                format!("{}:{}", endpoint.namespace(), endpoint.short_name()),
                *endpoint,
            )
        })
        .collect()
}

// Resolves the endpoint selected on the command line.
//
// # Arguments
//
// * `matches` - The matches of the root command.
//
// # Returns
//
// The endpoint and the matches of its subcommand, or `None` for commands
// that are not endpoints (e.g. `utils`).
pub fn find_endpoint(matches: &ArgMatches) -> Option<(&'static Endpoint, &ArgMatches)> {
    let registry = registry();
    let (namespace, sub_matches) = matches.subcommand()?;
    match sub_matches.subcommand() {
        Some((command, arg_matches)) => registry
            .get(&format!("{namespace}:{command}"))
            .map(|endpoint| (*endpoint, arg_matches)),
        None => registry
            .get(&format!("core:{namespace}"))
            .map(|endpoint| (*endpoint, sub_matches)),
    }
}

// Generates the main CLI command.
//
// # Returns
//
// A `Command` object representing the CLI application.
pub fn command() -> Command {
    let after_help_heading: &str =
        color_print::cstr!(r#"<underline><bold>Examples:</bold></underline>"#);
    let after_help: String = format!(
        "{}{}",
        after_help_heading,
        r#"
./escli info
./escli get my-index 1 --pretty
./escli bulk --input <file.ndjson>
./escli search my-index <<< '{"query": {"match_all": {}}}'
./escli cat indices --v --format txt
./escli utils dump my-index > my-index.ndjson
"#
    );

    let mut namespaces: BTreeMap<&'static str, Vec<&'static Endpoint>> = BTreeMap::new();
    for endpoint in api::ENDPOINTS {
        namespaces
            .entry(endpoint.namespace())
            .or_default()
            .push(*endpoint);
    }
    let core = namespaces.remove("core").unwrap_or_default();

    Config::command()
        .name("escli")
        .author("Elastic")
        .version(env!("CARGO_PKG_VERSION"))
        .about("You know, for search.")
        .long_about("The shortest way between your cli and your cluster. You know, for search.")
        .subcommand_required(true)
        .after_help(after_help)
        .subcommand(
            Command::new("utils")
                .about("Utility commands")
                .subcommand_required(true)
                .subcommands(staticcmds::commands()),
        )
        .subcommands(core.into_iter().map(endpoint_command))
        .subcommands(namespaces.into_iter().map(|(namespace, endpoints)| {
            Command::new(namespace)
                .about(format!("{namespace} APIs"))
                .subcommand_required(true)
                .subcommands(endpoints.into_iter().map(endpoint_command))
        }))
}

// Creates the subcommand of one endpoint.
pub fn endpoint_command(endpoint: &'static Endpoint) -> Command {
    let mut command = Command::new(endpoint.short_name())
        .about(endpoint.short_description())
        .long_about(endpoint.description);

    for part in positional_parts(endpoint) {
        command = command.arg(part_arg(part).required(true));
    }
    for part in endpoint.parts.iter().filter(|part| !part.required) {
        command = command.arg(part_arg(part).long(part.name));
    }
    for param in endpoint.params {
        command = command.arg(param_arg(param));
    }

    if endpoint.body.accepts_body() {
        command = command.arg(
            Arg::new("input")
                .long("input")
                .value_name("FILE")
                .help("Input file or '-' for stdin"),
        );
    }

    command.arg(
        Arg::new("header")
            .short('H')
            .long("header")
            .value_name("HEADER")
            .help("Add a custom header (key:value)")
            .action(ArgAction::Append)
            .value_parser(parse_header),
    )
}

// Required parts, in the order of the longest route.
fn positional_parts(endpoint: &'static Endpoint) -> Vec<&'static Part> {
    let mut ordered: Vec<&'static Part> = Vec::new();
    if let Some(route) = endpoint
        .routes
        .iter()
        .max_by_key(|route| route.parts().count())
    {
        for name in route.parts() {
            if let Some(part) = endpoint.part(name).filter(|part| part.required) {
                ordered.push(part);
            }
        }
    }
    for part in endpoint.parts.iter().filter(|part| part.required) {
        if !ordered.iter().any(|known| known.name == part.name) {
            ordered.push(part);
        }
    }
    ordered
}

fn part_arg(part: &'static Part) -> Arg {
    let arg = Arg::new(part.name).help(part.description);
    match part.kind {
        PartKind::Single => arg,
        PartKind::List => arg.value_delimiter(','),
    }
}

// Generates the argument of a query parameter.
//
// Flags are plain switches. Other kinds take a value checked by the
// parameter kind, so that invalid input is reported as a usage error.
fn param_arg(param: &'static Param) -> Arg {
    let name = arg_name(param.name);
    let arg = Arg::new(name).long(name).help(param.description);
    let kind = param.kind;
    let parser = move |raw: &str| kind.parse(raw);

    match kind {
        ParamKind::Flag => arg.action(ArgAction::SetTrue),
        ParamKind::List => arg
            .action(ArgAction::Append)
            .value_name("LIST")
            .value_parser(parser),
        ParamKind::Enum(values) => arg
            .long_help(format!(
                "{} [possible values: {}]",
                param.description,
                values.join(", ")
            ))
            .value_parser(parser),
        ParamKind::Duration => arg
            .value_name("TIME")
            .allow_negative_numbers(true)
            .value_parser(parser),
        ParamKind::Boolean => arg.value_name("BOOL").value_parser(parser),
        ParamKind::Integer | ParamKind::Number => {
            arg.allow_negative_numbers(true).value_parser(parser)
        }
        ParamKind::String => arg.value_parser(parser),
    }
}

// Argument names clashing with clap's own.
fn arg_name(name: &'static str) -> &'static str {
    match name {
        "help" => "help_",
        _ => name,
    }
}

// Parses a `key:value` header.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected `key:value`, got `{raw}`")),
    }
}

// Collects parts, query parameters and headers of an endpoint subcommand.
//
// # Arguments
//
// * `endpoint` - The endpoint the subcommand was built from.
// * `matches` - The matches of that subcommand.
//
// # Returns
//
// A request builder, ready for the body and common parameters.
pub fn request_from_matches(endpoint: &'static Endpoint, matches: &ArgMatches) -> RequestBuilder {
    let mut builder = Request::builder(endpoint);

    for part in endpoint.parts {
        if let Some(values) = matches.get_many::<String>(part.name) {
            builder = builder.parts(part.name, values.cloned());
        }
    }

    for param in endpoint.params {
        let id = arg_name(param.name);
        match param.kind {
            ParamKind::Flag => {
                if matches.get_flag(id) {
                    builder = builder.param(param.name, true);
                }
            }
            ParamKind::List => {
                if let Some(values) = matches.get_many::<QueryValue>(id) {
                    let items: Vec<String> = values
                        .flat_map(|value| match value {
                            QueryValue::List(items) => items.clone(),
                            _ => Vec::new(),
                        })
                        .collect();
                    builder = builder.param(param.name, items);
                }
            }
            _ => {
                if let Some(value) = matches.get_one::<QueryValue>(id) {
                    builder = builder.param(param.name, value.clone());
                }
            }
        }
    }

    if let Some(headers) = matches.get_many::<(String, String)>("header") {
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
    }

    builder
}

// Reads the request body.
//
// - Reads input from a file if a filename is provided.
// - Reads input from stdin if "-" is specified.
// - Reads input from stdin if no filename is provided and stdin is not
//   attached to a terminal.
//
// # Returns
//
// The body, or `None` when nothing was read.
pub async fn read_input(input: Option<&str>) -> Result<Option<Vec<u8>>, EscliError> {
    let mut body = Vec::new();
    match input {
        Some("-") => {
            tokio::io::stdin().read_to_end(&mut body).await?;
        }
        Some(filename) => {
            body = tokio::fs::read(filename).await?;
        }
        None => {
            if !std::io::stdin().is_terminal() {
                tokio::io::stdin().read_to_end(&mut body).await?;
            }
        }
    }
    Ok((!body.is_empty()).then_some(body))
}
