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

mod cmd;
mod error;

use clap::error::ErrorKind;
use clap::{ArgAction, ArgMatches, Command, FromArgMatches as _, Parser};
use dotenv::dotenv;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::Url;
use elasticsearch::http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder};
use error::EscliError;
use esapi::{Client, CommonParams, ElasticsearchTransport, ResponseBody};
use futures::StreamExt;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// Represents the configuration options for the CLI application.
//
// This struct defines the available command-line arguments and environment variables
// for configuring the application.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(short, long, env = "ESCLI_URL", help = "Elasticsearch cluster url", long_help = "The URL of the Elasticsearch cluster to connect to. This should be in the format 'http://localhost:9200' or 'https://localhost:9200'.")]
    url: Url,

    #[clap(short, long, env = "ESCLI_TIMEOUT", help = "CLI request timeout in seconds", default_value = "60", value_parser = |s: &str| s.parse().map(Duration::from_secs))]
    timeout: Option<Duration>,

    #[clap(long, env = "ESCLI_USERNAME", help = "Username for authentication", long_help = "The username for basic authentication with Elasticsearch. This is required if you are not using an API key.")]
    username: Option<String>,

    #[clap(long, env = "ESCLI_PASSWORD", help = "Password for authentication", long_help = "The password for basic authentication with Elasticsearch. This is required if you are not using an API key.")]
    password: Option<String>,

    #[clap(long, env = "ESCLI_API_KEY", help = "API key for authentication encoded as base64.", long_help = "The API key for authentication with Elasticsearch, encoded as base64. This is used for secure access to the Elasticsearch cluster.")]
    api_key: Option<String>,

    #[clap(long, env = "ESCLI_INSECURE", help = "Disable TLS certificate validation (insecure)")]
    insecure: bool,

    #[clap(long, global = true, help = "Pretty format the returned JSON response")]
    pretty: bool,

    #[clap(long, global = true, help = "Return human readable values for statistics")]
    human: bool,

    #[clap(long, global = true, help = "Include the stack trace of returned errors")]
    error_trace: bool,

    #[clap(long, global = true, value_delimiter = ',', help = "Comma-separated list of filters used to reduce the response")]
    filter_path: Vec<String>,

    #[clap(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)", long_help = "Increase log verbosity. Logs are written to stderr. ESCLI_LOG takes precedence with a tracing filter directive, e.g. 'esapi=trace'.")]
    verbose: u8,
}

impl Config {
    // Resolves the credentials to authenticate with.
    //
    // # Returns
    //
    // The credentials, `None` without authentication, or the message of the
    // usage error when the options are combined incorrectly.
    fn credentials(&self) -> Result<Option<Credentials>, &'static str> {
        match (&self.api_key, &self.username, &self.password) {
            (Some(api_key), None, None) => Ok(Some(Credentials::EncodedApiKey(api_key.clone()))),
            (None, Some(username), Some(password)) => {
                Ok(Some(Credentials::Basic(username.clone(), password.clone())))
            }
            (None, Some(_), None) | (None, None, Some(_)) => {
                Err("Both --username and --password must be provided together.")
            }
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err("Use either --api-key or --username/--password, not both.")
            }
            (None, None, None) => Ok(None),
        }
    }

    fn transport(&self) -> Result<Transport, EscliError> {
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(EscliError::Config(format!(
                "Unsupported URL scheme `{}`, expected http or https",
                self.url.scheme()
            )));
        }

        let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(self.url.clone()));
        if self.insecure {
            builder = builder.cert_validation(CertificateValidation::None);
        }
        Ok(builder.build()?)
    }

    fn common_params(&self) -> CommonParams {
        CommonParams {
            pretty: self.pretty,
            human: self.human,
            error_trace: self.error_trace,
            filter_path: self.filter_path.clone(),
        }
    }
}

// Installs the stderr log subscriber.
//
// `ESCLI_LOG` wins when set; otherwise each `-v` adds detail.
fn init_tracing(verbose: u8) {
    let directive = std::env::var("ESCLI_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => "warn",
            1 => "warn,esapi=debug,escli=debug,staticcmds=debug",
            _ => "debug,esapi=trace,escli=trace,staticcmds=trace",
        }
        .to_string()
    });
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Entry point for the CLI application.
//
// Parses the command line, executes the selected command and writes the
// response body to stdout.
//
// # Returns
//
// Success, or failure when the command errored or the cluster answered
// with a 4xx/5xx status.
#[tokio::main]
async fn main() -> ExitCode {
    clap_complete::CompleteEnv::with_factory(cmd::command).complete();

    dotenv().ok();

    let cmd = cmd::command();
    let matches = cmd.clone().get_matches();
    let config = match Config::from_arg_matches(&matches) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    init_tracing(config.verbose);

    match run(cmd, &config, &matches).await {
        Ok(code) => code,
        Err(err) => {
            let _ = tokio::io::stderr()
                .write_all(format!("{err}\n").as_bytes())
                .await;
            ExitCode::FAILURE
        }
    }
}

async fn run(mut cmd: Command, config: &Config, matches: &ArgMatches) -> Result<ExitCode, EscliError> {
    let credentials = match config.credentials() {
        Ok(credentials) => credentials,
        Err(message) => cmd.error(ErrorKind::ArgumentConflict, message).exit(),
    };

    let transport = config.transport()?;
    if let Some(credentials) = credentials {
        transport.set_auth(credentials);
    }
    let client = Client::new(ElasticsearchTransport::new(transport));
    tracing::debug!(url = %config.url, "client ready");

    let response = match matches.subcommand() {
        // Check if the subcommand is "utils" to run static commands
        Some(("utils", sub_matches)) => {
            staticcmds::run_command(cmd, sub_matches, &client, config.timeout).await?
        }
        _ => {
            let (endpoint, arg_matches) =
                cmd::find_endpoint(matches).ok_or_else(|| EscliError::new("Unknown command"))?;

            let mut builder =
                cmd::request_from_matches(endpoint, arg_matches).common(config.common_params());
            if endpoint.body.accepts_body() {
                let input = arg_matches.get_one::<String>("input").map(String::as_str);
                if let Some(body) = cmd::read_input(input).await? {
                    builder = builder.body(body);
                }
            }
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }

            client.send(builder).await?
        }
    };

    let status = response.status_code();
    write_body(response.into_body()).await?;

    if status.is_client_error() || status.is_server_error() {
        tracing::debug!(status = status.as_u16(), "request was not successful");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

// Streams the response body to stdout. A closed pipe ends the output
// quietly.
async fn write_body(mut body: ResponseBody) -> Result<(), EscliError> {
    let mut stdout = tokio::io::stdout();
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        if let Err(e) = stdout.write_all(&chunk).await {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
    }
    match stdout.flush().await {
        Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        let matches = cmd::command()
            .try_get_matches_from(
                ["escli", "--url", "http://localhost:9200"]
                    .iter()
                    .chain(args.iter())
                    .chain(["info"].iter()),
            )
            .unwrap();
        Config::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn api_key_alone_is_accepted() {
        let config = config(&["--api-key", "c2VjcmV0"]);
        assert!(matches!(
            config.credentials(),
            Ok(Some(Credentials::EncodedApiKey(_)))
        ));
    }

    #[test]
    fn username_requires_password() {
        let config = config(&["--username", "elastic"]);
        assert_eq!(
            config.credentials().err(),
            Some("Both --username and --password must be provided together.")
        );
    }

    #[test]
    fn api_key_and_basic_auth_conflict() {
        let config = config(&["--api-key", "c2VjcmV0", "--username", "elastic"]);
        assert_eq!(
            config.credentials().err(),
            Some("Use either --api-key or --username/--password, not both.")
        );
    }

    #[test]
    fn global_flags_fill_common_params() {
        let config = config(&["--pretty", "--filter-path", "hits.hits._id,took"]);
        assert_eq!(
            config.common_params(),
            CommonParams {
                pretty: true,
                human: false,
                error_trace: false,
                filter_path: vec!["hits.hits._id".to_string(), "took".to_string()],
            }
        );
    }

    #[test]
    fn timeout_is_in_seconds() {
        let config = config(&["--timeout", "5"]);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn unsupported_scheme_is_a_config_error() {
        let matches = cmd::command()
            .try_get_matches_from(["escli", "--url", "ftp://localhost:9200", "info"])
            .unwrap();
        let config = Config::from_arg_matches(&matches).unwrap();
        assert!(matches!(config.transport(), Err(EscliError::Config(_))));
    }
}
