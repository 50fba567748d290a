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

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Represents errors that can occur in the CLI application.
#[derive(Debug)]
pub enum EscliError {
    /// Indicates a configuration error.
    Config(String),
    /// Indicates a transport error.
    Transport(String),
    /// Indicates a command error.
    Command(String),
    /// Indicates an execution error.
    Execution(String),
    /// Indicates an I/O error.
    Io(String),
}

impl EscliError {
    pub(crate) fn new(error: &str) -> EscliError {
        EscliError::Command(error.to_string())
    }
}

impl Display for EscliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EscliError::Config(msg) => write!(f, "{msg}"),
            EscliError::Transport(msg) => write!(f, "{msg}"),
            EscliError::Command(msg) => write!(f, "{msg}"),
            EscliError::Execution(msg) => write!(f, "{msg}"),
            EscliError::Io(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<elasticsearch::http::transport::BuildError> for EscliError {
    fn from(err: elasticsearch::http::transport::BuildError) -> Self {
        EscliError::Transport(format!("Transport error: {err}"))
    }
}

impl From<clap::error::Error> for EscliError {
    fn from(value: clap::error::Error) -> Self {
        EscliError::Command(format!("Command error: {value}"))
    }
}

impl From<std::io::Error> for EscliError {
    fn from(value: std::io::Error) -> Self {
        EscliError::Io(format!("I/O error: {value}"))
    }
}

/// Validation failures are reported as command errors; anything raised
/// while talking to the cluster is an execution error. For HTTP failures the
/// underlying `reqwest` error and its cause are spelled out.
impl From<esapi::Error> for EscliError {
    fn from(value: esapi::Error) -> Self {
        if value.is_validation() {
            return EscliError::Command(format!("Invalid request: {value}"));
        }

        let mut source = value.source();
        while let Some(err) = source {
            if let Some(reqwest_error) = err.downcast_ref::<reqwest::Error>() {
                let mut s = format!("Error executing query: {reqwest_error}");
                if let Some(cause) = reqwest_error.source() {
                    s.push_str(&format!(", caused by: {cause}"));
                }
                return EscliError::Execution(s);
            }
            source = err.source();
        }

        EscliError::Execution(format!("Error executing query: {value}"))
    }
}

impl From<staticcmds::Error> for EscliError {
    fn from(value: staticcmds::Error) -> Self {
        match value {
            staticcmds::Error::Api(err) => err.into(),
            staticcmds::Error::Args(err) => err.into(),
        }
    }
}
