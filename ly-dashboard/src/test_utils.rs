// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{collections::HashMap, sync::Mutex};

use crate::{RawData, ResourceClient};

#[derive(Debug)]
pub(crate) struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

pub(crate) enum Response {
    Data(RawData),
    Fail(&'static str),
    Never,
}

/// Fake data source answering from a fixed table and recording every requested path.
#[derive(Default)]
pub(crate) struct StubClient {
    responses: HashMap<String, Response>,
    // The trait signature takes `&self`, hence the mutex
    requested: Mutex<Vec<String>>,
}

impl StubClient {
    pub(crate) fn with(mut self, path: &str, response: Response) -> Self {
        self.responses.insert(path.to_owned(), response);
        self
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ResourceClient for StubClient {
    type Err = TransportError;

    async fn get(&self, path: &str) -> Result<RawData, TransportError> {
        self.requested.lock().unwrap().push(path.to_owned());

        match self.responses.get(path) {
            Some(Response::Data(data)) => Ok(data.clone()),
            Some(Response::Fail(message)) => Err(TransportError((*message).to_owned())),
            Some(Response::Never) => futures::future::pending().await,
            None => panic!("Unexpected path: {path}"),
        }
    }
}
