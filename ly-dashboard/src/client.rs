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

//! Module defining the interface of the data source the pipeline fetches from.

use std::future::Future;

use lyerror::{traits::ForeignError as _, LayeredError};
use reqwest::{Client, ClientBuilder, Url};

/// Structured data as returned by the data source.
pub type RawData = serde_json::Value;

/// Base URL of the public placeholder API the pipeline talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Layer name of errors raised while configuring a [`ReqwestResourceClient`].
const CLIENT_LAYER: &str = "resourceClient";

/// Interface of the data source resources are fetched from.
///
/// The pipeline only relies on this contract: given the path of a resource, it eventually
/// produces structured data or fails.  Transport details stay behind the implementation, which
/// also makes it possible to substitute a fake in tests.
pub trait ResourceClient: Sync {
    /// Error type used by this trait.
    type Err: std::error::Error + Send + Sync + 'static;

    /// Fetches the resource at `path`, relative to the data source.
    fn get(&self, path: &str) -> impl Future<Output = Result<RawData, Self::Err>> + Send;
}

/// [`ResourceClient`] implementation using the [`reqwest`] crate.
///
/// Resources are requested with HTTP GET relative to a base URL, responses other than `2xx`
/// are failures and bodies are parsed as JSON.
#[derive(Debug, Clone)]
pub struct ReqwestResourceClient {
    client: Client,
    base_url: Url,
}

impl ReqwestResourceClient {
    /// Construct [`ReqwestResourceClient`] from a [`Client`] and the base URL of the data
    /// source.
    ///
    /// Fails if `base_url` is not an absolute URL which paths can be appended to.
    pub fn new(client: Client, base_url: &str) -> lyerror::Result<Self> {
        let base_url = Url::parse(base_url)
            .foreign_err(CLIENT_LAYER, || format!("Invalid base URL `{base_url}`"))?;

        if base_url.cannot_be_a_base() {
            return Err(LayeredError::root(
                CLIENT_LAYER,
                format!("Base URL `{base_url}` cannot have a path"),
            ));
        }

        Ok(Self { client, base_url })
    }

    /// Construct [`ReqwestResourceClient`] from a [`ClientBuilder`] and the base URL of the
    /// data source.
    pub fn from_builder(builder: ClientBuilder, base_url: &str) -> lyerror::Result<Self> {
        let client = builder
            .build()
            .foreign_err(CLIENT_LAYER, || "Unable to build the HTTP client")?;
        Self::new(client, base_url)
    }

    /// Construct [`ReqwestResourceClient`] talking to [`DEFAULT_BASE_URL`].
    pub fn with_default_base_url(client: Client) -> lyerror::Result<Self> {
        Self::new(client, DEFAULT_BASE_URL)
    }

    /// The base URL resources are requested relative to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // Never fails, `new` rejects URLs which cannot be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }
}

impl ResourceClient for ReqwestResourceClient {
    type Err = reqwest::Error;

    async fn get(&self, path: &str) -> reqwest::Result<RawData> {
        self.client
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
