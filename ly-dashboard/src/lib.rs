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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate implements an asynchronous pipeline fetching the dashboard of a user, i.e. the
//! user record and the user's posts, from a data source.
//!
//! Every layer of the pipeline awaits its callee and re-raises a failure with one more frame, so
//! a failed fetch reaches the caller as e.g.
//!
//! ```text
//! Failed to fetch dashboard data:
//!
//! Failed to fetch user data:
//!
//! Request to users/1 failed:
//!
//! error sending request for url (https://jsonplaceholder.typicode.com/users/1)
//! ```
//!
//! # Details
//!
//! * [`ResourceClient`] -- The data source.  [`ReqwestResourceClient`] talks HTTP, tests
//!   substitute their own implementation.
//! * [`get_user_data`], [`get_user_posts`] -- Fetch one resource each.
//! * [`get_dashboard_data`] -- Combines both into a [`Dashboard`], fetching them one after the
//!   other or at the same time depending on the [`FetchStrategy`].
//! * [`show_dashboard`] -- The outermost layer, reporting the outcome to a
//!   [`ReportSink`][lyerror::report::ReportSink].
//!
//! # Example
//!
//! ```
//! use ly_dashboard::{get_dashboard_data, FetchStrategy, RawData, ResourceClient};
//! use serde_json::json;
//!
//! // Data source answering every request with the requested path.
//! struct EchoClient;
//!
//! #[derive(Debug)]
//! struct Unreachable;
//!
//! impl std::fmt::Display for Unreachable {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "unreachable")
//!     }
//! }
//!
//! impl std::error::Error for Unreachable {}
//!
//! impl ResourceClient for EchoClient {
//!     type Err = Unreachable;
//!
//!     async fn get(&self, path: &str) -> Result<RawData, Self::Err> {
//!         Ok(json!({ "path": path }))
//!     }
//! }
//!
//! let dashboard = tokio_test::block_on(get_dashboard_data(
//!     &EchoClient,
//!     "1",
//!     FetchStrategy::Sequential,
//! ))
//! .unwrap();
//!
//! assert_eq!(dashboard.user_data, json!({ "path": "users/1" }));
//! assert_eq!(dashboard.user_posts, json!({ "path": "users/1/posts" }));
//! ```

mod client;
mod pipeline;
mod resource;
#[cfg(test)]
mod test_utils;

pub use client::{RawData, ReqwestResourceClient, ResourceClient, DEFAULT_BASE_URL};
pub use pipeline::{
    fetch_resource, get_dashboard_data, get_resource, get_user_data, get_user_posts,
    show_dashboard, Dashboard, FetchStrategy, APP_FAILURE, DASHBOARD_FAILURE, DASHBOARD_LAYER,
    SEPARATOR,
};
pub use resource::Resource;
