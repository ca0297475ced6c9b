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

use ly_dashboard::{show_dashboard, FetchStrategy, ReqwestResourceClient};
use lyerror::report::{ConsoleSink, ReportSink as _};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

/// The user whose dashboard is shown.
const USER_ID: &str = "1";

#[tokio::main]
async fn main() {
    // e.g. `RUST_LOG=ly_dashboard=debug` to follow the individual fetches
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = match ReqwestResourceClient::with_default_base_url(Client::new()) {
        Ok(client) => client,
        Err(error) => {
            ConsoleSink.failure(&error.render().to_string());
            return;
        }
    };

    for strategy in [FetchStrategy::Sequential, FetchStrategy::Concurrent] {
        show_dashboard(&client, USER_ID, strategy, &mut ConsoleSink).await;
    }
}
