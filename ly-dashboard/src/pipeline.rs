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

//! The layers of the dashboard pipeline.
//!
//! `fetchUserData` / `fetchUserPosts` turn a transport failure into a [`LayeredError`],
//! `getUserData` / `getUserPosts` name the resource category which failed and
//! `getDashboardData` combines both resources.  [`show_dashboard`] is the outermost layer, it
//! reports the outcome instead of re-raising it.

use lyerror::{
    report::{report, ReportSink},
    traits::{ErrorContext as _, ForeignError as _, InLayer as _},
    LayeredError, Result,
};
use serde::{Deserialize, Serialize};

use crate::{RawData, Resource, ResourceClient};

/// Name of the layer combining both resources.
pub const DASHBOARD_LAYER: &str = "getDashboardData";

/// Message of the frame [`DASHBOARD_LAYER`] adds to a failure.
pub const DASHBOARD_FAILURE: &str = "Failed to fetch dashboard data";

/// Headline [`show_dashboard`] reports a failure under.
pub const APP_FAILURE: &str = "Error in app";

/// Separator between the messages of a reported failure.
pub const SEPARATOR: &str = "\n\n";

/// Both resources of a user, as fetched from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// The user record.
    pub user_data: RawData,
    /// The posts written by the user.
    pub user_posts: RawData,
}

/// How [`get_dashboard_data`] schedules the two fetches.
///
/// The fetches don't depend on each other, so both strategies combine the same data.  They
/// differ in latency and in which failure is reported when the data source misbehaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FetchStrategy {
    /// The posts are requested only once the user record arrived, and never if it failed.
    #[default]
    #[strum(to_string = "sequential")]
    Sequential,
    /// Both fetches run at the same time; the first failure to arrive fails the whole
    /// operation and the other fetch is dropped.
    #[strum(to_string = "concurrent")]
    Concurrent,
}

/// Fetches `resource` from the data source.
///
/// A transport failure is returned as a frame of [`Resource::fetch_layer`], with the transport
/// error as its cause.
pub async fn fetch_resource<C>(client: &C, resource: &Resource) -> Result<RawData>
where
    C: ResourceClient,
{
    let path = resource.path();
    tracing::debug!(%path, "Fetching {resource}");

    client
        .get(&path)
        .await
        .foreign_err(resource.fetch_layer(), || format!("Request to {path} failed"))
}

/// Fetches `resource`, annotating a failure with the category of the resource, e.g.
/// `Failed to fetch user data`.
pub async fn get_resource<C>(client: &C, resource: &Resource) -> Result<RawData>
where
    C: ResourceClient,
{
    fetch_resource(client, resource)
        .await
        .with_layer(resource.get_layer(), || resource.failure_message())
}

/// Fetches the user record of `user_id`.
pub async fn get_user_data<C>(client: &C, user_id: &str) -> Result<RawData>
where
    C: ResourceClient,
{
    get_resource(client, &Resource::User(user_id.to_owned())).await
}

/// Fetches the posts of `user_id`.
pub async fn get_user_posts<C>(client: &C, user_id: &str) -> Result<RawData>
where
    C: ResourceClient,
{
    get_resource(client, &Resource::UserPosts(user_id.to_owned())).await
}

/// Fetches both resources of `user_id` and combines them into a [`Dashboard`].
///
/// The payloads are passed through unchanged.  If either fetch fails the whole operation fails
/// with the message [`DASHBOARD_FAILURE`] over the failure of the fetch.
pub async fn get_dashboard_data<C>(
    client: &C,
    user_id: &str,
    strategy: FetchStrategy,
) -> Result<Dashboard>
where
    C: ResourceClient,
{
    tracing::debug!(user_id, %strategy, "Fetching dashboard data");

    let fetched = match strategy {
        FetchStrategy::Sequential => fetch_sequentially(client, user_id).await,
        FetchStrategy::Concurrent => futures::try_join!(
            get_user_data(client, user_id),
            get_user_posts(client, user_id)
        ),
    };

    fetched
        .map(|(user_data, user_posts)| Dashboard {
            user_data,
            user_posts,
        })
        .with_layer(DASHBOARD_LAYER, || DASHBOARD_FAILURE)
        .ctx(|| format!("user_id={user_id}, strategy={strategy}"))
}

async fn fetch_sequentially<C>(client: &C, user_id: &str) -> Result<(RawData, RawData)>
where
    C: ResourceClient,
{
    let user_data = get_user_data(client, user_id).await?;
    let user_posts = get_user_posts(client, user_id).await?;
    Ok((user_data, user_posts))
}

impl Dashboard {
    /// Reports the outcome of [`get_dashboard_data`] to `sink`.
    ///
    /// A success is reported as pretty-printed JSON, a failure as [`APP_FAILURE`] followed by
    /// every message of the chain, separated by [`SEPARATOR`].
    pub fn report<S>(result: Result<Dashboard>, sink: &mut S) -> Option<Dashboard>
    where
        S: ReportSink + ?Sized,
    {
        report(
            result,
            sink,
            |dashboard| format!("{:#}", serde_json::json!(dashboard)),
            render_failure,
        )
    }
}

fn render_failure(error: &LayeredError) -> String {
    format!(
        "{APP_FAILURE}:{SEPARATOR}{}",
        error.render().separator(SEPARATOR)
    )
}

/// The outermost layer: fetches the dashboard of `user_id` and reports the outcome to `sink`.
pub async fn show_dashboard<C, S>(
    client: &C,
    user_id: &str,
    strategy: FetchStrategy,
    sink: &mut S,
) -> Option<Dashboard>
where
    C: ResourceClient,
    S: ReportSink + ?Sized,
{
    Dashboard::report(get_dashboard_data(client, user_id, strategy).await, sink)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;
    use lyerror::report::{MemorySink, Report};
    use serde_json::{json, Value};

    use super::*;
    use crate::test_utils::{Response, StubClient};

    fn user() -> Value {
        json!({"id": 1, "name": "Leanne Graham", "username": "Bret"})
    }

    fn posts() -> Value {
        json!([
            {"userId": 1, "id": 1, "title": "sunt aut facere"},
            {"userId": 1, "id": 2, "title": "qui est esse"}
        ])
    }

    fn healthy_client() -> StubClient {
        StubClient::default()
            .with("users/1", Response::Data(user()))
            .with("users/1/posts", Response::Data(posts()))
    }

    #[tokio::test]
    async fn test_fetch_resource_wraps_transport_error() {
        let client = StubClient::default().with("users/1", Response::Fail("Request failed"));

        let error = fetch_resource(&client, &Resource::User("1".to_owned()))
            .await
            .unwrap_err();

        assert_eq!(error.layer(), "fetchUserData");
        assert_eq!(error.message(), "Request to users/1 failed");
        assert_eq!(error.root_message(), "Request failed");
    }

    #[tokio::test]
    async fn test_get_user_data_annotates_category() {
        let client = StubClient::default().with("users/1", Response::Fail("Request failed"));

        let error = get_user_data(&client, "1").await.unwrap_err();

        assert_eq!(error.layer(), "getUserData");
        assert_eq!(error.message(), "Failed to fetch user data");
        assert_eq!(error.frames().count(), 2);
        // getUserData, fetchUserData and the transport error
        assert_eq!(error.depth(), 3);
    }

    #[tokio::test]
    async fn test_user_fetch_fails() {
        let client = StubClient::default().with("users/1", Response::Fail("Request failed"));

        let error = get_dashboard_data(&client, "1", FetchStrategy::Sequential)
            .await
            .unwrap_err();
        let rendered = error.render().to_string();

        assert!(rendered.starts_with("Failed to fetch dashboard data"));
        assert!(rendered.contains("Failed to fetch user data"));
        assert!(rendered.contains("Request failed"));
        // the posts are never requested
        assert_eq!(client.requested(), ["users/1"]);
    }

    #[tokio::test]
    async fn test_posts_fetch_fails() {
        let client = StubClient::default()
            .with("users/1", Response::Data(user()))
            .with("users/1/posts", Response::Fail("Request failed"));

        let error = get_dashboard_data(&client, "1", FetchStrategy::Sequential)
            .await
            .unwrap_err();

        assert_eq!(
            error.frames().map(LayeredError::layer).collect::<Vec<_>>(),
            [DASHBOARD_LAYER, "getUserPosts", "fetchUserPosts"]
        );
        assert_eq!(client.requested(), ["users/1", "users/1/posts"]);
    }

    #[tokio::test]
    async fn test_both_fetches_succeed() {
        for strategy in [FetchStrategy::Sequential, FetchStrategy::Concurrent] {
            let client = healthy_client();

            let dashboard = get_dashboard_data(&client, "1", strategy).await.unwrap();

            assert_eq!(
                dashboard,
                Dashboard {
                    user_data: user(),
                    user_posts: posts()
                }
            );

            let mut requested = client.requested();
            requested.sort();
            assert_eq!(requested, ["users/1", "users/1/posts"]);
        }
    }

    #[tokio::test]
    async fn test_sequential_waits_for_user() {
        let client = StubClient::default()
            .with("users/1", Response::Never)
            .with("users/1/posts", Response::Data(posts()));

        let pending = tokio::time::timeout(
            Duration::from_millis(50),
            get_dashboard_data(&client, "1", FetchStrategy::Sequential),
        )
        .await;

        assert!(pending.is_err());
        assert_eq!(client.requested(), ["users/1"]);
    }

    #[tokio::test]
    async fn test_never_resolving_posts() {
        let client = StubClient::default()
            .with("users/1", Response::Data(user()))
            .with("users/1/posts", Response::Never);

        for strategy in [FetchStrategy::Sequential, FetchStrategy::Concurrent] {
            let pending = tokio::time::timeout(
                Duration::from_millis(50),
                get_dashboard_data(&client, "1", strategy),
            )
            .await;

            assert!(pending.is_err());
        }
    }

    #[tokio::test]
    async fn test_concurrent_fails_without_waiting() {
        let client = StubClient::default()
            .with("users/1", Response::Never)
            .with("users/1/posts", Response::Fail("Request failed"));

        let error = get_dashboard_data(&client, "1", FetchStrategy::Concurrent)
            .await
            .unwrap_err();

        assert_eq!(error.cause().unwrap().layer(), "getUserPosts");
        assert_eq!(client.requested(), ["users/1", "users/1/posts"]);
    }

    #[tokio::test]
    async fn test_context() {
        let client = StubClient::default()
            .with("users/7", Response::Fail("Request failed"))
            .with("users/7/posts", Response::Data(posts()));

        let error = get_dashboard_data(&client, "7", FetchStrategy::Concurrent)
            .await
            .unwrap_err();

        assert_eq!(
            error.context().collect::<Vec<_>>(),
            ["user_id=7, strategy=concurrent"]
        );
    }

    #[tokio::test]
    async fn test_show_dashboard_failure() {
        let client = StubClient::default().with("users/1", Response::Fail("Request failed"));
        let mut sink = MemorySink::new();

        let shown = show_dashboard(&client, "1", FetchStrategy::default(), &mut sink).await;

        assert!(shown.is_none());
        assert_eq!(
            sink.reports(),
            [Report::Failure(
                "Error in app:\n\n\
                 Failed to fetch dashboard data:\n\n\
                 Failed to fetch user data:\n\n\
                 Request to users/1 failed:\n\n\
                 Request failed"
                    .to_owned()
            )]
        );
    }

    #[tokio::test]
    async fn test_show_dashboard_success() {
        let client = healthy_client();
        let mut sink = MemorySink::new();

        let shown = show_dashboard(&client, "1", FetchStrategy::default(), &mut sink).await;

        assert_eq!(shown.map(|dashboard| dashboard.user_data), Some(user()));
        assert_matches!(sink.reports(), [Report::Success(message)] => {
            let reported: Value = serde_json::from_str(message).unwrap();
            assert_eq!(reported, json!({"userData": user(), "userPosts": posts()}));
        });
    }
}
