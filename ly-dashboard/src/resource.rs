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

/// A resource of a single user the pipeline fetches.
///
/// The [`std::fmt::Display`] output is the category of the resource, as used in the messages of
/// the failures raised while fetching it.
#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Resource {
    /// The user record of the user with the given ID.
    #[strum(to_string = "user data")]
    User(String),
    /// The posts written by the user with the given ID.
    #[strum(to_string = "user posts")]
    UserPosts(String),
}

impl Resource {
    /// The ID of the user the resource belongs to.
    pub fn user_id(&self) -> &str {
        match self {
            Self::User(user_id) | Self::UserPosts(user_id) => user_id,
        }
    }

    /// Path of the resource relative to the data source.
    pub fn path(&self) -> String {
        match self {
            Self::User(user_id) => format!("users/{user_id}"),
            Self::UserPosts(user_id) => format!("users/{user_id}/posts"),
        }
    }

    /// Name of the layer fetching the resource from the data source.
    pub fn fetch_layer(&self) -> &'static str {
        match self {
            Self::User(_) => "fetchUserData",
            Self::UserPosts(_) => "fetchUserPosts",
        }
    }

    /// Name of the layer annotating a failed fetch of the resource.
    pub fn get_layer(&self) -> &'static str {
        match self {
            Self::User(_) => "getUserData",
            Self::UserPosts(_) => "getUserPosts",
        }
    }

    /// Message of the frame [`Self::get_layer`] adds to a failed fetch.
    pub fn failure_message(&self) -> String {
        format!("Failed to fetch {self}")
    }
}
