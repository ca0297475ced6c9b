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

use crate::{traits::loggable::Warnable, LayerName, LayeredError};

/// Trait for converting foreign errors to [`LayeredError`]s.
///
/// This trait is implemented for the [`std::result::Result`] type, to provide functionality for
/// converting the received error to a [`LayeredError`], by automatically capturing and saving
/// the error as the cause of the new frame.
///
/// This should only be used when the error comes from outside of our system, e.g. from a
/// transport library.
///
/// Do *not* use this to re-raise errors that are already [`LayeredError`]s.  For those, use the
/// [`InLayer`][crate::traits::InLayer] trait.
pub trait ForeignError<T, S>
where
    S: std::error::Error + Send + Sync + 'static,
{
    /// Maps a `Result<T, S>` to `Result<T, LayeredError>`.
    ///
    /// The [Ok] variant is left untouched.
    ///
    /// A frame of `layer` with the message returned by `f` is created, with the [Err] value as
    /// its cause.
    fn foreign_err<L, M, F>(self, layer: L, f: F) -> crate::Result<T>
    where
        L: Into<LayerName>,
        M: Into<String>,
        F: FnOnce() -> M;
}

impl<T, S> ForeignError<T, S> for std::result::Result<T, S>
where
    S: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn foreign_err<L, M, F>(self, layer: L, f: F) -> crate::Result<T>
    where
        L: Into<LayerName>,
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|source| LayeredError::from_foreign(layer.into(), f().into(), source))
            .log_warn(*std::panic::Location::caller())
    }
}
