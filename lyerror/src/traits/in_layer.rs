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

use crate::{annotation, LayerName, LayeredError};

/// Trait for re-raising a [`LayeredError`] from the layer which caught it.
///
/// This trait is implemented for the [`crate::Result`] type.  Every layer should use it on the
/// result of its direct callee, so the failure gets exactly one new frame per layer while the
/// callee's error is kept as the cause.
///
/// To bring errors that aren't [`LayeredError`]s into the chain, use the
/// [`ForeignError`][crate::traits::ForeignError] trait.
pub trait InLayer<T> {
    /// Maps a `Result<T, LayeredError>` by wrapping the [Err] value into a frame of `layer`
    /// with the message `An error occurred in {layer}`.
    ///
    /// The [Ok] variant is left untouched.
    fn in_layer<L>(self, layer: L) -> crate::Result<T>
    where
        L: Into<LayerName>;

    /// Maps a `Result<T, LayeredError>` by wrapping the [Err] value into a frame of `layer`
    /// with a custom message.
    ///
    /// The [Ok] variant is left untouched.  The message is lazily evaluated.
    fn with_layer<L, M, F>(self, layer: L, f: F) -> crate::Result<T>
    where
        L: Into<LayerName>,
        M: Into<String>,
        F: FnOnce() -> M;
}

impl<T> InLayer<T> for crate::Result<T> {
    fn in_layer<L>(self, layer: L) -> crate::Result<T>
    where
        L: Into<LayerName>,
    {
        self.map_err(|cause| {
            let layer = layer.into();
            let message = annotation(&layer);
            LayeredError::wrap(layer, message, cause)
        })
    }

    fn with_layer<L, M, F>(self, layer: L, f: F) -> crate::Result<T>
    where
        L: Into<LayerName>,
        M: Into<String>,
        F: FnOnce() -> M,
    {
        self.map_err(|cause| LayeredError::wrap(layer, f(), cause))
    }
}
