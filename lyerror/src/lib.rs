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

//! This crate provides a layered error type whose failures are annotated with the name of every
//! layer they unwind through.
//!
//! Errors constructed at the bottom of a call chain are automatically logged as warnings. Every
//! enclosing layer catches the error of its direct callee and wraps it into a new frame, keeping
//! the callee's error as the structured cause.  Nothing is dropped on the way up, so the final
//! error can be rendered as the familiar multi-line text, one line per layer, innermost message
//! last.
//!
//! # Details
//!
//! Use `std::result::Result<T, lyerror::LayeredError>`, or equivalently `lyerror::Result<T>` as
//! the return type for functions which may fail.
//!
//! Constructing the initial, root error is done via the [`LayeredError::root`] method.  This will
//! also log a warning.
//!
//! Errors that are not [`LayeredError`]s but do implement [`std::error::Error`] we name "foreign
//! errors".  These are converted via the [`ForeignError`][traits::ForeignError] trait, which keeps
//! the foreign error as the cause of the new frame.
//!
//! Re-annotating a [`LayeredError`] while it passes through a layer is done via the
//! [`InLayer`][traits::InLayer] trait, instead of using `?` directly.  This way every layer leaves
//! exactly one frame behind.
//!
//! Additional context can be attached to an error using the [`LayeredError::ctx`] method, or the
//! [`ErrorContext`][traits::ErrorContext] extension of [`Result`].
//!
//! The crate also offers some additional features.
//!
//! * [`LayeredError::render`] for the flattened, user-facing text of the whole chain.
//! * [`Loggable`][traits::Loggable] trait which extends the [`Result`] with a method for logging
//!   errors at the error level.  Note, we log all root errors as warnings regardless.
//! * [`report`] module with the sinks an outermost layer reports its outcome to.
//!
//! # Examples
//!
//! ```
//! use lyerror::traits::InLayer;
//!
//! fn parse(s: &str) -> lyerror::Result<i32> {
//!     match s.parse() {
//!         Ok(num) => Ok(num),
//!         Err(_) => Err(lyerror::LayeredError::root("parse", format!("`{s}` is not a number"))),
//!     }
//! }
//!
//! fn double(s: &str) -> lyerror::Result<i32> {
//!     parse(s).in_layer("double").map(|num| num * 2)
//! }
//!
//! let error = double("blah").unwrap_err();
//! assert_eq!(error.layer(), "double");
//! assert_eq!(
//!     error.render().to_string(),
//!     "An error occurred in double:\n`blah` is not a number"
//! );
//! ```

use std::borrow::Cow;

use crate::traits::loggable::Warnable;

mod display;
pub mod report;
pub mod traits;

pub use display::{Rendered, DEFAULT_SEPARATOR};

/// The [`std::result::Result`] alias using [`LayeredError`] as the error type.
pub type Result<T> = std::result::Result<T, LayeredError>;

/// Name of a layer, borrowed for the usual `&'static str` names and owned otherwise.
pub type LayerName = Cow<'static, str>;

/// Returns the headline a layer puts on an error it re-raises, i.e.
/// `An error occurred in {layer}`.
pub fn annotation(layer: &str) -> String {
    format!("An error occurred in {layer}")
}

enum Cause {
    Layered(Box<LayeredError>),
    Foreign(Box<dyn std::error::Error + Send + Sync>),
}

/// A failure annotated with the layer that created it.
///
/// Each value is a single frame of the error chain: the name of the layer, the frame's own
/// message and an optional cause.  The cause is either the [`LayeredError`] raised by the
/// direct callee, or a foreign error the chain started from.  The chain is singly linked and
/// only ever grows outwards, so it is finite and acyclic.
///
/// [`std::fmt::Display`] writes only this frame's message.  Use [`LayeredError::render`] for
/// the whole chain and [`std::fmt::Debug`] for a JSON dump including the context notes.
pub struct LayeredError {
    /// The layer which created this frame.
    layer: LayerName,
    /// This frame's own message.
    message: String,
    /// The optional context notes of the frame.
    context: Vec<Box<dyn std::fmt::Display + Send + Sync>>,
    /// The failure this frame was created from.
    cause: Option<Cause>,
}

impl LayeredError {
    /// Create a root error (i.e. it does not have a cause) and log a warning.
    ///
    /// It should be used in places where a failure happened for the first time, e.g. the
    /// innermost operation of a chain.
    ///
    /// Do *not* use this method to re-raise another error, because the whole chain will be lost.
    /// To keep the cause, use either the [traits::InLayer] or the [traits::ForeignError] trait.
    #[track_caller]
    pub fn root<L, M>(layer: L, message: M) -> Self
    where
        L: Into<LayerName>,
        M: Into<String>,
    {
        Self {
            layer: layer.into(),
            message: message.into(),
            context: Vec::new(),
            cause: None,
        }
        .log_warn(*std::panic::Location::caller())
    }

    /// Wraps `cause` into a new frame created by `layer`.
    ///
    /// This is what [`InLayer`][traits::InLayer] does to the [Err] variant of a
    /// [`Result`].  Use it directly when the error is already at hand.
    ///
    /// ```
    /// use lyerror::LayeredError;
    ///
    /// let cause = LayeredError::root("moduleFour", "Something went wrong in moduleFour!");
    /// let error = LayeredError::wrap("moduleThree", "An error occurred in moduleThree", cause);
    ///
    /// assert_eq!(error.layer(), "moduleThree");
    /// assert_eq!(error.cause().map(LayeredError::layer), Some("moduleFour"));
    /// assert_eq!(
    ///     error.render().to_string(),
    ///     "An error occurred in moduleThree:\nSomething went wrong in moduleFour!"
    /// );
    /// ```
    pub fn wrap<L, M>(layer: L, message: M, cause: LayeredError) -> Self
    where
        L: Into<LayerName>,
        M: Into<String>,
    {
        Self {
            layer: layer.into(),
            message: message.into(),
            context: Vec::new(),
            cause: Some(Cause::Layered(Box::new(cause))),
        }
    }

    /// Creates a frame from a foreign (unknown) error.
    fn from_foreign<S>(layer: LayerName, message: String, source: S) -> Self
    where
        S: std::error::Error + Send + Sync + 'static,
    {
        Self {
            layer,
            message,
            context: Vec::new(),
            cause: Some(Cause::Foreign(Box::new(source))),
        }
    }

    /// Adds a context note to the error and returns it.
    ///
    /// The method takes ownership of `self` so that the method can be chained.  Notes show up in
    /// the [`std::fmt::Debug`] output, the rendered text stays one line per layer.
    pub fn ctx<C>(mut self, context: C) -> Self
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.context.push(Box::new(context));
        self
    }

    /// The name of the layer which created this frame.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// This frame's own message, without any of its causes.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The context notes attached to this frame.
    pub fn context(&self) -> impl Iterator<Item = String> + '_ {
        self.context.iter().map(ToString::to_string)
    }

    /// The [`LayeredError`] this frame was created from, if any.
    ///
    /// Returns [`None`] both for root errors and for frames created from a foreign error; use
    /// [`std::error::Error::source`] to reach the latter.
    pub fn cause(&self) -> Option<&LayeredError> {
        match &self.cause {
            Some(Cause::Layered(cause)) => Some(&**cause),
            _ => None,
        }
    }

    /// Iterates over the frames of the chain, outermost first.
    pub fn frames(&self) -> Frames<'_> {
        Frames { next: Some(self) }
    }

    /// Number of frames in the chain, this one included.
    ///
    /// Walks [`std::error::Error::source`], so a foreign error the chain started from counts
    /// as a frame, as does each of its own sources.  This is the number of lines
    /// [`LayeredError::render`] writes.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(source) = current.source() {
            depth += 1;
            current = source;
        }
        depth
    }

    /// The innermost message of the chain.
    ///
    /// This is the message of the root frame, or the text of the foreign error the chain
    /// started from.
    pub fn root_message(&self) -> String {
        let mut current: &(dyn std::error::Error + 'static) = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current.to_string()
    }

    /// Returns a [`Rendered`] view which displays the whole chain, one message per layer.
    pub fn render(&self) -> Rendered<'_> {
        Rendered::new(self)
    }
}

/// Iterator over the [`LayeredError`] frames of a chain, see [`LayeredError::frames`].
pub struct Frames<'a> {
    next: Option<&'a LayeredError>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a LayeredError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

impl std::error::Error for LayeredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|cause| match cause {
            Cause::Layered(cause) => cause.as_ref() as _,
            // "as _" here denotes casting to the output type, i.e. from
            // (Error + Send + Sync) to (Error + 'static).
            Cause::Foreign(cause) => cause.as_ref() as _,
        })
    }
}
