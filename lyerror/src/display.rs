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

use std::error::Error as _;

use crate::{Cause, LayeredError};

/// Separator [`Rendered`] puts between two messages of the chain unless told otherwise.
pub const DEFAULT_SEPARATOR: &str = "\n";

// Writes only the message of this frame.
impl std::fmt::Display for LayeredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Display wrapper writing the flattened text of a whole [`LayeredError`] chain.
///
/// Messages are written outermost first, each followed by `:` and the separator, so a chain
/// created by `moduleTwo` over `moduleThree` over `moduleFour` renders as:
///
/// ```text
/// An error occurred in moduleTwo:
/// An error occurred in moduleThree:
/// Something went wrong in moduleFour!
/// ```
///
/// A foreign error the chain started from is written last, followed by its own sources.
#[derive(Clone, Copy)]
pub struct Rendered<'a> {
    error: &'a LayeredError,
    separator: &'a str,
}

impl<'a> Rendered<'a> {
    pub(crate) fn new(error: &'a LayeredError) -> Self {
        Self {
            error,
            separator: DEFAULT_SEPARATOR,
        }
    }

    /// Uses `separator` between the messages instead of [`DEFAULT_SEPARATOR`].
    pub fn separator(self, separator: &'a str) -> Self {
        Self { separator, ..self }
    }
}

impl std::fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        while let Some(error) = source {
            write!(f, ":{}{}", self.separator, error)?;
            source = error.source();
        }

        Ok(())
    }
}

// Goes through the whole error chain and writes all the frames as JSON.
impl std::fmt::Debug for LayeredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        write!(f, "\"layer\":{}", json_escape(&self.layer))?;
        write!(f, ",\"error\":{}", json_escape(&self.message))?;

        // Write the context notes if present
        if let Some((first, rest)) = self.context.split_first() {
            write!(f, ",\"context\":[{}", json_escape(&first.to_string()))?;
            for context in rest {
                write!(f, ",{}", json_escape(&context.to_string()))?;
            }
            write!(f, "]")?;
        }

        if let Some(cause) = &self.cause {
            write!(f, ",\"source\":")?;

            match cause {
                Cause::Layered(cause) => write!(f, "{:?}", cause)?,
                Cause::Foreign(cause) => debug_foreign_error(cause.as_ref(), f)?,
            }
        }

        write!(f, "}}")
    }
}

fn debug_foreign_error(
    error: &dyn std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    write!(f, "{{")?;

    let error_esc = json_escape(&format!(r"{:?}", error));
    write!(f, "\"error\":{}", error_esc)?;

    if let Some(source) = error.source() {
        write!(f, ",\"source\":")?;

        debug_foreign_error(source, f)?;
    }

    write!(f, "}}")
}

fn json_escape(value: &str) -> String {
    serde_json::json!(value).to_string()
}
