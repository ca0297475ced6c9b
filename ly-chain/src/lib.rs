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

//! This crate implements a chain of nested, named layers which re-annotate the failure of the
//! innermost operation as it unwinds, without losing its message.
//!
//! # Details
//!
//! * [`layer`] -- The building blocks: [`run_layer`], [`run_nested`], [`aggregating_layer`] and
//!   the named [`Operation`].
//! * [`decision`] -- The injectable source deciding whether the innermost operation fails.
//! * [`ModuleChain`] -- The four-level chain `moduleOne` → `moduleTwo` → `moduleThree` →
//!   `moduleFour`, where `moduleOne` sums four independent runs of `moduleTwo` and reports the
//!   outcome to a [`ReportSink`][lyerror::report::ReportSink].
//!
//! # Examples
//!
//! ```
//! use ly_chain::{decision::Fixed, ModuleChain};
//! use lyerror::report::{MemorySink, Report};
//!
//! let mut chain = ModuleChain::new(Fixed(0.25));
//! let mut sink = MemorySink::new();
//!
//! assert_eq!(chain.run(&mut sink), None);
//! assert_eq!(
//!     sink.reports(),
//!     [Report::Failure(
//!         "An error occurred in moduleOne:\n\
//!          An error occurred in moduleTwo:\n\
//!          An error occurred in moduleThree:\n\
//!          Something went wrong in moduleFour!"
//!             .to_owned()
//!     )]
//! );
//! ```

pub mod decision;
pub mod layer;
mod modules;

pub use decision::Decision;
pub use layer::{aggregating_layer, run_layer, run_nested, Operation};
pub use modules::{
    ModuleChain, AGGREGATE_COUNT, FAILURE_THRESHOLD, INNERMOST_FAILURE, MODULE_FOUR, MODULE_ONE,
    MODULE_THREE, MODULE_TWO,
};
