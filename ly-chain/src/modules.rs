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

use lyerror::{
    report::{report, ReportSink},
    LayeredError, Result,
};

use crate::{aggregating_layer, run_layer, Decision};

/// Name of the outermost, aggregating layer.
pub const MODULE_ONE: &str = "moduleOne";
/// Name of the layer aggregated by [`MODULE_ONE`].
pub const MODULE_TWO: &str = "moduleTwo";
/// Name of the layer directly above the innermost operation.
pub const MODULE_THREE: &str = "moduleThree";
/// Name of the innermost operation.
pub const MODULE_FOUR: &str = "moduleFour";

/// Message of the failure raised by the innermost operation.
pub const INNERMOST_FAILURE: &str = "Something went wrong in moduleFour!";

/// Draws below this value make the innermost operation fail.
pub const FAILURE_THRESHOLD: f64 = 0.5;

/// Number of independent `moduleTwo` runs summed by `moduleOne`.
pub const AGGREGATE_COUNT: usize = 4;

/// The four-level chain `moduleOne` → `moduleTwo` → `moduleThree` → `moduleFour`.
///
/// `moduleFour` draws from the injected [`Decision`] and fails when the draw is below the
/// threshold, otherwise it returns the draw.  `moduleThree` and `moduleTwo` each re-raise a
/// failure with one more frame, and `moduleOne` sums [`AGGREGATE_COUNT`] independent runs of
/// `moduleTwo`, failing as a whole on the first failed run.
///
/// The chain holds no state besides the decision source, so with a deterministic source every
/// run with the same draws has the same outcome.
#[derive(Debug, Clone)]
pub struct ModuleChain<D> {
    decision: D,
    threshold: f64,
}

impl<D: Decision> ModuleChain<D> {
    /// Creates the chain drawing from `decision`, failing below [`FAILURE_THRESHOLD`].
    pub fn new(decision: D) -> Self {
        Self {
            decision,
            threshold: FAILURE_THRESHOLD,
        }
    }

    /// Makes the innermost operation fail for draws below `threshold` instead.
    pub fn with_threshold(self, threshold: f64) -> Self {
        Self { threshold, ..self }
    }

    /// Gives back the decision source.
    pub fn into_decision(self) -> D {
        self.decision
    }

    /// The innermost operation.
    pub fn module_four(&mut self) -> Result<f64> {
        let draw = self.decision.draw();
        if draw < self.threshold {
            return Err(LayeredError::root(MODULE_FOUR, INNERMOST_FAILURE));
        }
        Ok(draw)
    }

    /// Runs [`Self::module_four`] as the `moduleThree` layer.
    pub fn module_three(&mut self) -> Result<f64> {
        run_layer(MODULE_THREE, || self.module_four())
    }

    /// Runs [`Self::module_three`] as the `moduleTwo` layer.
    pub fn module_two(&mut self) -> Result<f64> {
        run_layer(MODULE_TWO, || self.module_three())
    }

    /// Sums [`AGGREGATE_COUNT`] runs of [`Self::module_two`] as the `moduleOne` layer.
    pub fn module_one(&mut self) -> Result<f64> {
        aggregating_layer(MODULE_ONE, AGGREGATE_COUNT, || self.module_two())
    }

    /// Runs the whole chain and reports the outcome to `sink`.
    ///
    /// This is where propagation ends: a success is reported as
    /// `Operation successful, result is {sum}`, a failure as its rendered text, one line per
    /// layer.  Returns the sum on success.
    pub fn run<S>(&mut self, sink: &mut S) -> Option<f64>
    where
        S: ReportSink + ?Sized,
    {
        report(
            self.module_one(),
            sink,
            |sum| format!("Operation successful, result is {sum}"),
            |error| error.render().to_string(),
        )
    }
}
