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

//! Building blocks of a layered operation chain.
//!
//! Every layer invokes its callee, passes a success through unchanged and re-raises a failure
//! with exactly one new frame naming the layer.  A failure is never swallowed and a layer never
//! continues after its callee failed.

use lyerror::{traits::InLayer as _, LayerName, Result};

/// Invokes `inner` as the callee of `layer`.
///
/// On success the value is returned unchanged.  On failure the error is wrapped into a frame of
/// `layer` which renders as `An error occurred in {layer}:` followed by the inner error.
pub fn run_layer<T, L, F>(layer: L, inner: F) -> Result<T>
where
    L: Into<LayerName>,
    F: FnOnce() -> Result<T>,
{
    inner().in_layer(layer)
}

/// Invokes `inner` beneath the given layers, listed outermost first.
///
/// Equivalent to nesting [`run_layer`] once per layer, so a failure of `inner` comes back with
/// one frame per layer, the first layer outermost.
pub fn run_nested<T, I, F>(layers: I, inner: F) -> Result<T>
where
    I: IntoIterator,
    I::IntoIter: DoubleEndedIterator,
    I::Item: Into<LayerName>,
    F: FnOnce() -> Result<T>,
{
    layers
        .into_iter()
        .rev()
        .fold(inner(), |result, layer| result.in_layer(layer))
}

/// Invokes `layer_fn` `count` times and sums the results, as the callee of `layer`.
///
/// The invocations happen in order and independently of each other; results are summed in the
/// same order.  The first failure stops the aggregation, the results gathered so far are dropped
/// and the failure is re-raised in a frame of `layer`.  Aggregating zero invocations yields the
/// empty sum.
pub fn aggregating_layer<T, L, F>(layer: L, count: usize, mut layer_fn: F) -> Result<T>
where
    T: std::iter::Sum<T>,
    L: Into<LayerName>,
    F: FnMut() -> Result<T>,
{
    let layer = layer.into();

    (1..=count)
        .map(|invocation| {
            tracing::trace!(layer = %layer, invocation, count, "aggregating");
            layer_fn()
        })
        .sum::<Result<T>>()
        .in_layer(layer)
}

/// A named unit of work.
///
/// The name is the layer the operation reports failures from when run through
/// [`Operation::layered`].
pub struct Operation<F> {
    name: LayerName,
    execute: F,
}

impl<F> Operation<F> {
    /// Creates an operation called `name` running `execute`.
    pub fn new(name: impl Into<LayerName>, execute: F) -> Self {
        Self {
            name: name.into(),
            execute,
        }
    }

    /// The name of the operation.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T, F> Operation<F>
where
    F: FnMut() -> Result<T>,
{
    /// Runs the operation as is.
    pub fn execute(&mut self) -> Result<T> {
        (self.execute)()
    }

    /// Runs the operation through [`run_layer`], naming the operation in any failure.
    pub fn layered(&mut self) -> Result<T> {
        run_layer(self.name.clone(), &mut self.execute)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use lyerror::LayeredError;

    use super::*;

    fn failing() -> Result<f64> {
        Err(LayeredError::root("innermost", "Something went wrong"))
    }

    #[test]
    fn test_run_layer_passes_success_through() {
        assert_eq!(run_layer("outer", || Ok(0.7)).unwrap(), 0.7);
    }

    #[test]
    fn test_run_layer_annotates_failure() {
        let error = run_layer("outer", failing).unwrap_err();

        assert_eq!(error.layer(), "outer");
        assert_eq!(
            error.render().to_string(),
            "An error occurred in outer:\nSomething went wrong"
        );
    }

    #[test]
    fn test_run_nested_prefixes_outermost_first() {
        for depth in 1..=6 {
            let layers: Vec<String> = (1..=depth).map(|n| format!("layer{n}")).collect();

            let error = run_nested(layers.clone(), failing).unwrap_err();
            let rendered = error.render().to_string();

            assert_eq!(rendered.matches("An error occurred in ").count(), depth);
            assert!(rendered.ends_with("Something went wrong"));

            let positions: Vec<usize> = layers
                .iter()
                .map(|layer| rendered.find(&format!("in {layer}:")).unwrap())
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(error.depth(), depth + 1);
        }
    }

    #[test]
    fn test_run_nested_without_layers() {
        let error = run_nested(Vec::<&'static str>::new(), failing).unwrap_err();

        assert_eq!(error.layer(), "innermost");
        assert_eq!(error.depth(), 1);
        assert_eq!(run_nested(["a", "b"], || Ok(3)).unwrap(), 3);
    }

    #[test]
    fn test_aggregating_layer_sums_in_order() {
        let mut seen = Vec::new();
        let mut next = 0;

        let sum = aggregating_layer("outer", 4, || {
            next += 1;
            seen.push(next);
            Ok(next)
        })
        .unwrap();

        assert_eq!(sum, 10);
        assert_eq!(seen, [1, 2, 3, 4]);
    }

    #[test]
    fn test_aggregating_layer_stops_at_first_failure() {
        let calls = Cell::new(0);

        let error = aggregating_layer("outer", 4, || {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                failing()
            } else {
                Ok(1.0)
            }
        })
        .unwrap_err();

        assert_eq!(calls.get(), 2);
        assert_eq!(error.layer(), "outer");
        assert_eq!(error.root_message(), "Something went wrong");
    }

    #[test]
    fn test_aggregating_layer_any_count_keeps_inner_message() {
        for count in 1..=8 {
            let error = aggregating_layer("outer", count, failing).unwrap_err();

            assert!(error
                .render()
                .to_string()
                .contains("Something went wrong"));
        }
    }

    #[test]
    fn test_aggregating_layer_zero_count() {
        let sum: u32 = aggregating_layer("outer", 0, || -> Result<u32> {
            panic!("must not be invoked")
        })
        .unwrap();

        assert_eq!(sum, 0);
    }

    #[test]
    fn test_operation() {
        let mut operation = Operation::new("moduleFour", failing);

        assert_eq!(operation.name(), "moduleFour");
        assert_eq!(operation.execute().unwrap_err().layer(), "innermost");

        let error = operation.layered().unwrap_err();
        assert_eq!(error.layer(), "moduleFour");
        assert_eq!(error.message(), "An error occurred in moduleFour");

        let mut operation =
            Operation::new(String::from("constant"), || -> Result<f64> { Ok(1.5) });
        assert_eq!(operation.layered().unwrap(), 1.5);
    }
}
