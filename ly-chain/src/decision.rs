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

//! Sources deciding whether the innermost operation of a chain fails.
//!
//! The innermost operation draws a number from a [`Decision`] and fails when the draw is below
//! its threshold.  Tests inject [`Fixed`] or [`Sequence`] to force either branch, [`Seeded`]
//! gives a reproducible pseudo-random run, and only the demo uses [`ThreadRandom`].

use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

/// A source of draws in the range `[0, 1)`.
pub trait Decision {
    /// Produces the next draw.
    fn draw(&mut self) -> f64;
}

impl<D: Decision + ?Sized> Decision for &mut D {
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Always draws the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed(pub f64);

impl Decision for Fixed {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Replays a list of values in order, starting over after the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
    next: usize,
}

impl Sequence {
    /// Creates a [`Sequence`] replaying `values`, or [`None`] if there are no values.
    pub fn new(values: impl Into<Vec<f64>>) -> Option<Self> {
        let values = values.into();
        if values.is_empty() {
            return None;
        }
        Some(Self { values, next: 0 })
    }

    /// Number of draws made so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl Decision for Sequence {
    fn draw(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Pseudo-random draws from a seeded [`StdRng`].
///
/// Two instances created from the same seed produce the same draws.
#[derive(Debug, Clone)]
pub struct Seeded(StdRng);

impl Seeded {
    /// Creates the source from `seed`.
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Decision for Seeded {
    fn draw(&mut self) -> f64 {
        self.0.gen()
    }
}

/// Unseeded draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl Decision for ThreadRandom {
    fn draw(&mut self) -> f64 {
        rand::random()
    }
}
