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

//! Sinks an outermost layer reports its final outcome to.
//!
//! Only the outermost layer of a chain stops propagating a failure.  It does so by handing the
//! outcome, as plain text, to a [`ReportSink`] via [`report`].

use std::fmt::Display;

use crate::{traits::Loggable as _, LayeredError};

/// Receiver of the final outcome of a chain.
pub trait ReportSink {
    /// Receives the summary of a successful run.
    fn success(&mut self, message: &str);

    /// Receives the fully rendered failure of a run.
    fn failure(&mut self, message: &str);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn success(&mut self, message: &str) {
        (**self).success(message);
    }

    fn failure(&mut self, message: &str) {
        (**self).failure(message);
    }
}

/// [`ReportSink`] writing successes to the standard output and failures to the standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    fn success(&mut self, message: &str) {
        println!("{message}");
    }

    fn failure(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// A single outcome recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// A success summary.
    Success(String),
    /// A rendered failure.
    Failure(String),
}

/// [`ReportSink`] keeping every outcome in memory, in the order received.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    reports: Vec<Report>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The outcomes received so far.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }
}

impl ReportSink for MemorySink {
    fn success(&mut self, message: &str) {
        self.reports.push(Report::Success(message.to_owned()));
    }

    fn failure(&mut self, message: &str) {
        self.reports.push(Report::Failure(message.to_owned()));
    }
}

/// Terminates propagation of `result` by reporting it to `sink`.
///
/// On success the summary produced by `on_success` is reported and the value is returned.  On
/// failure the error is logged at the error level, the text produced by `on_failure` is
/// reported and [`None`] is returned.
#[track_caller]
pub fn report<T, S, FS, MS, FF, MF>(
    result: crate::Result<T>,
    sink: &mut S,
    on_success: FS,
    on_failure: FF,
) -> Option<T>
where
    S: ReportSink + ?Sized,
    FS: FnOnce(&T) -> MS,
    MS: Display,
    FF: FnOnce(&LayeredError) -> MF,
    MF: Display,
{
    match result.log_err() {
        Ok(value) => {
            sink.success(&on_success(&value).to_string());
            Some(value)
        }
        Err(error) => {
            sink.failure(&on_failure(&error).to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InLayer as _;

    #[test]
    fn test_report_success() {
        let mut sink = MemorySink::new();

        let value = report(
            Ok(2.5),
            &mut sink,
            |value| format!("result is {value}"),
            |error| error.render().to_string(),
        );

        assert_eq!(value, Some(2.5));
        assert_eq!(sink.reports(), [Report::Success("result is 2.5".to_owned())]);
    }

    #[test]
    fn test_report_failure() {
        let mut sink = MemorySink::new();
        let result: crate::Result<u32> =
            Err(LayeredError::root("inner", "boom")).in_layer("outer");

        let value = report(
            result,
            &mut sink,
            |value| value.to_string(),
            |error| error.render().to_string(),
        );

        assert_eq!(value, None);
        assert_eq!(
            sink.reports(),
            [Report::Failure("An error occurred in outer:\nboom".to_owned())]
        );
    }

    #[test]
    fn test_report_through_mut_reference() {
        fn deliver(mut sink: impl ReportSink) {
            sink.success("first");
            sink.failure("second");
        }

        let mut sink = MemorySink::new();
        deliver(&mut sink);

        assert_eq!(
            sink.reports(),
            [
                Report::Success("first".to_owned()),
                Report::Failure("second".to_owned())
            ]
        );
    }
}
