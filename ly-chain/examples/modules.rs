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

use ly_chain::{
    decision::{Seeded, ThreadRandom},
    ModuleChain,
};
use lyerror::report::ConsoleSink;
use tracing_subscriber::EnvFilter;

/// Seed of the reproducible run.
const SEED: u64 = 2024;

fn main() {
    // e.g. `RUST_LOG=warn` to see every root error as it is raised
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // a fresh outcome on every run, like flipping a coin per `moduleFour` call
    let mut chain = ModuleChain::new(ThreadRandom);
    chain.run(&mut ConsoleSink);

    // the same outcome on every run
    let mut chain = ModuleChain::new(Seeded::new(SEED));
    chain.run(&mut ConsoleSink);
}
