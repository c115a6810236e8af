//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Progress reporting hooks for pyramid generation

/// Generation phase currently being reported.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Phase {
    BaseTiles,
    Overviews,
}

/// Observer for tile generation progress.
///
/// `start_phase` is called once per phase with the total tile count before
/// any tile of that phase is produced. `tile_done` is called once per
/// finished tile, possibly from multiple worker threads (serialized by the
/// caller).
pub trait Progress: Send {
    fn start_phase(&mut self, phase: Phase, total: u64);
    fn tile_done(&mut self);
    fn finish(&mut self) {}
}

/// No-op observer for library use and tests.
pub struct NoProgress;

impl Progress for NoProgress {
    fn start_phase(&mut self, _phase: Phase, _total: u64) {}
    fn tile_done(&mut self) {}
}

/// Counting observer for tests.
#[cfg(test)]
pub struct CountingProgress {
    pub phases: Vec<(Phase, u64)>,
    pub ticks: u64,
}

#[cfg(test)]
impl CountingProgress {
    pub fn new() -> CountingProgress {
        CountingProgress {
            phases: Vec::new(),
            ticks: 0,
        }
    }
}

#[cfg(test)]
impl Progress for CountingProgress {
    fn start_phase(&mut self, phase: Phase, total: u64) {
        self.phases.push((phase, total));
    }
    fn tile_done(&mut self) {
        self.ticks += 1;
    }
}
