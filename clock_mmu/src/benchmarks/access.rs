/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use core::marker::PhantomData;

use serde::Serialize;

use super::{AccessPattern, Benchmark, Timer};
use crate::{
    modules::page_replacement::PageReplacementModule, MemoryManagementUnit, MmuConfig, MmuError,
    MmuStatistics,
};

#[derive(Serialize)]
pub struct AccessBenchmarkOptions {
    pub config: MmuConfig,
    pub pattern: AccessPattern,
    pub replacement: &'static str,
    pub accesses: usize,
    pub seed: u64,
}

/// Runs `accesses` addresses of `pattern` against a fresh unit and returns its statistics
pub fn run_workload<R: PageReplacementModule>(
    config: MmuConfig,
    pattern: AccessPattern,
    accesses: usize,
    seed: u64,
) -> Result<MmuStatistics, MmuError> {
    let mut mmu = MemoryManagementUnit::<R>::with_replacement_module(config)?;
    let addresses = pattern.addresses(config.page_table_size, config.bits_for_offset, seed);

    mmu.access_all(addresses.take(accesses))
}

/// Measures how long `accesses` memory accesses take, starting with a fresh unit every time
pub struct AccessBenchmark<R: PageReplacementModule> {
    config: MmuConfig,
    pattern: AccessPattern,
    accesses: usize,
    seed: u64,
    last_statistics: MmuStatistics,
    _phantom_data: PhantomData<R>,
}

impl<R: PageReplacementModule> AccessBenchmark<R> {
    pub fn new(config: MmuConfig, pattern: AccessPattern, accesses: usize, seed: u64) -> Self {
        Self {
            config,
            pattern,
            accesses,
            seed,
            last_statistics: MmuStatistics::default(),
            _phantom_data: PhantomData,
        }
    }

    /// Statistics of the last execution
    pub fn last_statistics(&self) -> &MmuStatistics {
        &self.last_statistics
    }
}

impl<R: PageReplacementModule> Benchmark<AccessBenchmarkOptions> for AccessBenchmark<R> {
    fn get_name(&self) -> &'static str {
        "access"
    }

    fn get_bench_options(&self) -> AccessBenchmarkOptions {
        AccessBenchmarkOptions {
            config: self.config,
            pattern: self.pattern,
            replacement: R::new(self.config.frame_count()).name(),
            accesses: self.accesses,
            seed: self.seed,
        }
    }

    fn execute<T: Timer>(&mut self) -> u32 {
        let mut mmu = MemoryManagementUnit::<R>::with_replacement_module(self.config)
            .expect("benchmark config has to be valid");
        let mut addresses = self
            .pattern
            .addresses(self.config.page_table_size, self.config.bits_for_offset, self.seed)
            .take(self.accesses);

        let timer = T::start();
        for address in &mut addresses {
            let _ = mmu.access_memory_address(address);
        }
        let ticks = timer.stop();

        self.last_statistics = *mmu.statistics();
        ticks
    }
}
