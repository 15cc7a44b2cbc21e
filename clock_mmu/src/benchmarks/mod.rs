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

#[cfg(not(test))]
use std::io::stdout;

use serde::Serialize;

mod access;
mod access_pattern;

pub use access::*;
pub use access_pattern::*;

use crate::{
    modules::page_replacement::{
        FifoReplacementModule, PageReplacementModule, SecondChanceReplacementModule,
    },
    MmuConfig,
};

pub struct RunAllBenchmarkOptions {
    pub run_second_chance_benchmarks: bool,
    pub run_fifo_benchmarks: bool,

    /// accesses per benchmark execution
    pub accesses: usize,

    pub seed: u64,
}

impl Default for RunAllBenchmarkOptions {
    fn default() -> Self {
        Self {
            run_second_chance_benchmarks: false,
            run_fifo_benchmarks: false,
            accesses: 10_000,
            seed: 5446535461589659585,
        }
    }
}

impl RunAllBenchmarkOptions {
    pub fn all() -> Self {
        Self {
            run_second_chance_benchmarks: true,
            run_fifo_benchmarks: true,
            ..Default::default()
        }
    }
}

/// Configurations and patterns every replacement module is benchmarked with
fn benchmark_matrix() -> [(MmuConfig, AccessPattern); 4] {
    [
        (MmuConfig::new(256, 8), AccessPattern::Uniform),
        (
            MmuConfig::new(256, 8),
            AccessPattern::SequentialLoop { loop_length: 129 },
        ),
        (
            MmuConfig::new(256, 8),
            AccessPattern::HotSet {
                hot_pages: 32,
                hot_percentage: 90,
            },
        ),
        (
            MmuConfig::new(4096, 12),
            AccessPattern::HotSet {
                hot_pages: 512,
                hot_percentage: 80,
            },
        ),
    ]
}

pub fn run_all_benchmarks<TIMER: Timer>(
    mut run_options: BenchmarkRunOptions,
    options: RunAllBenchmarkOptions,
) {
    fn run_matrix<R: PageReplacementModule, TIMER: Timer>(
        run_options: &mut BenchmarkRunOptions,
        options: &RunAllBenchmarkOptions,
    ) {
        for (config, pattern) in benchmark_matrix() {
            let bench = AccessBenchmark::<R>::new(config, pattern, options.accesses, options.seed);
            bench.run_benchmark::<TIMER>(run_options);
        }
    }

    if options.run_second_chance_benchmarks {
        run_matrix::<SecondChanceReplacementModule, TIMER>(&mut run_options, &options);
    }

    if options.run_fifo_benchmarks {
        run_matrix::<FifoReplacementModule, TIMER>(&mut run_options, &options);
    }
}

pub trait Benchmark<O: Serialize> {
    fn get_name(&self) -> &'static str;

    fn get_bench_options(&self) -> O;

    fn execute<T: Timer>(&mut self) -> u32;

    #[inline(never)]
    fn run_benchmark<T: Timer>(mut self, options: &mut BenchmarkRunOptions) -> BenchmarkRunResult
    where
        Self: Sized,
    {
        assert_eq!(options.repetitions as usize, options.result_buffer.len());

        print!("Running Benchmark \"{}\" with options ", self.get_name());

        #[cfg(not(test))]
        serde_json::to_writer(stdout(), &self.get_bench_options()).unwrap();
        println!();

        for _ in 0..options.cold_start {
            self.execute::<T>();
        }

        for i in 0..options.result_buffer.len() {
            let res = self.execute::<T>();
            options.result_buffer[i] = res;
        }

        print!("[BENCH-INFO] ");

        #[cfg(not(test))]
        {
            let run_info = BenchmarkRunInfo {
                bench_name: self.get_name(),
                bench_options: &self.get_bench_options(),
                machine_name: options.machine_name,
                cold_start: options.cold_start,
                repetitions: options.repetitions,
                ticks_per_ms: T::get_ticks_per_ms(),
                data: &options.result_buffer,
            };
            serde_json::to_writer(stdout(), &run_info).unwrap();
        }
        println!();

        let res = BenchmarkRunResult::from_buffer(&options.result_buffer);
        println!(
            "-> Finished {}: mean={}, min={}, max={}",
            self.get_name(),
            res.mean_latency,
            res.min_latency,
            res.max_latency
        );
        println!();

        res
    }
}

pub struct BenchmarkRunOptions<'a> {
    pub repetitions: u32,
    pub result_buffer: &'a mut [u32],

    pub cold_start: u32,

    pub machine_name: &'static str,
}

#[derive(Serialize)]
pub struct BenchmarkRunInfo<'a, O: Serialize> {
    bench_name: &'static str,
    bench_options: &'a O,
    machine_name: &'static str,
    cold_start: u32,
    repetitions: u32,
    ticks_per_ms: u32,
    data: &'a [u32],
}

#[derive(Debug)]
pub struct BenchmarkRunResult {
    pub mean_latency: u32,
    pub min_latency: u32,
    pub max_latency: u32,
}

impl BenchmarkRunResult {
    fn from_buffer(buffer: &[u32]) -> Self {
        if buffer.is_empty() {
            return Self {
                mean_latency: 0,
                min_latency: 0,
                max_latency: 0,
            };
        }

        let sum: u64 = buffer.iter().map(|x| *x as u64).sum();
        Self {
            mean_latency: (sum / buffer.len() as u64) as u32,
            min_latency: buffer.iter().copied().min().unwrap_or_default(),
            max_latency: buffer.iter().copied().max().unwrap_or_default(),
        }
    }
}

pub trait Timer {
    fn get_ticks_per_ms() -> u32;

    fn start() -> Self;

    fn stop(self) -> u32;
}

#[cfg(test)]
mod test {
    use super::{
        run_workload, AccessBenchmark, AccessPattern, Benchmark, BenchmarkRunOptions,
        BenchmarkRunResult, Timer,
    };
    use crate::{
        modules::page_replacement::{FifoReplacementModule, SecondChanceReplacementModule},
        MmuConfig,
    };

    /// counts executions instead of measuring time
    struct CountingTimer;

    impl Timer for CountingTimer {
        fn get_ticks_per_ms() -> u32 {
            1
        }

        fn start() -> Self {
            CountingTimer
        }

        fn stop(self) -> u32 {
            1
        }
    }

    #[test]
    fn test_run_workload_is_reproducible() {
        let config = MmuConfig::new(64, 4);
        let pattern = AccessPattern::HotSet {
            hot_pages: 8,
            hot_percentage: 90,
        };

        let first = run_workload::<SecondChanceReplacementModule>(config, pattern, 5000, 3).unwrap();
        let second = run_workload::<SecondChanceReplacementModule>(config, pattern, 5000, 3).unwrap();
        assert_eq!(first, second);

        assert_eq!(first.accesses, 5000);
        assert_eq!(first.hits + first.faults, 5000);
        assert!(first.faults >= 8);
    }

    #[test]
    fn test_sequential_loop_thrashes_fifo() {
        let config = MmuConfig::new(16, 0);
        let pattern = AccessPattern::SequentialLoop { loop_length: 9 };

        let stats = run_workload::<FifoReplacementModule>(config, pattern, 900, 0).unwrap();
        assert_eq!(stats.faults, 900);
        assert_eq!(stats.evictions, 900 - 8);
    }

    #[test]
    fn test_invalid_config() {
        assert!(run_workload::<FifoReplacementModule>(
            MmuConfig::new(1, 0),
            AccessPattern::Uniform,
            10,
            0
        )
        .is_err());
    }

    #[test]
    fn test_access_benchmark() {
        let mut buffer = [0u32; 3];
        let mut run_options = BenchmarkRunOptions {
            repetitions: 3,
            result_buffer: &mut buffer,
            cold_start: 1,
            machine_name: "test",
        };

        let bench = AccessBenchmark::<SecondChanceReplacementModule>::new(
            MmuConfig::new(32, 4),
            AccessPattern::Uniform,
            200,
            11,
        );
        let res = bench.run_benchmark::<CountingTimer>(&mut run_options);

        assert_eq!(res.mean_latency, 1);
        assert_eq!(res.min_latency, 1);
        assert_eq!(res.max_latency, 1);
        assert_eq!(buffer, [1, 1, 1]);
    }

    #[test]
    fn test_access_benchmark_statistics() {
        let mut bench = AccessBenchmark::<FifoReplacementModule>::new(
            MmuConfig::new(32, 4),
            AccessPattern::Uniform,
            200,
            11,
        );
        bench.execute::<CountingTimer>();
        assert_eq!(bench.last_statistics().accesses, 200);
        assert_eq!(bench.get_bench_options().accesses, 200);
    }

    #[test]
    fn test_result_from_buffer() {
        let res = BenchmarkRunResult::from_buffer(&[4, 2, 9]);
        assert_eq!(res.mean_latency, 5);
        assert_eq!(res.min_latency, 2);
        assert_eq!(res.max_latency, 9);

        let res = BenchmarkRunResult::from_buffer(&[]);
        assert_eq!(res.mean_latency, 0);
    }
}
