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

use std::time::Instant;

use clock_mmu::benchmarks::{
    run_all_benchmarks, BenchmarkRunOptions, RunAllBenchmarkOptions, Timer,
};

struct DesktopTimer {
    start_time: Instant,
}

impl Timer for DesktopTimer {
    fn get_ticks_per_ms() -> u32 {
        1000
    }

    #[inline]
    fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    #[inline]
    fn stop(self) -> u32 {
        let micros = (Instant::now() - self.start_time).as_micros();
        u32::try_from(micros).unwrap_or(u32::MAX)
    }
}

fn main() {
    use env_logger::{Builder, Env};
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_module_path(false)
        .init();

    run_all_benchmarks::<DesktopTimer>(
        BenchmarkRunOptions {
            cold_start: 1,
            machine_name: "desktop",
            repetitions: 5,
            result_buffer: &mut [0; 5],
        },
        RunAllBenchmarkOptions::all(),
    );
}
