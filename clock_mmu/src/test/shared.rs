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

use std::{hint::spin_loop, thread};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::get_test_mmu;
use crate::{MemoryManagementUnit, MmuError, SharedMemoryManagementUnit};

#[test]
fn test_shared_mmu_multiple_threads() {
    const THREADS: u64 = 4;
    const ACCESSES_PER_THREAD: u64 = 500;
    const PAGE_TABLE_SIZE: usize = 32;

    let mmu: MemoryManagementUnit = get_test_mmu(PAGE_TABLE_SIZE, 4);
    let shared = SharedMemoryManagementUnit::new(mmu);

    let faults: u64 = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|thread_id| {
                let shared = &shared;
                scope.spawn(move || {
                    let mut rand = SmallRng::seed_from_u64(thread_id);
                    let mut faults = 0u64;

                    for _ in 0..ACCESSES_PER_THREAD {
                        let address = rand.gen_range(0..(PAGE_TABLE_SIZE as u32) << 4);

                        let faulted = loop {
                            // another thread holds the lock, try again
                            match shared.try_access_memory_address(address) {
                                Some(res) => break res.unwrap(),
                                None => spin_loop(),
                            }
                        };

                        if faulted {
                            faults += 1;
                        }
                    }

                    faults
                })
            })
            .collect();

        handles.into_iter().map(|handle| handle.join().unwrap()).sum()
    });

    let mmu = shared.into_inner();
    mmu.check_integrity();

    let stats = mmu.statistics();
    assert_eq!(stats.accesses, THREADS * ACCESSES_PER_THREAD);
    assert_eq!(stats.faults, faults);
    assert_eq!(stats.hits + stats.faults, stats.accesses);
}

#[test]
fn test_shared_mmu_reports_invalid_address() {
    let mmu: MemoryManagementUnit = get_test_mmu(4, 0);
    let shared = SharedMemoryManagementUnit::new(mmu);

    assert!(matches!(
        shared.try_access_memory_address(4),
        Some(Err(MmuError::InvalidAddress { page_number: 4, .. }))
    ));

    let free_frames = shared.try_with(|mmu| mmu.free_frame_count());
    assert_eq!(free_frames, Some(2));
}
