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

use log::{debug, info, trace};

use crate::{
    modules::page_replacement::{
        PageReplacementModule, ResidentFrames, SecondChanceReplacementModule,
    },
    AddressTranslator, FrameId, FrameTable, FreeFramePool, LogicalAddress, MmuConfig, MmuError,
    PageTable,
};

/// What happened during a single memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The page was already resident
    Hit { frame: FrameId },

    /// The page was not resident and got loaded into `frame`.
    ///
    /// If no free frame was left, `evicted_page` is the page that was bound to `frame` before.
    Fault {
        frame: FrameId,
        evicted_page: Option<usize>,
    },
}

impl AccessOutcome {
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::Fault { .. })
    }

    #[inline]
    pub fn frame(&self) -> FrameId {
        match self {
            AccessOutcome::Hit { frame } => *frame,
            AccessOutcome::Fault { frame, .. } => *frame,
        }
    }
}

/// Result of [`MemoryManagementUnit::access`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryAccess {
    pub logical_address: LogicalAddress,
    pub outcome: AccessOutcome,

    /// `address` translated into the physical address space
    pub physical_address: u64,
}

/// Counters collected over the lifetime of a [`MemoryManagementUnit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MmuStatistics {
    /// successful accesses, i.e. `hits + faults`
    pub accesses: u64,
    pub hits: u64,
    pub faults: u64,

    /// faults that could not be served from the free frame pool
    pub evictions: u64,

    /// total number of entries the replacement module inspected
    pub swept_entries: u64,

    /// most entries inspected during a single eviction
    pub longest_sweep: usize,
}

impl MmuStatistics {
    /// Fraction of accesses that faulted, `0.0` if nothing was accessed yet
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.faults as f64 / self.accesses as f64
        }
    }
}

/// Simulated memory management unit with a single page table.
///
/// Half as many frames as pages are available. Page faults are resolved with a
/// free frame if one is left, otherwise the replacement module `R` chooses a
/// page to evict.
pub struct MemoryManagementUnit<R: PageReplacementModule = SecondChanceReplacementModule> {
    config: MmuConfig,
    translator: AddressTranslator,
    page_table: PageTable,
    frame_table: FrameTable,
    free_frames: FreeFramePool,
    replacement: R,
    statistics: MmuStatistics,
}

impl MemoryManagementUnit<SecondChanceReplacementModule> {
    /// Creates a new unit using second chance replacement
    pub fn new(config: MmuConfig) -> Result<Self, MmuError> {
        Self::with_replacement_module(config)
    }
}

impl<R: PageReplacementModule> MemoryManagementUnit<R> {
    pub fn with_replacement_module(config: MmuConfig) -> Result<Self, MmuError> {
        config.validate()?;

        let frame_count = config.frame_count();
        let replacement = R::new(frame_count);

        info!(
            "Created mmu with {} pages, {} frames and {} offset bits (replacement: {})",
            config.page_table_size,
            frame_count,
            config.bits_for_offset,
            replacement.name()
        );

        Ok(Self {
            config,
            translator: AddressTranslator::new(config.page_table_size, config.bits_for_offset),
            page_table: PageTable::new(config.page_table_size),
            frame_table: FrameTable::new(frame_count),
            free_frames: FreeFramePool::new(frame_count),
            replacement,
            statistics: MmuStatistics::default(),
        })
    }

    /// Accesses `address` and returns `true` if this caused a page fault
    pub fn access_memory_address(&mut self, address: u32) -> Result<bool, MmuError> {
        Ok(self.access(address)?.outcome.is_fault())
    }

    /// Accesses `address`, loading its page if it is not resident yet.
    ///
    /// On a hit only the reference bit of the page is set, nothing else changes.
    pub fn access(&mut self, address: u32) -> Result<MemoryAccess, MmuError> {
        let logical_address = self.translator.translate(address)?;
        let page_number = logical_address.page_number;

        trace!(
            "Accessing memory with page {}, offset {}",
            page_number,
            logical_address.offset
        );

        self.statistics.accesses += 1;

        let entry = &mut self.page_table[page_number];
        let outcome = if entry.valid {
            entry.referenced = true;
            self.statistics.hits += 1;

            AccessOutcome::Hit { frame: entry.frame }
        } else {
            self.statistics.faults += 1;
            self.handle_page_fault(page_number)
        };

        #[cfg(debug_assertions)]
        self.check_integrity();

        Ok(MemoryAccess {
            logical_address,
            outcome,
            physical_address: self
                .translator
                .physical_address(outcome.frame().index(), logical_address.offset),
        })
    }

    /// Accesses all `addresses` in order.
    ///
    /// Stops at the first invalid address, accesses before it stay in effect.
    pub fn access_all<I: IntoIterator<Item = u32>>(
        &mut self,
        addresses: I,
    ) -> Result<MmuStatistics, MmuError> {
        for address in addresses {
            self.access(address)?;
        }

        Ok(self.statistics)
    }

    /// Binds the non resident page `page_number` to a frame
    fn handle_page_fault(&mut self, page_number: usize) -> AccessOutcome {
        debug_assert!(!self.page_table[page_number].valid);

        debug!(
            "Page fault for page {}, free frames: {}",
            page_number,
            self.free_frames.len()
        );

        let (frame, evicted_page) = match self.free_frames.take() {
            Some(frame) => (frame, None),
            None => {
                let victim = self.replacement.select_victim(ResidentFrames::new(
                    &mut self.page_table,
                    &self.frame_table,
                ));

                debug!(
                    "Evicting page {} from {} after inspecting {} entries",
                    victim.page_number, victim.frame, victim.inspected
                );

                let frame = self.page_table.invalidate(victim.page_number);
                assert_eq!(
                    frame, victim.frame,
                    "victim page {} is not bound to {}",
                    victim.page_number, victim.frame
                );
                self.frame_table.unbind(frame);

                self.statistics.evictions += 1;
                self.statistics.swept_entries += victim.inspected as u64;
                self.statistics.longest_sweep = self.statistics.longest_sweep.max(victim.inspected);

                (frame, Some(victim.page_number))
            }
        };

        self.page_table.install(page_number, frame);
        self.frame_table.bind(frame, page_number);
        self.replacement.frame_installed(frame);

        AccessOutcome::Fault {
            frame,
            evicted_page,
        }
    }

    /// Physical address of `address` if its page is resident.
    ///
    /// Unlike [`Self::access`] this has no side effects, the reference bit stays untouched.
    pub fn physical_address(&self, address: u32) -> Result<Option<u64>, MmuError> {
        let logical_address = self.translator.translate(address)?;

        Ok(self.page_table[logical_address.page_number]
            .frame()
            .map(|frame| {
                self.translator
                    .physical_address(frame.index(), logical_address.offset)
            }))
    }

    /// Unmaps `page_number` and puts its frame at the back of the free frame pool.
    ///
    /// Returns `false` if the page was not resident.
    pub fn invalidate_page(&mut self, page_number: usize) -> Result<bool, MmuError> {
        if page_number >= self.page_table.len() {
            return Err(MmuError::InvalidPageNumber {
                page_number,
                page_table_size: self.page_table.len(),
            });
        }

        if !self.page_table[page_number].valid {
            return Ok(false);
        }

        let frame = self.page_table.invalidate(page_number);
        self.frame_table.unbind(frame);
        self.replacement.frame_released(frame);
        self.free_frames.release(frame);

        debug!("Invalidated page {}, released {}", page_number, frame);

        #[cfg(debug_assertions)]
        self.check_integrity();

        Ok(true)
    }

    #[inline]
    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    #[inline]
    pub fn translator(&self) -> &AddressTranslator {
        &self.translator
    }

    #[inline]
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    #[inline]
    pub fn frame_table(&self) -> &FrameTable {
        &self.frame_table
    }

    #[inline]
    pub fn free_frames(&self) -> &FreeFramePool {
        &self.free_frames
    }

    #[inline]
    pub fn free_frame_count(&self) -> usize {
        self.free_frames.len()
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_table.frame_count()
    }

    #[inline]
    pub fn statistics(&self) -> &MmuStatistics {
        &self.statistics
    }

    #[inline]
    pub fn replacement_module(&self) -> &R {
        &self.replacement
    }

    /// Checks that every frame is either free or bound to exactly one valid page.
    ///
    /// Panics if this is not the case.
    pub fn check_integrity(&self) {
        let frame_count = self.frame_count();
        let valid_count = self.page_table.valid_count();

        assert!(
            valid_count <= frame_count,
            "{} resident pages but only {} frames",
            valid_count,
            frame_count
        );
        assert_eq!(
            valid_count + self.free_frames.len(),
            frame_count,
            "frames got lost or duplicated (resident: {}, free: {})",
            valid_count,
            self.free_frames.len()
        );

        for frame in self.free_frames.iter() {
            assert_eq!(
                self.frame_table.owner(frame),
                None,
                "free {} is bound to a page",
                frame
            );
        }

        for (page_number, entry) in self.page_table.iter().enumerate() {
            if let Some(frame) = entry.frame() {
                assert_eq!(
                    self.frame_table.owner(frame),
                    Some(page_number),
                    "page {} and frame table disagree about {}",
                    page_number,
                    frame
                );
            }
        }

        assert_eq!(self.frame_table.bound_count(), valid_count);
    }
}
