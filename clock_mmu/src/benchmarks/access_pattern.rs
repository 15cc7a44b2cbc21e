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

use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};
use serde::Serialize;

/// Distribution of the page numbers a workload accesses
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AccessPattern {
    /// every page is equally likely
    Uniform,

    /// pages `0..loop_length` over and over again, in order
    SequentialLoop { loop_length: usize },

    /// `hot_percentage` percent of all accesses go to the first `hot_pages` pages
    HotSet {
        hot_pages: usize,
        hot_percentage: u32,
    },
}

impl AccessPattern {
    pub const fn name(&self) -> &'static str {
        match self {
            AccessPattern::Uniform => "uniform",
            AccessPattern::SequentialLoop { .. } => "sequential_loop",
            AccessPattern::HotSet { .. } => "hot_set",
        }
    }

    /// Creates a reproducible stream of logical addresses following this pattern
    pub fn addresses(
        &self,
        page_table_size: usize,
        bits_for_offset: u32,
        seed: u64,
    ) -> AddressStream {
        debug_assert!(page_table_size > 0);

        AddressStream {
            pattern: *self,
            page_table_size,
            bits_for_offset,
            rand: SmallRng::seed_from_u64(seed),
            position: 0,
        }
    }
}

/// Endless iterator of addresses, see [`AccessPattern::addresses`]
pub struct AddressStream {
    pattern: AccessPattern,
    page_table_size: usize,
    bits_for_offset: u32,
    rand: SmallRng,
    position: usize,
}

impl AddressStream {
    fn next_page(&mut self) -> usize {
        match self.pattern {
            AccessPattern::Uniform => self.rand.gen_range(0..self.page_table_size),
            AccessPattern::SequentialLoop { loop_length } => {
                let length = loop_length.clamp(1, self.page_table_size);
                let page = self.position % length;
                self.position += 1;
                page
            }
            AccessPattern::HotSet {
                hot_pages,
                hot_percentage,
            } => {
                let hot_pages = hot_pages.clamp(1, self.page_table_size);
                if hot_pages == self.page_table_size || self.rand.gen_ratio(hot_percentage.min(100), 100) {
                    self.rand.gen_range(0..hot_pages)
                } else {
                    self.rand.gen_range(hot_pages..self.page_table_size)
                }
            }
        }
    }
}

impl Iterator for AddressStream {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let page = self.next_page() as u32;
        let offset_mask = 1u32
            .checked_shl(self.bits_for_offset)
            .map_or(u32::MAX, |bit| bit - 1);
        let offset = self.rand.next_u32() & offset_mask;

        Some(
            page.checked_shl(self.bits_for_offset)
                .unwrap_or(0)
                | offset,
        )
    }
}
