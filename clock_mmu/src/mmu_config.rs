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

use crate::MmuError;

/// Construction parameters of a [`MemoryManagementUnit`](crate::MemoryManagementUnit).
///
/// The unit always models half as many physical frames as there are pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MmuConfig {
    /// Number of entries in the page table
    pub page_table_size: usize,

    /// How many low bits of a logical address are used for the offset.
    /// The remaining high bits form the page number.
    pub bits_for_offset: u32,
}

impl MmuConfig {
    pub const fn new(page_table_size: usize, bits_for_offset: u32) -> Self {
        Self {
            page_table_size,
            bits_for_offset,
        }
    }

    /// Number of physical frames backing this configuration
    #[inline]
    pub const fn frame_count(&self) -> usize {
        self.page_table_size / 2
    }

    pub fn validate(&self) -> Result<(), MmuError> {
        if self.frame_count() == 0 {
            return Err(MmuError::InvalidConfig(
                "page table needs at least two entries so that one frame exists",
            ));
        }

        if self.bits_for_offset > u32::BITS {
            return Err(MmuError::InvalidConfig(
                "offset cannot be wider than a logical address",
            ));
        }

        Ok(())
    }
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            page_table_size: 256,
            bits_for_offset: 8,
        }
    }
}
