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

use core::fmt;

use crate::MmuError;

/// A logical address split into its page number and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub page_number: usize,
    pub offset: u32,
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(page={}, offset={})", self.page_number, self.offset)
    }
}

/// Splits logical addresses into page number and offset using precomputed masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTranslator {
    page_table_size: usize,
    bits_for_offset: u32,

    /// low `bits_for_offset` bits are set, everything else is zero
    offset_mask: u32,

    /// complement of `offset_mask`
    page_number_mask: u32,
}

impl AddressTranslator {
    /// `bits_for_offset` has to be at most 32, see [`MmuConfig::validate`](crate::MmuConfig::validate).
    pub fn new(page_table_size: usize, bits_for_offset: u32) -> Self {
        debug_assert!(bits_for_offset <= u32::BITS);

        // 1 << 32 does not fit, in that case the offset covers the whole address
        let offset_mask = 1u32
            .checked_shl(bits_for_offset)
            .map_or(u32::MAX, |bit| bit - 1);

        Self {
            page_table_size,
            bits_for_offset,
            offset_mask,
            page_number_mask: !offset_mask,
        }
    }

    #[inline]
    pub fn offset_mask(&self) -> u32 {
        self.offset_mask
    }

    #[inline]
    pub fn page_number_mask(&self) -> u32 {
        self.page_number_mask
    }

    #[inline]
    pub fn bits_for_offset(&self) -> u32 {
        self.bits_for_offset
    }

    /// Splits `address` without checking the page number against the page table.
    #[inline]
    pub fn decompose(&self, address: u32) -> LogicalAddress {
        let offset = address & self.offset_mask;
        let page_number = (address & self.page_number_mask)
            .checked_shr(self.bits_for_offset)
            .unwrap_or(0);

        LogicalAddress {
            page_number: page_number as usize,
            offset,
        }
    }

    /// Splits `address` and makes sure the resulting page number can be used
    /// to index the page table.
    pub fn translate(&self, address: u32) -> Result<LogicalAddress, MmuError> {
        let logical = self.decompose(address);
        if logical.page_number >= self.page_table_size {
            return Err(MmuError::InvalidAddress {
                address,
                page_number: logical.page_number,
                page_table_size: self.page_table_size,
            });
        }

        Ok(logical)
    }

    /// Physical address of `offset` inside of frame number `frame_index`
    #[inline]
    pub fn physical_address(&self, frame_index: usize, offset: u32) -> u64 {
        let base = (frame_index as u64)
            .checked_shl(self.bits_for_offset)
            .unwrap_or(0);
        base | offset as u64
    }
}
