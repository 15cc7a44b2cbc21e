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

/// Errors that can be reported to users of a [`MemoryManagementUnit`](crate::MemoryManagementUnit).
///
/// Broken internal invariants are not part of this list: they are logic errors and panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmuError {
    /// The page number derived from `address` is not covered by the page table
    InvalidAddress {
        address: u32,
        page_number: usize,
        page_table_size: usize,
    },

    /// A page number outside of the page table was passed directly
    InvalidPageNumber {
        page_number: usize,
        page_table_size: usize,
    },

    /// The configuration cannot be used to build an MMU
    InvalidConfig(&'static str),
}

impl fmt::Display for MmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmuError::InvalidAddress {
                address,
                page_number,
                page_table_size,
            } => write!(
                f,
                "invalid address {:#x}: page {} is outside of the page table (size: {})",
                address, page_number, page_table_size
            ),
            MmuError::InvalidPageNumber {
                page_number,
                page_table_size,
            } => write!(
                f,
                "invalid page number {} (page table size: {})",
                page_number, page_table_size
            ),
            MmuError::InvalidConfig(reason) => write!(f, "invalid mmu config: {}", reason),
        }
    }
}

impl std::error::Error for MmuError {}
