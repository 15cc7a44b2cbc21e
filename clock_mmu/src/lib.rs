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

mod address_translator;
mod free_frame_pool;
mod memory_management_unit;
mod mmu_config;
mod mmu_error;
mod page_table;
mod shared_memory_management_unit;
mod util;

#[cfg(test)]
mod test;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub mod modules;

pub use address_translator::{AddressTranslator, LogicalAddress};
pub use free_frame_pool::FreeFramePool;
pub use memory_management_unit::{
    AccessOutcome, MemoryAccess, MemoryManagementUnit, MmuStatistics,
};
pub use mmu_config::MmuConfig;
pub use mmu_error::MmuError;
pub use page_table::{FrameId, FrameTable, PageTable, PageTableEntry};
pub use shared_memory_management_unit::SharedMemoryManagementUnit;
