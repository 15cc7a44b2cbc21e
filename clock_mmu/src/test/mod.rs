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

use crate::{
    modules::page_replacement::PageReplacementModule, MemoryManagementUnit, MmuConfig,
};

mod shared;

pub(crate) fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

pub(crate) fn get_test_mmu<R: PageReplacementModule>(
    page_table_size: usize,
    bits_for_offset: u32,
) -> MemoryManagementUnit<R> {
    init_test_logger();

    MemoryManagementUnit::with_replacement_module(MmuConfig {
        page_table_size,
        bits_for_offset,
    })
    .unwrap()
}

/// Page numbers of all resident pages, ascending
pub(crate) fn resident_pages<R: PageReplacementModule>(mmu: &MemoryManagementUnit<R>) -> Vec<usize> {
    mmu.page_table()
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.valid)
        .map(|(page_number, _)| page_number)
        .collect()
}
