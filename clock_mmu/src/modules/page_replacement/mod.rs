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

mod fifo;
mod second_chance;

pub use fifo::FifoReplacementModule;
pub use second_chance::SecondChanceReplacementModule;

use crate::{FrameId, FrameTable, PageTable};

/// Page chosen for eviction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Victim {
    /// Frame that becomes available once the victim is evicted
    pub frame: FrameId,

    /// Page that is currently bound to `frame`
    pub page_number: usize,

    /// How many resident entries were examined to find this victim
    pub inspected: usize,
}

/// View of all resident pages, addressed by the frame they are bound to.
///
/// Replacement modules can read and clear reference bits, but cannot change
/// which page is bound to which frame.
pub struct ResidentFrames<'a> {
    page_table: &'a mut PageTable,
    frame_table: &'a FrameTable,
}

impl<'a> ResidentFrames<'a> {
    pub(crate) fn new(page_table: &'a mut PageTable, frame_table: &'a FrameTable) -> Self {
        Self {
            page_table,
            frame_table,
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_table.frame_count()
    }

    /// Page currently bound to `frame`
    #[inline]
    pub fn page_of(&self, frame: FrameId) -> Option<usize> {
        self.frame_table.owner(frame)
    }

    /// Whether the page bound to `frame` was referenced since its bit was last cleared.
    ///
    /// Returns `false` if no page is bound to `frame`.
    pub fn is_referenced(&self, frame: FrameId) -> bool {
        self.page_of(frame)
            .map_or(false, |page_number| self.page_table[page_number].referenced)
    }

    /// Clears the reference bit of the page bound to `frame`
    pub fn clear_referenced(&mut self, frame: FrameId) {
        if let Some(page_number) = self.page_of(frame) {
            self.page_table[page_number].referenced = false;
        }
    }
}

pub trait PageReplacementModule {
    fn new(frame_count: usize) -> Self;

    /// Short name used for logging and benchmark output
    fn name(&self) -> &'static str;

    /// A page was just bound to `frame`
    fn frame_installed(&mut self, _frame: FrameId) {}

    /// `frame` was unbound without being chosen as a victim and went back to the free pool
    fn frame_released(&mut self, _frame: FrameId) {}

    /// Chooses a resident page that will be evicted.
    ///
    /// This is only called if no free frame is left, so every frame is bound to a page.
    /// There is no failure case: not finding a victim is a logic error.
    fn select_victim(&mut self, frames: ResidentFrames<'_>) -> Victim;
}
