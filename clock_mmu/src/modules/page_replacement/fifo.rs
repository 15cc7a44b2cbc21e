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

use super::{PageReplacementModule, ResidentFrames, Victim};
use crate::{util::frame_queue::FrameQueue, FrameId};

/// Evicts the page that has been resident for the longest time.
///
/// Reference bits are ignored completely.
#[derive(Debug, Clone)]
pub struct FifoReplacementModule {
    /// bound frames in the order they were loaded
    load_order: FrameQueue,
}

impl FifoReplacementModule {
    /// Frame that will be chosen by the next eviction
    pub fn next_victim(&self) -> Option<FrameId> {
        self.load_order.front()
    }
}

impl PageReplacementModule for FifoReplacementModule {
    fn new(frame_count: usize) -> Self {
        Self {
            load_order: FrameQueue::new(frame_count),
        }
    }

    fn name(&self) -> &'static str {
        "fifo"
    }

    fn frame_installed(&mut self, frame: FrameId) {
        let res = self.load_order.push_back(frame);
        assert!(res.is_ok(), "{} installed while all frames are bound", frame);
    }

    fn frame_released(&mut self, frame: FrameId) {
        let found = self.load_order.remove(frame);
        debug_assert!(found, "released {} was never installed", frame);
    }

    fn select_victim(&mut self, frames: ResidentFrames<'_>) -> Victim {
        let frame = self
            .load_order
            .pop_front()
            .expect("fifo eviction without any resident page");

        let page_number = frames
            .page_of(frame)
            .expect("frame in load order has to be bound");

        Victim {
            frame,
            page_number,
            inspected: 1,
        }
    }
}
