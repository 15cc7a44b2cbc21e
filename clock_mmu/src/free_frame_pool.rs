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

use crate::{util::frame_queue::FrameQueue, FrameId};

/// Frames that are currently not bound to any page.
///
/// Frames are handed out in FIFO order: the frame that was freed first is reused first.
#[derive(Debug, Clone)]
pub struct FreeFramePool {
    queue: FrameQueue,
}

impl FreeFramePool {
    /// Creates a pool owning all frames `0..frame_count`, in ascending order
    pub fn new(frame_count: usize) -> Self {
        let mut queue = FrameQueue::new(frame_count);
        for i in 0..frame_count {
            let res = queue.push_back(FrameId::new(i));
            debug_assert!(res.is_ok(), "queue was sized for all frames");
        }

        Self { queue }
    }

    /// Total number of frames this pool was created with
    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[inline]
    pub fn contains(&self, frame: FrameId) -> bool {
        self.queue.contains(frame)
    }

    /// Oldest free frame, which will be handed out next
    #[inline]
    pub fn peek(&self) -> Option<FrameId> {
        self.queue.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.queue.iter()
    }

    pub(crate) fn take(&mut self) -> Option<FrameId> {
        self.queue.pop_front()
    }

    /// Returns `frame` to the pool.
    ///
    /// A frame can only be released once per binding, the pool can never hold
    /// more frames than it was created with.
    pub(crate) fn release(&mut self, frame: FrameId) {
        debug_assert!(!self.contains(frame), "{} released twice", frame);

        let res = self.queue.push_back(frame);
        assert!(
            res.is_ok(),
            "free frame pool overflow: {} was never taken from this pool",
            frame
        );
    }
}
