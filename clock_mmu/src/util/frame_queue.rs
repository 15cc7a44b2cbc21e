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

use crate::FrameId;

/// Fixed capacity FIFO of frame ids backed by a ring buffer.
///
/// All storage is allocated once in [`FrameQueue::new`], pushing and popping never allocates.
#[derive(Debug, Clone)]
pub(crate) struct FrameQueue {
    buffer: Box<[FrameId]>,

    /// index of the oldest item
    head: usize,

    /// number of items currently stored
    len: usize,
}

impl FrameQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![FrameId::default(); capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn physical_index(&self, logical_index: usize) -> usize {
        (self.head + logical_index) % self.capacity()
    }

    /// Appends `frame` at the back.
    ///
    /// Returns `Err(())` if the queue is full.
    pub(crate) fn push_back(&mut self, frame: FrameId) -> Result<(), ()> {
        if self.len == self.capacity() {
            return Err(());
        }

        let index = self.physical_index(self.len);
        self.buffer[index] = frame;
        self.len += 1;
        Ok(())
    }

    /// Removes the oldest frame
    pub(crate) fn pop_front(&mut self) -> Option<FrameId> {
        if self.is_empty() {
            return None;
        }

        let frame = self.buffer[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(frame)
    }

    pub(crate) fn front(&self) -> Option<FrameId> {
        if self.is_empty() {
            None
        } else {
            Some(self.buffer[self.head])
        }
    }

    /// Removes `frame` from anywhere in the queue, keeping the order of the remaining items.
    ///
    /// Returns whether `frame` was found.
    pub(crate) fn remove(&mut self, frame: FrameId) -> bool {
        let position = match self.iter().position(|item| item == frame) {
            Some(position) => position,
            None => return false,
        };

        // shift everything behind `position` one slot to the front
        for i in position..(self.len - 1) {
            let to = self.physical_index(i);
            let from = self.physical_index(i + 1);
            self.buffer[to] = self.buffer[from];
        }
        self.len -= 1;
        true
    }

    #[inline]
    pub(crate) fn contains(&self, frame: FrameId) -> bool {
        self.iter().any(|item| item == frame)
    }

    /// Iterates from the oldest to the newest frame
    pub(crate) fn iter(&self) -> impl Iterator<Item = FrameId> + '_ {
        (0..self.len).map(move |i| self.buffer[self.physical_index(i)])
    }
}
