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

use core::{
    fmt,
    mem::size_of,
    ops::{Index, IndexMut},
};

use static_assertions::const_assert;

/// Identifier of a physical frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameId(pub(crate) usize);

impl FrameId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Mapping state of a single page.
///
/// `frame` is only meaningful if `valid` is set.
/// The same holds for `referenced`: an invalid entry may still have it set
/// and nothing should depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageTableEntry {
    pub valid: bool,
    pub referenced: bool,
    pub frame: FrameId,
}

// entries are stored inline, keep them small
const_assert!(size_of::<PageTableEntry>() <= 2 * size_of::<usize>());

impl PageTableEntry {
    pub const fn invalid() -> Self {
        Self {
            valid: false,
            referenced: false,
            frame: FrameId(0),
        }
    }

    /// Entry for a freshly loaded page
    pub const fn resident(frame: FrameId) -> Self {
        Self {
            valid: true,
            referenced: false,
            frame,
        }
    }

    /// Returns the bound frame if this entry is valid
    #[inline]
    pub fn frame(&self) -> Option<FrameId> {
        if self.valid {
            Some(self.frame)
        } else {
            None
        }
    }
}

/// Fixed size page table, indexed by page number.
///
/// The length never changes after construction and entries are updated in place.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Box<[PageTableEntry]>,
}

impl PageTable {
    /// Creates a page table of `size` entries which are all invalid
    pub fn new(size: usize) -> Self {
        Self {
            entries: vec![PageTableEntry::invalid(); size].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, page_number: usize) -> Option<&PageTableEntry> {
        self.entries.get(page_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter()
    }

    /// How many pages are currently resident
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.valid).count()
    }

    /// Binds `page_number` to `frame` as a valid and unreferenced entry
    pub(crate) fn install(&mut self, page_number: usize, frame: FrameId) {
        self.entries[page_number] = PageTableEntry::resident(frame);
    }

    /// Marks `page_number` as not resident and returns the frame it was bound to
    pub(crate) fn invalidate(&mut self, page_number: usize) -> FrameId {
        let entry = &mut self.entries[page_number];
        debug_assert!(entry.valid, "page {} is not resident", page_number);

        entry.valid = false;
        entry.frame
    }
}

impl Index<usize> for PageTable {
    type Output = PageTableEntry;

    #[inline]
    fn index(&self, page_number: usize) -> &Self::Output {
        &self.entries[page_number]
    }
}

impl IndexMut<usize> for PageTable {
    #[inline]
    fn index_mut(&mut self, page_number: usize) -> &mut Self::Output {
        &mut self.entries[page_number]
    }
}

/// Reverse mapping: which page (if any) is bound to each frame.
#[derive(Debug, Clone)]
pub struct FrameTable {
    owners: Box<[Option<usize>]>,
}

impl FrameTable {
    pub fn new(frame_count: usize) -> Self {
        Self {
            owners: vec![None; frame_count].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.owners.len()
    }

    /// Page that is currently bound to `frame`
    #[inline]
    pub fn owner(&self, frame: FrameId) -> Option<usize> {
        self.owners[frame.index()]
    }

    pub fn bound_count(&self) -> usize {
        self.owners.iter().filter(|owner| owner.is_some()).count()
    }

    pub(crate) fn bind(&mut self, frame: FrameId, page_number: usize) {
        let owner = &mut self.owners[frame.index()];
        debug_assert!(
            owner.is_none(),
            "{} is still bound to page {:?}",
            frame,
            owner
        );
        *owner = Some(page_number);
    }

    pub(crate) fn unbind(&mut self, frame: FrameId) -> Option<usize> {
        self.owners[frame.index()].take()
    }
}
