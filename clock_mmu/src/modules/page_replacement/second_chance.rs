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

use log::trace;

use super::{PageReplacementModule, ResidentFrames, Victim};
use crate::FrameId;

/// Second chance (clock) page replacement.
///
/// The clock hand walks over all frames in a circle. Pages that were referenced
/// since the hand last passed them lose their reference bit and are skipped,
/// the first page without a reference bit is evicted.
///
/// The hand stays on the frame of the victim after an eviction, so the next
/// sweep starts at the page that was just loaded into it.
#[derive(Debug, Clone)]
pub struct SecondChanceReplacementModule {
    /// current position of the clock hand, always `< frame_count`
    hand: usize,
    frame_count: usize,
}

impl SecondChanceReplacementModule {
    /// Current position of the clock hand
    #[inline]
    pub fn hand(&self) -> usize {
        self.hand
    }

    #[inline]
    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frame_count;
    }
}

impl PageReplacementModule for SecondChanceReplacementModule {
    fn new(frame_count: usize) -> Self {
        Self {
            hand: 0,
            frame_count,
        }
    }

    fn name(&self) -> &'static str {
        "second_chance"
    }

    fn select_victim(&mut self, mut frames: ResidentFrames<'_>) -> Victim {
        debug_assert_eq!(frames.frame_count(), self.frame_count);

        // one pass clears every reference bit at most once,
        // so a victim has to show up during the second pass
        let max_inspections = 2 * self.frame_count;

        for inspected in 1..=max_inspections {
            let frame = FrameId::new(self.hand);
            trace!("Clock hand at index {}", self.hand);

            match frames.page_of(frame) {
                Some(page_number) if !frames.is_referenced(frame) => {
                    return Victim {
                        frame,
                        page_number,
                        inspected,
                    };
                }
                Some(_) => {
                    // give this page a second chance
                    frames.clear_referenced(frame);
                }
                None => {
                    // cannot happen while all frames are in use, skip it anyway
                }
            }

            self.advance();
        }

        panic!(
            "clock sweep found no victim after {} steps, are all frames bound?",
            max_inspections
        );
    }
}

#[cfg(test)]
mod test {
    use super::SecondChanceReplacementModule;
    use crate::{
        modules::page_replacement::{PageReplacementModule, ResidentFrames, Victim},
        FrameId, FrameTable, PageTable,
    };

    /// page table of `2 * frame_count` pages, frame `i` is bound to page `2 * i + 1`
    fn setup(frame_count: usize, referenced: &[bool]) -> (PageTable, FrameTable) {
        let mut page_table = PageTable::new(2 * frame_count);
        let mut frame_table = FrameTable::new(frame_count);

        for i in 0..frame_count {
            let page_number = 2 * i + 1;
            page_table.install(page_number, FrameId::new(i));
            page_table[page_number].referenced = referenced[i];
            frame_table.bind(FrameId::new(i), page_number);
        }

        (page_table, frame_table)
    }

    #[test]
    fn test_unreferenced_page_at_hand_is_victim() {
        let (mut page_table, frame_table) = setup(3, &[false, false, false]);
        let mut module = SecondChanceReplacementModule::new(3);

        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
        assert_eq!(
            victim,
            Victim {
                frame: FrameId::new(0),
                page_number: 1,
                inspected: 1
            }
        );
        assert_eq!(module.hand(), 0);
    }

    #[test]
    fn test_referenced_pages_get_second_chance() {
        let (mut page_table, frame_table) = setup(4, &[true, true, false, true]);
        let mut module = SecondChanceReplacementModule::new(4);

        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
        assert_eq!(victim.frame, FrameId::new(2));
        assert_eq!(victim.page_number, 5);
        assert_eq!(victim.inspected, 3);
        assert_eq!(module.hand(), 2);

        // skipped pages lost their reference bit, pages behind the hand are untouched
        assert!(!page_table[1].referenced);
        assert!(!page_table[3].referenced);
        assert!(page_table[7].referenced);
    }

    #[test]
    fn test_all_referenced_wraps_around() {
        let (mut page_table, frame_table) = setup(3, &[true, true, true]);
        let mut module = SecondChanceReplacementModule::new(3);
        module.hand = 1;

        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));

        // full pass clearing every bit, then the page where the sweep started
        assert_eq!(victim.frame, FrameId::new(1));
        assert_eq!(victim.inspected, 4);
        assert!(victim.inspected <= 2 * 3);
        assert_eq!(module.hand(), 1);
        assert!(page_table.iter().all(|entry| !entry.referenced));
    }

    #[test]
    fn test_hand_is_kept_between_sweeps() {
        let (mut page_table, frame_table) = setup(3, &[true, false, false]);
        let mut module = SecondChanceReplacementModule::new(3);

        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
        assert_eq!(victim.frame, FrameId::new(1));
        assert_eq!(module.hand(), 1);

        // nothing touched the victim's frame in between: it is chosen again right away
        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
        assert_eq!(victim.frame, FrameId::new(1));
        assert_eq!(victim.inspected, 1);
        assert_eq!(module.hand(), 1);
    }

    #[test]
    fn test_single_frame() {
        let (mut page_table, frame_table) = setup(1, &[true]);
        let mut module = SecondChanceReplacementModule::new(1);

        let victim = module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
        assert_eq!(victim.frame, FrameId::new(0));
        assert_eq!(victim.inspected, 2);
        assert_eq!(module.hand(), 0);
    }

    #[test]
    #[should_panic]
    fn test_no_bound_frame_panics() {
        let mut page_table = PageTable::new(4);
        let frame_table = FrameTable::new(2);
        let mut module = SecondChanceReplacementModule::new(2);

        module.select_victim(ResidentFrames::new(&mut page_table, &frame_table));
    }
}
