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

use try_lock::TryLock;

use crate::{
    modules::page_replacement::{PageReplacementModule, SecondChanceReplacementModule},
    MemoryManagementUnit, MmuError,
};

/// A [`MemoryManagementUnit`] that can be shared between threads.
///
/// Every access holds one exclusive lock for its whole duration, so fault
/// resolution of two accesses never interleaves.
/// Locking never blocks: if the unit is busy, `None` is returned and the caller
/// decides whether to retry.
pub struct SharedMemoryManagementUnit<R: PageReplacementModule = SecondChanceReplacementModule> {
    inner: TryLock<MemoryManagementUnit<R>>,
}

impl<R: PageReplacementModule> SharedMemoryManagementUnit<R> {
    pub fn new(mmu: MemoryManagementUnit<R>) -> Self {
        Self {
            inner: TryLock::new(mmu),
        }
    }

    /// Same as [`MemoryManagementUnit::access_memory_address`].
    ///
    /// Returns `None` if another thread is accessing the unit right now.
    pub fn try_access_memory_address(&self, address: u32) -> Option<Result<bool, MmuError>> {
        self.try_with(|mmu| mmu.access_memory_address(address))
    }

    /// Runs `f` while holding the lock
    pub fn try_with<T, F: FnOnce(&mut MemoryManagementUnit<R>) -> T>(&self, f: F) -> Option<T> {
        let mut guard = self.inner.try_lock()?;
        Some(f(&mut guard))
    }

    pub fn into_inner(self) -> MemoryManagementUnit<R> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod test {
    use super::SharedMemoryManagementUnit;
    use crate::{MemoryManagementUnit, MmuConfig};

    #[test]
    fn test_busy_while_locked() {
        let mmu = MemoryManagementUnit::new(MmuConfig::new(4, 0)).unwrap();
        let shared = SharedMemoryManagementUnit::new(mmu);

        let res = shared.try_with(|_| {
            // lock is held here, nested accesses have to be rejected
            shared.try_access_memory_address(0)
        });
        assert_eq!(res, Some(None));

        assert_eq!(shared.try_access_memory_address(0), Some(Ok(true)));
        assert_eq!(shared.try_access_memory_address(0), Some(Ok(false)));

        let mmu = shared.into_inner();
        assert_eq!(mmu.statistics().accesses, 2);
    }
}
