//! `RcArray`: an ordered array of reference-counted objects.
//!
//! The array owns one increment of every non-null object it holds, one per
//! slot the object occupies. Ownership-changing operations drive the
//! element protocol (`inc_reference_count`, then on release
//! `dec_reference_count_without_deleting` followed by destruction at
//! zero); order-changing operations (`swap`, `move_element`, `sort`,
//! `swap_with`) only permute plain slot values and never touch a count.
//!
//! Slots hold raw `*mut T` values. Null is a legal occupant. Every
//! non-null slot value is a copy of a pointer minted by [`Shared::new`],
//! which is what makes the release path's `Box::from_raw` sound.
//!
//! Release discipline: `remove_range` nulls each slot before releasing its
//! occupant, and teardown pops slots before releasing them, so an element
//! destructor that reaches back toward the array cannot find a dangling
//! handle. Unsafe code is confined to slot dereference and the release
//! primitive below.

use crate::handle_store::HandleStore;
use crate::locking::{LockPolicy, NoLock};
use crate::reentry::ReentryCheck;
use crate::refcount::RefCounted;
use crate::shared::Shared;
use core::cmp::Ordering;
use core::ops::{Bound, RangeBounds};
use core::ptr::{self, NonNull};

/// Ordered array of reference-counted objects, with a pluggable locking
/// policy `P` wrapping every public operation.
pub struct RcArray<T: RefCounted, P: LockPolicy = NoLock> {
    store: HandleStore<T>,
    lock: P,
    reentry: ReentryCheck,
}

/// Borrows the object behind a slot value.
///
/// # Safety
/// `handle` must be null or point to an object kept live for `'a` (here:
/// by the increment the borrowed array holds for the slot).
unsafe fn slot_ref<'a, T>(handle: *mut T) -> Option<&'a T> {
    unsafe { handle.as_ref() }
}

/// The release primitive: decrement, destroy at zero. Null is a no-op.
///
/// # Safety
/// `handle` must be null or a live pointer from the [`Shared::new`]
/// allocation chain, with the caller giving up one increment.
unsafe fn release<T: RefCounted>(handle: *mut T) {
    let now_zero = match unsafe { handle.as_ref() } {
        Some(object) => object.dec_reference_count_without_deleting(),
        None => return,
    };
    if now_zero {
        drop(unsafe { Box::from_raw(handle) });
    }
}

/// Increments a prospective occupant and returns its slot value.
fn incremented<T: RefCounted>(object: Option<&Shared<T>>) -> *mut T {
    match object {
        Some(shared) => {
            (**shared).inc_reference_count();
            shared.as_slot()
        }
        None => ptr::null_mut(),
    }
}

/// Pointer-identity scan. `target` is null when searching for a null slot.
fn find_slot<T>(slots: &[*mut T], target: *const T) -> Option<usize> {
    slots.iter().position(|&slot| ptr::eq(slot, target))
}

fn identity<T>(object: Option<&T>) -> *const T {
    object.map_or(ptr::null(), |o| o as *const T)
}

/// Clamps any range expression to `[0, len]`, the way every range-taking
/// operation here treats out-of-range bounds.
fn clamp_range<R: RangeBounds<usize>>(range: &R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    let start = start.min(len);
    (start, end.min(len).max(start))
}

impl<T: RefCounted, P: LockPolicy> RcArray<T, P> {
    /// An empty array. Allocates nothing until the first element arrives.
    pub fn new() -> Self {
        Self {
            store: HandleStore::new(),
            lock: P::default(),
            reentry: ReentryCheck::new(),
        }
    }

    pub fn len(&self) -> usize {
        let _guard = self.lock.enter();
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Allocated slots. `capacity() >= len()` at all times.
    pub fn capacity(&self) -> usize {
        let _guard = self.lock.enter();
        self.store.capacity()
    }

    /// The object at `index`, or `None` when `index` is out of range (the
    /// slot may also legally hold null). Never alters reference counts.
    pub fn get(&self, index: usize) -> Option<&T> {
        let _guard = self.lock.enter();
        if index < self.store.len() {
            // Safety: in-range occupants stay live while `self` is borrowed.
            unsafe { slot_ref(self.store.slot(index)) }
        } else {
            None
        }
    }

    /// Unchecked variant of [`get`](Self::get).
    ///
    /// # Safety
    /// `index` must be less than [`len`](Self::len); anything else is
    /// undefined behavior, not a reported error.
    pub unsafe fn get_unchecked(&self, index: usize) -> Option<&T> {
        let _guard = self.lock.enter();
        debug_assert!(index < self.store.len());
        unsafe { slot_ref(self.store.slot_unchecked(index)) }
    }

    /// An owning handle to the object at `index`, adding one reference for
    /// the caller. `None` when out of range or the slot holds null.
    pub fn get_shared(&self, index: usize) -> Option<Shared<T>> {
        let _guard = self.lock.enter();
        if index >= self.store.len() {
            return None;
        }
        NonNull::new(self.store.slot(index)).map(|object| {
            unsafe { object.as_ref() }.inc_reference_count();
            // Safety: the fresh increment above belongs to the new handle.
            unsafe { Shared::adopt(object) }
        })
    }

    pub fn first(&self) -> Option<&T> {
        let _guard = self.lock.enter();
        let slots = self.store.slots();
        // Safety: occupants stay live while `self` is borrowed.
        slots.first().and_then(|&slot| unsafe { slot_ref(slot) })
    }

    pub fn last(&self) -> Option<&T> {
        let _guard = self.lock.enter();
        let slots = self.store.slots();
        // Safety: occupants stay live while `self` is borrowed.
        slots.last().and_then(|&slot| unsafe { slot_ref(slot) })
    }

    /// Index of the first slot holding exactly this object (or the first
    /// null slot when `object` is `None`). Pointer identity, linear scan.
    pub fn index_of(&self, object: Option<&T>) -> Option<usize> {
        let _guard = self.lock.enter();
        find_slot(self.store.slots(), identity(object))
    }

    pub fn contains(&self, object: Option<&T>) -> bool {
        let _guard = self.lock.enter();
        find_slot(self.store.slots(), identity(object)).is_some()
    }

    /// Raw front-to-back traversal of the slots.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = Option<&'a T>> + 'a {
        let _guard = self.lock.enter();
        // Safety: occupants stay live while `self` is borrowed.
        self.store
            .slots()
            .iter()
            .map(|&slot| unsafe { slot_ref(slot) })
    }

    /// Appends, taking one reference to the object. Amortized O(1).
    pub fn push(&mut self, object: Option<&Shared<T>>) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        store.append(incremented(object));
    }

    /// Inserts at `index` (clamped to the end), shifting the tail right by
    /// one slot and taking one reference to the object. O(n).
    pub fn insert(&mut self, index: usize, object: Option<&Shared<T>>) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let index = index.min(store.len());
        store.insert_at(index, incremented(object));
    }

    /// Appends unless the object is already present (pointer identity).
    /// Returns whether it was added.
    pub fn push_if_absent(&mut self, object: Option<&Shared<T>>) -> bool {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let target: *const T = object.map_or(ptr::null(), |shared| shared.as_ptr());
        if find_slot(store.slots(), target).is_some() {
            return false;
        }
        store.append(incremented(object));
        true
    }

    /// Replaces the occupant of `index`, releasing the previous one; when
    /// `index` is past the end the object is appended instead.
    pub fn set(&mut self, index: usize, object: Option<&Shared<T>>) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        Self::set_slot(store, index, object);
    }

    // The new occupant is incremented before the old one is released, so
    // replacing an element with itself cannot drop it to zero in between.
    fn set_slot(store: &mut HandleStore<T>, index: usize, object: Option<&Shared<T>>) {
        let handle = incremented(object);
        if index < store.len() {
            let old = store.replace_slot(index, handle);
            // Safety: giving up the increment the array held for `old`.
            unsafe { release(old) };
        } else {
            store.append(handle);
        }
    }

    /// Appends the `range` of `source`'s slots (clamped to its length),
    /// taking one reference per non-null appended object.
    pub fn extend_from<P2, R>(&mut self, source: &RcArray<T, P2>, range: R)
    where
        P2: LockPolicy,
        R: RangeBounds<usize>,
    {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _source_guard = source.lock.enter();
        let _entry = reentry.enter();
        let (start, end) = clamp_range(&range, source.store.len());
        if end > start {
            store.ensure_allocated(store.len() + (end - start));
            for &slot in &source.store.slots()[start..end] {
                // Safety: live while `source` holds its increment.
                if let Some(object) = unsafe { slot_ref(slot) } {
                    object.inc_reference_count();
                }
                store.append(slot);
            }
        }
    }

    /// Removes the slot at `index`, releasing its occupant. Out-of-range
    /// indices are a no-op. Shrinks the buffer when it falls half empty.
    pub fn remove(&mut self, index: usize) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        Self::remove_slot(store, index);
    }

    fn remove_slot(store: &mut HandleStore<T>, index: usize) {
        if index >= store.len() {
            return;
        }
        // Safety: giving up the increment the array held for this slot.
        unsafe { release(store.slot(index)) };
        store.remove_at(index);
        if store.is_underused() {
            store.shrink_to_at_most(store.len());
        }
    }

    /// Like [`remove`](Self::remove), but hands the slot's reference to
    /// the caller instead of releasing it. `None` when out of range or the
    /// slot held null (the slot is still removed in the latter case).
    pub fn remove_and_return(&mut self, index: usize) -> Option<Shared<T>> {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        if index >= store.len() {
            return None;
        }
        let handle = store.remove_at(index);
        if store.is_underused() {
            store.shrink_to_at_most(store.len());
        }
        // Safety: the increment the array held for this slot transfers to
        // the returned handle.
        NonNull::new(handle).map(|object| unsafe { Shared::adopt(object) })
    }

    /// Removes the first occurrence of the object (pointer identity), if
    /// any, releasing it.
    pub fn remove_object(&mut self, object: Option<&T>) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        if let Some(index) = find_slot(store.slots(), identity(object)) {
            Self::remove_slot(store, index);
        }
    }

    /// Removes `range` (clamped to the array), releasing every occupant.
    ///
    /// Each slot is nulled before its occupant is released, so a
    /// destructor that reaches back into this array cannot hit a dangling
    /// handle. The tail moves down in one block afterwards.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let (start, end) = clamp_range(&range, store.len());
        if end > start {
            for index in start..end {
                let handle = store.replace_slot(index, ptr::null_mut());
                // Safety: giving up the increment the array held for this slot.
                unsafe { release(handle) };
            }
            store.remove_span(start, end);
            if store.is_underused() {
                store.shrink_to_at_most(store.len());
            }
        }
    }

    /// Removes the last `min(n, len)` elements, one at a time.
    pub fn remove_last(&mut self, n: usize) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let n = n.min(store.len());
        for _ in 0..n {
            let last = store.len() - 1;
            Self::remove_slot(store, last);
        }
    }

    /// Exchanges two slots. No reference-count traffic; no-op unless both
    /// indices are in range.
    pub fn swap(&mut self, a: usize, b: usize) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        if a < store.len() && b < store.len() {
            store.swap_slots(a, b);
        }
    }

    /// Relocates the element at `from` to `to` (clamped to the last valid
    /// index), shifting everything between by one slot. No reference-count
    /// traffic; no-op when `from` is out of range.
    pub fn move_element(&mut self, from: usize, to: usize) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        if from >= store.len() {
            return;
        }
        let to = to.min(store.len() - 1);
        if from != to {
            store.rotate_to(from, to);
        }
    }

    /// O(1) exchange of the two arrays' entire contents. No
    /// reference-count traffic: every held increment travels with its
    /// slot.
    pub fn swap_with<P2: LockPolicy>(&mut self, other: &mut RcArray<T, P2>) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _other_guard = other.lock.enter();
        let _entry = reentry.enter();
        store.swap_with(&mut other.store);
    }

    /// Releases every occupant and frees the backing buffer.
    pub fn clear(&mut self) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        Self::release_all(store);
        store.free_storage();
    }

    /// Releases every occupant but keeps the allocated capacity.
    pub fn clear_quick(&mut self) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        Self::release_all(store);
    }

    // Teardown order: the slot leaves the array before its occupant is
    // released, so destructors never observe the dying slot.
    fn release_all(store: &mut HandleStore<T>) {
        while let Some(handle) = store.pop() {
            // Safety: giving up the increment the array held for this slot.
            unsafe { release(handle) };
        }
    }

    /// Grows the backing buffer so at least `min_capacity` slots fit,
    /// avoiding repeated reallocation ahead of a known batch of additions.
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        store.ensure_allocated(min_capacity);
    }

    /// Releases any excess allocated capacity.
    pub fn shrink_to_fit(&mut self) {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        store.shrink_to_at_most(store.len());
    }

    /// Inserts into an array sorted under `compare`, keeping it sorted,
    /// and returns the insertion index. Ties land just after an existing
    /// equal element. Unspecified (but safe) results if the array is not
    /// sorted under `compare`.
    pub fn add_sorted<F>(&mut self, mut compare: F, object: Option<&Shared<T>>) -> usize
    where
        F: FnMut(Option<&T>, Option<&T>) -> Ordering,
    {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let target = object.map(|shared| &**shared);
        let index = Self::insertion_index(store, &mut compare, target);
        store.insert_at(index, incremented(object));
        index
    }

    /// Like [`add_sorted`](Self::add_sorted), but when the element just
    /// before the insertion point compares equal to `object`, that slot is
    /// replaced instead of a new one being inserted.
    pub fn add_or_replace_sorted<F>(&mut self, mut compare: F, object: Option<&Shared<T>>)
    where
        F: FnMut(Option<&T>, Option<&T>) -> Ordering,
    {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let target = object.map(|shared| &**shared);
        let index = Self::insertion_index(store, &mut compare, target);
        // Safety: index <= len, so index - 1 is in range when index > 0.
        let replaces = index > 0
            && compare(target, unsafe { slot_ref(store.slot(index - 1)) }) == Ordering::Equal;
        if replaces {
            Self::set_slot(store, index - 1, object);
        } else {
            store.insert_at(index, incremented(object));
        }
    }

    // Bisection for the slot a new element should land in. Equal elements
    // terminate the search one past the match they were compared against.
    fn insertion_index<F>(store: &HandleStore<T>, compare: &mut F, target: Option<&T>) -> usize
    where
        F: FnMut(Option<&T>, Option<&T>) -> Ordering,
    {
        let mut first = 0usize;
        let mut last = store.len();
        while first < last {
            // Safety: first < last <= len throughout the loop.
            if compare(target, unsafe { slot_ref(store.slot(first)) }) == Ordering::Equal {
                first += 1;
                break;
            }
            let halfway = (first + last) / 2;
            if halfway == first {
                if compare(target, unsafe { slot_ref(store.slot(halfway)) }) != Ordering::Less {
                    first += 1;
                }
                break;
            }
            if compare(target, unsafe { slot_ref(store.slot(halfway)) }) != Ordering::Less {
                first = halfway;
            } else {
                last = halfway;
            }
        }
        first
    }

    /// Bisection search in an array sorted under `compare`. Returns an
    /// index whose element compares equal to `target`, or `None`.
    ///
    /// This is not a textbook bisection: each round first probes the low
    /// end of the interval, and the search gives up as soon as the halfway
    /// point stops moving. On inputs that are not consistently sorted it
    /// can miss elements a classical search would find; that behavior is
    /// intentional and pinned by regression tests.
    pub fn index_of_sorted<F>(&self, mut compare: F, target: Option<&T>) -> Option<usize>
    where
        F: FnMut(Option<&T>, Option<&T>) -> Ordering,
    {
        let _guard = self.lock.enter();
        let store = &self.store;
        let mut s = 0usize;
        let mut e = store.len();
        while s < e {
            // Safety: s < e <= len throughout the loop.
            if compare(target, unsafe { slot_ref(store.slot(s)) }) == Ordering::Equal {
                return Some(s);
            }
            let halfway = (s + e) / 2;
            if halfway == s {
                break;
            }
            if compare(target, unsafe { slot_ref(store.slot(halfway)) }) != Ordering::Less {
                s = halfway;
            } else {
                e = halfway;
            }
        }
        None
    }

    /// Sorts in place under `compare`. The stable variant keeps
    /// comparator-equal elements in their current relative order; the
    /// unstable variant is faster and may permute them.
    ///
    /// Slots are plain values, so permuting them is count-neutral; a
    /// comparator without a consistent total order produces an unspecified
    /// permutation but cannot corrupt the array.
    pub fn sort<F>(&mut self, mut compare: F, stable: bool)
    where
        F: FnMut(Option<&T>, Option<&T>) -> Ordering,
    {
        let Self {
            store,
            lock,
            reentry,
        } = self;
        let _guard = lock.enter();
        let _entry = reentry.enter();
        let by = |a: &*mut T, b: &*mut T| {
            // Safety: occupants stay live across the sort.
            let (a, b) = unsafe { (slot_ref(*a), slot_ref(*b)) };
            compare(a, b)
        };
        if stable {
            store.slots_mut().sort_by(by);
        } else {
            store.slots_mut().sort_unstable_by(by);
        }
    }
}

impl<T: RefCounted, P: LockPolicy> Default for RcArray<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RefCounted, P: LockPolicy> Clone for RcArray<T, P> {
    /// Deep copy: a fresh, exactly-sized buffer with one new reference per
    /// copied non-null slot. Mutating either array never affects the
    /// other.
    fn clone(&self) -> Self {
        let _guard = self.lock.enter();
        let mut store = HandleStore::with_exact_capacity(self.store.len());
        for &slot in self.store.slots() {
            // Safety: live while `self` holds its increment.
            if let Some(object) = unsafe { slot_ref(slot) } {
                object.inc_reference_count();
            }
            store.append(slot);
        }
        Self {
            store,
            lock: P::default(),
            reentry: ReentryCheck::new(),
        }
    }
}

impl<T: RefCounted, P: LockPolicy> Drop for RcArray<T, P> {
    fn drop(&mut self) {
        let Self { store, reentry, .. } = self;
        let _entry = reentry.enter();
        Self::release_all(store);
    }
}

impl<T: RefCounted, P: LockPolicy> PartialEq for RcArray<T, P> {
    /// Slot identity, in order. Two arrays are equal iff they hold the
    /// same objects (by pointer) at the same indices.
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let _guard = self.lock.enter();
        let _other_guard = other.lock.enter();
        self.store.len() == other.store.len()
            && self
                .store
                .slots()
                .iter()
                .zip(other.store.slots())
                .all(|(&a, &b)| ptr::eq(a, b))
    }
}

impl<T: RefCounted, P: LockPolicy> Eq for RcArray<T, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refcount::RefCount;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Item {
        refs: RefCount,
        id: u32,
        drops: Rc<Cell<usize>>,
    }

    impl RefCounted for Item {
        fn inc_reference_count(&self) {
            self.refs.increment()
        }
        fn dec_reference_count_without_deleting(&self) -> bool {
            self.refs.decrement()
        }
    }

    impl Drop for Item {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn item(id: u32, drops: &Rc<Cell<usize>>) -> Shared<Item> {
        Shared::new(Item {
            refs: RefCount::new(),
            id,
            drops: Rc::clone(drops),
        })
    }

    #[test]
    fn clamp_range_clips_both_ends() {
        assert_eq!(clamp_range(&(..), 5), (0, 5));
        assert_eq!(clamp_range(&(1..3), 5), (1, 3));
        assert_eq!(clamp_range(&(3..100), 5), (3, 5));
        assert_eq!(clamp_range(&(7..9), 5), (5, 5));
        assert_eq!(clamp_range(&(2..=2), 5), (2, 3));
        assert_eq!(clamp_range(&(..2), 5), (0, 2));
        assert_eq!(clamp_range(&(4..1), 5), (4, 4));
    }

    #[test]
    fn push_holds_one_reference_per_slot() {
        let drops = Rc::new(Cell::new(0));
        let a = item(1, &drops);
        let mut arr: RcArray<Item> = RcArray::new();

        arr.push(Some(&a));
        assert_eq!(a.refs.count(), 2);
        arr.push(Some(&a));
        assert_eq!(a.refs.count(), 3);

        arr.remove(0);
        assert_eq!(a.refs.count(), 2);
        drop(arr);
        assert_eq!(a.refs.count(), 1);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn null_slots_are_legal_contents() {
        let drops = Rc::new(Cell::new(0));
        let a = item(1, &drops);
        let mut arr: RcArray<Item> = RcArray::new();

        arr.push(None);
        arr.push(Some(&a));
        assert_eq!(arr.len(), 2);
        assert!(arr.get(0).is_none());
        assert_eq!(arr.get(1).map(|o| o.id), Some(1));
        assert_eq!(arr.index_of(None), Some(0));
        assert!(arr.contains(None));

        // Removing a null slot is count-neutral.
        arr.remove(0);
        assert_eq!(arr.len(), 1);
        assert_eq!(a.refs.count(), 2);
    }

    #[test]
    fn set_replacing_an_element_with_itself_is_safe() {
        let drops = Rc::new(Cell::new(0));
        let a = item(1, &drops);
        let mut arr: RcArray<Item> = RcArray::new();
        arr.push(Some(&a));

        // The only outside reference goes away; the array keeps the object
        // alive through the self-replacement.
        let only_slot_ref = a.clone();
        drop(a);
        arr.set(0, Some(&only_slot_ref));
        drop(only_slot_ref);

        assert_eq!(drops.get(), 0);
        assert_eq!(arr.get(0).map(|o| o.id), Some(1));
        drop(arr);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn remove_and_return_transfers_the_slot_reference() {
        let drops = Rc::new(Cell::new(0));
        let a = item(7, &drops);
        let mut arr: RcArray<Item> = RcArray::new();
        arr.push(Some(&a));
        assert_eq!(a.refs.count(), 2);

        let returned = arr.remove_and_return(0).expect("occupied slot");
        // One reference moved from the slot to the returned handle.
        assert_eq!(a.refs.count(), 2);
        assert_eq!(arr.len(), 0);
        assert_eq!(returned.id, 7);

        drop(returned);
        assert_eq!(a.refs.count(), 1);
        assert_eq!(drops.get(), 0);
    }
}
