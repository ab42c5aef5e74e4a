//! rc-array: an ordered array of intrusively reference-counted objects,
//! with automatic lifetime management and a pluggable locking policy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build RcArray in safe, verifiable layers so each piece can be
//!   reasoned about independently.
//! - Layers:
//!   - HandleStore<T>: structural flat buffer of nullable `*mut T` slots
//!     with the growth/shrink policy and block moves; never calls user
//!     code and knows nothing about reference counts.
//!   - RcArray<T, P>: public API composing the store with the element
//!     protocol; owns one count per occupied slot and mediates every
//!     count change. Includes a debug-only re-entry check on mutating
//!     operations.
//!   - Shared<T>: owning handle and the single allocation/destruction
//!     site; every raw slot value descends from a pointer it minted.
//!   - LockPolicy: per-operation critical sections; NoLock (default) or
//!     MutexLock.
//!
//! Constraints
//! - Single-threaded by default; the array is `!Send`/`!Sync` (raw slot
//!   handles, and `RefCount` elements use `Cell`). The MutexLock policy
//!   still wraps each public operation for callers who layer their own
//!   cross-thread sharing over `AtomicRefCount` elements.
//! - Null slots are legal array contents; checked accessors answer `None`
//!   both for out-of-range indices and null occupants.
//! - Counts move transactionally: no operation completes with a slot and
//!   its count out of step, and destruction happens synchronously inside
//!   the operation that dropped the last reference.
//!
//! Why this split?
//! - Localize invariants: the store guarantees structure, the array
//!   guarantees counts, the handle guarantees allocation lifetime.
//! - Minimize unsafe: raw-pointer work is confined to `Shared` and two
//!   small primitives in the array module, each with a stated contract.
//! - Clear failure boundaries: user code (destructors, comparators) only
//!   runs while the structure is consistent, and `remove_range` nulls
//!   slots before releasing occupants so re-entrant destructors cannot
//!   reach a dangling handle.
//!
//! Sorted operations
//! - `add_sorted`, `add_or_replace_sorted`, and `index_of_sorted` take a
//!   caller-supplied three-way comparator over nullable elements. The
//!   search is deliberately not a textbook bisection; see
//!   `RcArray::index_of_sorted` for the exact rule, which regression
//!   tests pin.
//!
//! Overflow semantics
//! - Reference-count overflow aborts the process, matching `Rc`; count
//!   underflow is a logic error and asserts.
//!
//! Notes and non-goals
//! - No iterator machinery beyond `iter()`'s raw front-to-back walk.
//! - No persistent/immutable semantics; `Clone` is an O(n) deep copy with
//!   independent storage.
//! - `Outcome` and `StreamSource` are small standalone collaborators that
//!   live alongside the container and take no part in its algorithms.

mod handle_store;
pub mod locking;
mod outcome;
mod rc_array;
mod rc_array_proptest;
mod reentry;
pub mod refcount;
mod shared;
mod stream_source;

// Public surface
pub use locking::{LockPolicy, MutexLock, NoLock};
pub use outcome::{Failure, Outcome};
pub use rc_array::RcArray;
pub use refcount::{AtomicRefCount, RefCount, RefCounted};
pub use shared::Shared;
pub use stream_source::{FileSource, StreamSource};
