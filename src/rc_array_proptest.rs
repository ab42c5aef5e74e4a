#![cfg(test)]

// Property tests for RcArray kept inside the crate so they can read the
// element's embedded counter directly.

use crate::refcount::{RefCount, RefCounted};
use crate::{RcArray, Shared};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

struct Item {
    refs: RefCount,
    id: usize,
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

#[derive(Clone, Debug)]
enum Op {
    Push(Option<usize>),
    Insert(usize, Option<usize>),
    Set(usize, Option<usize>),
    PushIfAbsent(usize),
    Remove(usize),
    RemoveAndReturn(usize),
    RemoveObject(usize),
    RemoveRange(usize, usize),
    RemoveLast(usize),
    Swap(usize, usize),
    MoveElement(usize, usize),
    Clear,
    ClearQuick,
}

// Raw indices deliberately overshoot plausible lengths so the clamping
// paths get exercised, not just the happy ones.
fn arb_ops(pool: usize) -> impl Strategy<Value = Vec<Op>> {
    let obj = proptest::option::weighted(0.85, 0..pool);
    let idx = 0..24usize;
    let writes = prop_oneof![
        obj.clone().prop_map(Op::Push),
        (idx.clone(), obj.clone()).prop_map(|(i, o)| Op::Insert(i, o)),
        (idx.clone(), obj.clone()).prop_map(|(i, o)| Op::Set(i, o)),
        (0..pool).prop_map(Op::PushIfAbsent),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::Swap(a, b)),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::MoveElement(a, b)),
    ];
    let removals = prop_oneof![
        idx.clone().prop_map(Op::Remove),
        idx.clone().prop_map(Op::RemoveAndReturn),
        (0..pool).prop_map(Op::RemoveObject),
        (idx.clone(), idx.clone()).prop_map(|(a, b)| Op::RemoveRange(a, b)),
        (0..6usize).prop_map(Op::RemoveLast),
        Just(Op::Clear),
        Just(Op::ClearQuick),
    ];
    let op = prop_oneof![writes, removals];
    proptest::collection::vec(op, 1..80)
}

fn clamp(a: usize, b: usize, len: usize) -> (usize, usize) {
    let start = a.min(len);
    (start, b.min(len).max(start))
}

// Property: state-machine equivalence against a Vec<Option<id>> model,
// plus exact count accounting after every operation.
//
// Invariants exercised across random operation sequences:
// - len/contents parity with the model, including every clamping rule.
// - Each pool object's count equals 1 (the pool handle) plus the number
//   of slots currently holding it.
// - capacity() >= len() at all times.
// - Nothing is destroyed while the pool handles are live; dropping the
//   pool destroys every object exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vec_model(
        (pool_n, ops) in (1usize..=5).prop_flat_map(|n| (Just(n), arb_ops(n)))
    ) {
        let drops = Rc::new(Cell::new(0));
        let pool: Vec<Shared<Item>> = (0..pool_n)
            .map(|id| {
                Shared::new(Item {
                    refs: RefCount::new(),
                    id,
                    drops: Rc::clone(&drops),
                })
            })
            .collect();
        let mut arr: RcArray<Item> = RcArray::new();
        let mut model: Vec<Option<usize>> = Vec::new();

        for op in ops {
            match op {
                Op::Push(o) => {
                    arr.push(o.map(|k| &pool[k]));
                    model.push(o);
                }
                Op::Insert(i, o) => {
                    arr.insert(i, o.map(|k| &pool[k]));
                    let at = i.min(model.len());
                    model.insert(at, o);
                }
                Op::Set(i, o) => {
                    arr.set(i, o.map(|k| &pool[k]));
                    if i < model.len() {
                        model[i] = o;
                    } else {
                        model.push(o);
                    }
                }
                Op::PushIfAbsent(k) => {
                    let added = arr.push_if_absent(Some(&pool[k]));
                    let absent = !model.contains(&Some(k));
                    prop_assert_eq!(added, absent);
                    if absent {
                        model.push(Some(k));
                    }
                }
                Op::Remove(i) => {
                    arr.remove(i);
                    if i < model.len() {
                        model.remove(i);
                    }
                }
                Op::RemoveAndReturn(i) => {
                    let returned = arr.remove_and_return(i);
                    if i < model.len() {
                        let expected = model.remove(i);
                        prop_assert_eq!(returned.as_ref().map(|s| s.id), expected);
                    } else {
                        prop_assert!(returned.is_none());
                    }
                }
                Op::RemoveObject(k) => {
                    arr.remove_object(Some(&*pool[k]));
                    if let Some(pos) = model.iter().position(|&x| x == Some(k)) {
                        model.remove(pos);
                    }
                }
                Op::RemoveRange(a, b) => {
                    arr.remove_range(a..b);
                    let (start, end) = clamp(a, b, model.len());
                    model.drain(start..end);
                }
                Op::RemoveLast(n) => {
                    arr.remove_last(n);
                    let keep = model.len() - n.min(model.len());
                    model.truncate(keep);
                }
                Op::Swap(a, b) => {
                    arr.swap(a, b);
                    if a < model.len() && b < model.len() {
                        model.swap(a, b);
                    }
                }
                Op::MoveElement(from, to) => {
                    arr.move_element(from, to);
                    if from < model.len() {
                        let to = to.min(model.len() - 1);
                        let value = model.remove(from);
                        model.insert(to, value);
                    }
                }
                Op::Clear => {
                    arr.clear();
                    model.clear();
                }
                Op::ClearQuick => {
                    arr.clear_quick();
                    model.clear();
                }
            }

            prop_assert_eq!(arr.len(), model.len());
            prop_assert!(arr.capacity() >= arr.len());
            for (i, want) in model.iter().enumerate() {
                prop_assert_eq!(arr.get(i).map(|o| o.id), *want);
            }
            for (id, shared) in pool.iter().enumerate() {
                let occupancy = model.iter().filter(|&&x| x == Some(id)).count();
                prop_assert_eq!(shared.refs.count(), 1 + occupancy);
            }
        }

        drop(arr);
        for shared in &pool {
            prop_assert_eq!(shared.refs.count(), 1);
        }
        prop_assert_eq!(drops.get(), 0);
        drop(pool);
        prop_assert_eq!(drops.get(), pool_n);
    }
}
