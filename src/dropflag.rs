//! This module is for testing only

use std::cell::Cell;
use std::rc::Rc;

/// Shared count of dropped `Tracked` values.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    dropped: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    pub fn track(&self, value: i32) -> Tracked {
        Tracked {
            value,
            counter: self.clone(),
        }
    }
}

/// Value that bumps its `DropCounter` when dropped. Clones share the counter.
#[derive(Clone, Debug)]
pub struct Tracked {
    pub value: i32,
    counter: DropCounter,
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Tracked) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let counter = &self.counter.dropped;
        counter.set(counter.get() + 1);
    }
}

thread_local! {
    static BUDGET: Cell<usize> = Cell::new(usize::MAX);
    static LIVE: Cell<isize> = Cell::new(0);
}

/// Value whose `clone` and `default` panic once the per-thread budget is spent.
///
/// Also counts live instances, so a test can check that a failed operation neither
/// leaked nor double dropped anything.
#[derive(Debug, PartialEq)]
pub struct Fragile(pub i32);

impl Fragile {
    /// Resets the live count and allows `budget` more clones/defaults on this thread.
    pub fn reset(budget: usize) {
        BUDGET.with(|b| b.set(budget));
        LIVE.with(|l| l.set(0));
    }

    pub fn set_budget(budget: usize) {
        BUDGET.with(|b| b.set(budget));
    }

    pub fn live() -> isize {
        LIVE.with(|l| l.get())
    }

    pub fn new(value: i32) -> Fragile {
        LIVE.with(|l| l.set(l.get() + 1));
        Fragile(value)
    }

    fn spend() {
        BUDGET.with(|b| {
            let left = b.get();
            if left == 0 {
                panic!("fragile budget exhausted");
            }
            b.set(left - 1);
        });
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Fragile {
        Fragile::spend();
        Fragile::new(self.0)
    }
}

impl Default for Fragile {
    fn default() -> Fragile {
        Fragile::spend();
        Fragile::new(0)
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        LIVE.with(|l| l.set(l.get() - 1));
    }
}

#[test]
fn tracked_counts_drops() {
    let counter = DropCounter::new();
    let tracked = counter.track(1);
    let copy = tracked.clone();
    assert_eq!(0, counter.dropped());
    std::mem::drop(tracked);
    std::mem::drop(copy);
    assert_eq!(2, counter.dropped());
}

#[test]
fn fragile_panics_when_budget_is_spent() {
    Fragile::reset(1);
    let first = Fragile::new(4);
    let second = first.clone();
    assert_eq!(2, Fragile::live());
    let result = std::panic::catch_unwind(|| second.clone());
    assert!(result.is_err());
    assert_eq!(2, Fragile::live());
}
