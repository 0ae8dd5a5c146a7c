// Per-thread edge read counter. Used to check the O(n) bound empirically.
use std::cell::Cell;

thread_local! {
    static WORK: Cell<u64> = const { Cell::new(0) };
}

#[inline]
pub fn work() {
    WORK.with(|work| work.set(work.get() + 1));
}

pub fn get_work() -> u64 {
    WORK.with(|work| work.get())
}

pub fn reset_work() {
    WORK.with(|work| work.set(0));
}

// Runs f and returns its result with the number of edge reads it made.
pub fn measure<T>(f: impl FnOnce() -> T) -> (T, u64) {
    let before = get_work();
    let res = f();
    (res, get_work() - before)
}
