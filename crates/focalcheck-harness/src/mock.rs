//! Test doubles for focal-method collaborators.
//!
//! Stubs are called through `&self` trait methods, so their bookkeeping
//! sits behind `parking_lot::Mutex`. Nothing here performs I/O: a stub only
//! records what it was given and hands back what the scenario scripted.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

/// Argument capture for one mocked function.
pub struct CallLog<A> {
    calls: Mutex<Vec<A>>,
}

impl<A> Default for CallLog<A> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<A: Clone> CallLog<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, args: A) {
        self.calls.lock().push(args);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn last(&self) -> Option<A> {
        self.calls.lock().last().cloned()
    }

    /// Every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.calls.lock().clone()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl<A: fmt::Debug> fmt::Debug for CallLog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallLog")
            .field("calls", &*self.calls.lock())
            .finish()
    }
}

struct CannedState<R> {
    queue: VecDeque<R>,
    fallback: R,
}

/// Scripted return values with a fallback once the script runs out.
pub struct Canned<R> {
    initial: R,
    state: Mutex<CannedState<R>>,
}

impl<R: Clone> Canned<R> {
    /// `fallback` is returned whenever nothing is queued, and is restored by
    /// [`Canned::reset`].
    #[must_use]
    pub fn new(fallback: R) -> Self {
        Self {
            initial: fallback.clone(),
            state: Mutex::new(CannedState {
                queue: VecDeque::new(),
                fallback,
            }),
        }
    }

    /// Queue a value for exactly one future call.
    pub fn push(&self, value: R) {
        self.state.lock().queue.push_back(value);
    }

    /// Replace the value returned once the queue is empty.
    pub fn set_fallback(&self, value: R) {
        self.state.lock().fallback = value;
    }

    /// Take the next scripted value.
    pub fn next(&self) -> R {
        let mut state = self.state.lock();
        match state.queue.pop_front() {
            Some(value) => value,
            None => state.fallback.clone(),
        }
    }

    #[must_use]
    pub fn pending(&self) -> Vec<R> {
        self.state.lock().queue.iter().cloned().collect()
    }

    #[must_use]
    pub fn fallback(&self) -> R {
        self.state.lock().fallback.clone()
    }

    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.queue.clear();
        state.fallback = self.initial.clone();
    }
}

impl<R: fmt::Debug> fmt::Debug for Canned<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Canned")
            .field("queue", &state.queue)
            .field("fallback", &state.fallback)
            .finish()
    }
}

/// Observable state of a [`Stub`], for comparing against a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubSnapshot<A, R> {
    pub calls: Vec<A>,
    pub pending: Vec<R>,
    pub fallback: R,
}

/// A mocked function: records its arguments and returns canned results.
pub struct Stub<A, R> {
    log: CallLog<A>,
    results: Canned<R>,
}

impl<A: Clone, R: Clone> Stub<A, R> {
    /// A stub answering `fallback` (normally the success code) by default.
    #[must_use]
    pub fn returning(fallback: R) -> Self {
        Self {
            log: CallLog::new(),
            results: Canned::new(fallback),
        }
    }

    pub fn invoke(&self, args: A) -> R {
        self.log.record(args);
        self.results.next()
    }

    /// Script the result of the next unscripted call.
    pub fn then_return(&self, value: R) -> &Self {
        self.results.push(value);
        self
    }

    pub fn set_fallback(&self, value: R) {
        self.results.set_fallback(value);
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.log.count()
    }

    #[must_use]
    pub fn last(&self) -> Option<A> {
        self.log.last()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<A> {
        self.log.calls()
    }

    #[must_use]
    pub fn snapshot(&self) -> StubSnapshot<A, R> {
        StubSnapshot {
            calls: self.log.calls(),
            pending: self.results.pending(),
            fallback: self.results.fallback(),
        }
    }

    /// Forget every call and script.
    pub fn reset(&self) {
        self.log.reset();
        self.results.reset();
    }
}

impl<A: fmt::Debug, R: fmt::Debug> fmt::Debug for Stub<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stub")
            .field("log", &self.log)
            .field("results", &self.results)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_falls_back_after_script() {
        let canned = Canned::new(0);
        canned.push(-1);
        canned.push(-2);
        assert_eq!(canned.next(), -1);
        assert_eq!(canned.next(), -2);
        assert_eq!(canned.next(), 0);
        assert_eq!(canned.next(), 0);
    }

    #[test]
    fn stub_records_arguments_in_order() {
        let stub: Stub<(u32, &str), bool> = Stub::returning(true);
        stub.then_return(false);
        assert!(!stub.invoke((1, "a")));
        assert!(stub.invoke((2, "b")));
        assert_eq!(stub.count(), 2);
        assert_eq!(stub.last(), Some((2, "b")));
        assert_eq!(stub.calls(), vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn reset_matches_fresh_stub() {
        let fresh: Stub<i32, i32> = Stub::returning(7);
        let used: Stub<i32, i32> = Stub::returning(7);
        used.then_return(1).then_return(2);
        used.set_fallback(99);
        used.invoke(5);

        used.reset();
        assert_eq!(used.snapshot(), fresh.snapshot());
        used.reset();
        assert_eq!(used.snapshot(), fresh.snapshot());
        assert_eq!(used.invoke(0), 7);
    }
}
