//! sqlite `sqlite3BtreeSetCacheSize`.

use focalcheck_core::sqlite::{BtreeHandle, SQLITE_OK, set_cache_size};

use crate::check::CheckContext;
use crate::crash::expect_crash_with;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::expect_eq;
use crate::mock::{CallLog, Canned};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Enter,
    SetCacheSize(i32),
    Leave,
}

/// A `Btree` whose mutex state is scripted and whose side effects are
/// logged in order.
#[derive(Debug)]
struct FakeBtree {
    mutex_held: Canned<bool>,
    events: CallLog<Event>,
}

impl FakeBtree {
    fn holding_mutex() -> Self {
        Self {
            mutex_held: Canned::new(true),
            events: CallLog::new(),
        }
    }
}

impl BtreeHandle for FakeBtree {
    fn db_mutex_held(&self) -> bool {
        self.mutex_held.next()
    }

    fn enter(&mut self) {
        self.events.record(Event::Enter);
    }

    fn leave(&mut self) {
        self.events.record(Event::Leave);
    }

    fn pager_set_cachesize(&mut self, mx_page: i32) {
        self.events.record(Event::SetCacheSize(mx_page));
    }
}

fn forwards_size(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut bt = FakeBtree::holding_mutex();
    expect_eq!(ctx, set_cache_size(&mut bt, 1234), SQLITE_OK);
    expect_eq!(
        ctx,
        bt.events.calls(),
        vec![Event::Enter, Event::SetCacheSize(1234), Event::Leave]
    );
    Ok(())
}

fn boundary_sizes(ctx: &mut CheckContext) -> Result<(), SetupError> {
    for mx_page in [0, -2000, i32::MAX, i32::MIN] {
        let mut bt = FakeBtree::holding_mutex();
        expect_eq!(ctx, set_cache_size(&mut bt, mx_page), SQLITE_OK);
        expect_eq!(
            ctx,
            bt.events.calls().get(1).copied(),
            Some(Event::SetCacheSize(mx_page)),
            "mx_page {mx_page} forwarded unchanged"
        );
    }
    Ok(())
}

fn repeated_calls(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut bt = FakeBtree::holding_mutex();
    for mx_page in [10, 20, 30] {
        set_cache_size(&mut bt, mx_page);
    }
    expect_eq!(ctx, bt.events.count(), 9);
    expect_eq!(ctx, bt.events.last(), Some(Event::Leave));
    let sizes: Vec<i32> = bt
        .events
        .calls()
        .into_iter()
        .filter_map(|e| match e {
            Event::SetCacheSize(n) => Some(n),
            _ => None,
        })
        .collect();
    expect_eq!(ctx, sizes, vec![10, 20, 30]);
    Ok(())
}

fn mutex_not_held(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut bt = FakeBtree::holding_mutex();
    bt.mutex_held.push(false);
    expect_crash_with(ctx, "set_cache_size without mutex", "mutex not held", || {
        set_cache_size(&mut bt, 64)
    });
    expect_eq!(ctx, bt.events.count(), 0, "pager untouched when the guard fires");

    // script exhausted: the fallback says the mutex is held again
    expect_eq!(ctx, set_cache_size(&mut bt, 64), SQLITE_OK);
    expect_eq!(ctx, bt.events.count(), 3);
    Ok(())
}

fn reset_restores_fresh_state(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut bt = FakeBtree::holding_mutex();
    bt.mutex_held.set_fallback(false);
    bt.mutex_held.push(true);
    set_cache_size(&mut bt, 5);

    bt.mutex_held.reset();
    bt.events.reset();
    let fresh = FakeBtree::holding_mutex();
    expect_eq!(ctx, bt.mutex_held.fallback(), fresh.mutex_held.fallback());
    expect_eq!(ctx, bt.mutex_held.pending(), fresh.mutex_held.pending());
    expect_eq!(ctx, bt.events.calls(), fresh.events.calls());
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "sqlite_cache_size",
        library: "sqlite",
        focal: "sqlite3BtreeSetCacheSize",
        scenarios: vec![
            Scenario::new("forwards_size", "enter, set, leave, SQLITE_OK", forwards_size),
            Scenario::new("boundary_sizes", "zero, negative and extreme sizes", boundary_sizes),
            Scenario::new("repeated_calls", "each call is bracketed", repeated_calls),
            Scenario::new(
                "mutex_not_held",
                "the mutex assertion fires before any side effect",
                mutex_not_held,
            ),
            Scenario::new(
                "reset_restores_fresh_state",
                "doubles reset to their initial script",
                reset_restores_fresh_state,
            ),
        ],
    }
}
