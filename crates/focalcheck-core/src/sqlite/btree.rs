//! `sqlite3BtreeSetCacheSize`.

pub const SQLITE_OK: i32 = 0;

/// What `sqlite3BtreeSetCacheSize` needs from a `Btree *`.
///
/// The connection mutex check, the shared-cache enter/leave pair and the
/// pager cache-size setter are the only collaborators it touches.
pub trait BtreeHandle {
    /// `sqlite3_mutex_held(p->db->mutex)`
    fn db_mutex_held(&self) -> bool;
    fn enter(&mut self);
    fn leave(&mut self);
    /// `sqlite3PagerSetCachesize(p->pBt->pPager, mx_page)`
    fn pager_set_cachesize(&mut self, mx_page: i32);
}

/// Set the page-cache size of the pager behind `p`.
///
/// # Panics
///
/// Panics when the caller does not hold the database connection mutex,
/// mirroring the `assert()` the C code compiles in debug builds.
pub fn set_cache_size<B: BtreeHandle + ?Sized>(p: &mut B, mx_page: i32) -> i32 {
    assert!(
        p.db_mutex_held(),
        "sqlite3BtreeSetCacheSize: database mutex not held"
    );
    p.enter();
    p.pager_set_cachesize(mx_page);
    p.leave();
    SQLITE_OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Fake {
        held: bool,
        depth: i32,
        max_depth: i32,
        cachesize: Option<i32>,
    }

    impl BtreeHandle for Fake {
        fn db_mutex_held(&self) -> bool {
            self.held
        }

        fn enter(&mut self) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }

        fn leave(&mut self) {
            self.depth -= 1;
        }

        fn pager_set_cachesize(&mut self, mx_page: i32) {
            assert_eq!(self.depth, 1, "pager touched outside enter/leave");
            self.cachesize = Some(mx_page);
        }
    }

    #[test]
    fn negative_sizes_are_forwarded_untouched() {
        let mut fake = Fake {
            held: true,
            ..Fake::default()
        };
        assert_eq!(set_cache_size(&mut fake, -2000), SQLITE_OK);
        assert_eq!(fake.cachesize, Some(-2000));
        assert_eq!(fake.depth, 0);
        assert_eq!(fake.max_depth, 1);
    }

    #[test]
    fn missing_mutex_panics_before_touching_pager() {
        let mut fake = Fake::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            set_cache_size(&mut fake, 10);
        }));
        assert!(result.is_err());
        assert_eq!(fake.cachesize, None);
        assert_eq!(fake.max_depth, 0);
    }
}
