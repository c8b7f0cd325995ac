use crate::portal::controller::Portal;
use crate::stores::roster::Roster;
use crate::utils::time::{current_timestamp, is_expired};
use crate::utils::token::generate_page_token;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An open browser page and when it was last used
pub struct Page {
    pub portal: Portal,
    pub last_seen: i64,
}

/// In-memory store of open pages, keyed by page token.
///
/// Each page owns its own `Portal`; access to one page is serialized by the
/// map's entry lock. `open_count` reserves a slot before the insert so the
/// cap holds under concurrent opens.
pub struct PageStore {
    pages: DashMap<String, Page>,
    open_count: AtomicUsize,
    max_pages: usize,
}

impl PageStore {
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: DashMap::new(),
            open_count: AtomicUsize::new(0),
            max_pages,
        }
    }

    /// Open a new anonymous page. Returns `None` when the store is full.
    pub fn open(&self, roster: Arc<Roster>) -> Option<String> {
        self.open_count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |open| {
                (open < self.max_pages).then_some(open + 1)
            })
            .ok()?;

        let token = generate_page_token();
        self.pages.insert(
            token.clone(),
            Page {
                portal: Portal::new(roster),
                last_seen: current_timestamp(),
            },
        );
        Some(token)
    }

    /// Close a page, discarding its session. Returns whether it existed.
    pub fn close(&self, token: &str) -> bool {
        let removed = self.pages.remove(token).is_some();
        if removed {
            self.open_count.fetch_sub(1, Ordering::AcqRel);
        }
        removed
    }

    /// Run `f` against the page's portal and mark the page as used.
    /// Returns `None` for unknown tokens.
    pub fn with_page<R>(&self, token: &str, f: impl FnOnce(&mut Portal) -> R) -> Option<R> {
        let mut page = self.pages.get_mut(token)?;
        page.last_seen = current_timestamp();
        Some(f(&mut page.portal))
    }

    /// Drop pages idle for longer than `timeout` seconds
    pub fn cleanup_idle(&self, timeout: i64) -> usize {
        self.cleanup_idle_at(timeout, current_timestamp())
    }

    fn cleanup_idle_at(&self, timeout: i64, now: i64) -> usize {
        let removed = AtomicUsize::new(0);
        self.pages.retain(|_, page| {
            let keep = !is_expired(page.last_seen, timeout, now);
            if !keep {
                removed.fetch_add(1, Ordering::Relaxed);
            }
            keep
        });

        let removed = removed.into_inner();
        self.open_count.fetch_sub(removed, Ordering::AcqRel);
        removed
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn authenticated_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|entry| entry.value().portal.is_authenticated())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    fn roster() -> Arc<Roster> {
        Arc::new(Roster::new())
    }

    #[test]
    fn test_open_and_close() {
        let store = PageStore::new(10);
        let token = store.open(roster()).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.close(&token));
        assert!(!store.close(&token));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_respects_limit() {
        let store = PageStore::new(2);
        assert!(store.open(roster()).is_some());
        assert!(store.open(roster()).is_some());
        assert!(store.open(roster()).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_opens_respect_limit() {
        let store = Arc::new(PageStore::new(8));
        let shared = roster();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    (0..10)
                        .filter(|_| store.open(Arc::clone(&shared)).is_some())
                        .count()
                })
            })
            .collect();

        let opened: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(opened, 8);
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn test_closed_and_evicted_pages_free_slots() {
        let store = PageStore::new(2);
        let first = store.open(roster()).unwrap();
        let second = store.open(roster()).unwrap();
        assert!(store.open(roster()).is_none());

        assert!(store.close(&first));
        assert!(!store.close(&first));
        let third = store.open(roster()).unwrap();
        assert!(store.open(roster()).is_none());

        let now = current_timestamp();
        for token in [&second, &third] {
            if let Some(mut page) = store.pages.get_mut(token) {
                page.last_seen = now - 4000;
            }
        }
        assert_eq!(store.cleanup_idle_at(1800, now), 2);
        assert!(store.open(roster()).is_some());
        assert!(store.open(roster()).is_some());
        assert!(store.open(roster()).is_none());
    }

    #[test]
    fn test_with_page_unknown_token() {
        let store = PageStore::new(10);
        assert!(store.with_page("missing", |portal| portal.is_authenticated()).is_none());
    }

    #[test]
    fn test_pages_are_isolated() {
        let store = PageStore::new(10);
        let shared = roster();
        let a = store.open(Arc::clone(&shared)).unwrap();
        let b = store.open(shared).unwrap();

        store
            .with_page(&a, |portal| portal.login(Role::Student, "23pa1a12e7@vishnu.edu.in", "pw"))
            .unwrap()
            .unwrap();

        assert_eq!(store.with_page(&a, |p| p.is_authenticated()), Some(true));
        assert_eq!(store.with_page(&b, |p| p.is_authenticated()), Some(false));
        assert_eq!(store.authenticated_count(), 1);
    }

    #[test]
    fn test_cleanup_idle_pages() {
        let store = PageStore::new(10);
        let stale = store.open(roster()).unwrap();
        let fresh = store.open(roster()).unwrap();

        let now = current_timestamp();
        if let Some(mut page) = store.pages.get_mut(&stale) {
            page.last_seen = now - 4000;
        }

        let removed = store.cleanup_idle_at(1800, now);
        assert_eq!(removed, 1);
        assert!(store.with_page(&stale, |_| ()).is_none());
        assert!(store.with_page(&fresh, |_| ()).is_some());
    }
}
