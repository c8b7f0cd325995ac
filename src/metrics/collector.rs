use crate::stores::directory::Directory;
use crate::stores::page_store::PageStore;
use crate::stores::roster::Roster;
use crate::utils::time::current_timestamp;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct Metrics {
    pub logins_succeeded: AtomicU64,
    pub logins_failed: AtomicU64,
    pub registrations_accepted: AtomicU64,
    pub registrations_rejected: AtomicU64,
    pub logouts: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub logins_succeeded: u64,
    pub logins_failed: u64,
    pub login_success_rate: f64,
    pub registrations_accepted: u64,
    pub registrations_rejected: u64,
    pub logouts: u64,
    #[serde(rename = "registered_users")]
    pub roster_size: usize,
    pub open_pages: usize,
    pub authenticated_pages: usize,
    pub directory_size: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            logins_succeeded: AtomicU64::new(0),
            logins_failed: AtomicU64::new(0),
            registrations_accepted: AtomicU64::new(0),
            registrations_rejected: AtomicU64::new(0),
            logouts: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    pub fn record_login(&self, succeeded: bool) {
        if succeeded {
            self.logins_succeeded.fetch_add(1, Ordering::Relaxed);
        } else {
            self.logins_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_registration(&self, accepted: bool) {
        if accepted {
            self.registrations_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.registrations_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_logout(&self) {
        self.logouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Collect counters and store sizes into one serializable view
    pub fn get_snapshot(
        &self,
        roster: &Roster,
        pages: &PageStore,
        directory: &Directory,
    ) -> MetricsSnapshot {
        let logins_succeeded = self.logins_succeeded.load(Ordering::Relaxed);
        let logins_failed = self.logins_failed.load(Ordering::Relaxed);

        let attempts = logins_succeeded + logins_failed;
        let login_success_rate = if attempts > 0 {
            (logins_succeeded as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsSnapshot {
            logins_succeeded,
            logins_failed,
            login_success_rate,
            registrations_accepted: self.registrations_accepted.load(Ordering::Relaxed),
            registrations_rejected: self.registrations_rejected.load(Ordering::Relaxed),
            logouts: self.logouts.load(Ordering::Relaxed),
            roster_size: roster.len(),
            open_pages: pages.len(),
            authenticated_pages: pages.authenticated_count(),
            directory_size: directory.len(),
            uptime_seconds: current_timestamp() - self.start_time,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
