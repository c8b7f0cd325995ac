// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::models::alumni::AlumniRecord;
use crate::stores::{directory::Directory, page_store::PageStore, roster::Roster};
use std::sync::Arc;

/// Shared application state
///
/// Owns the process-wide roster and every open page. Handed to request
/// handlers behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Registrations accepted since startup
    pub roster: Arc<Roster>,

    /// One portal per open browser page
    pub pages: Arc<PageStore>,

    /// Alumni directory for faculty and students
    pub directory: Arc<Directory>,

    pub metrics: Arc<Metrics>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, alumni: Vec<AlumniRecord>) -> Self {
        let config = Arc::new(config);

        Self {
            roster: Arc::new(Roster::with_limit(
                config.portal.roster_capacity,
                config.portal.max_registrations,
            )),
            pages: Arc::new(PageStore::new(config.portal.max_pages)),
            directory: Arc::new(Directory::new(alumni)),
            metrics: Arc::new(Metrics::new()),
            config,
        }
    }
}
