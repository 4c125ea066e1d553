//! Shared dependencies handed to every use case.

use std::sync::Arc;
use std::time::Duration;

use crate::application::stats::SessionStats;
use crate::domain::eligibility::ServiceCatalog;
use crate::ports::{AIProvider, SessionStore};

/// Wired dependencies for the application layer.
///
/// `ai` is optional: without a configured provider every response is
/// the template text, which is fully functional.
#[derive(Clone)]
pub struct AppContext {
    pub sessions: Arc<dyn SessionStore>,
    pub ai: Option<Arc<dyn AIProvider>>,
    pub catalog: Arc<ServiceCatalog>,
    pub ai_timeout: Duration,
    pub stats: Arc<SessionStats>,
}

impl AppContext {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        ai: Option<Arc<dyn AIProvider>>,
        catalog: Arc<ServiceCatalog>,
        ai_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            ai,
            catalog,
            ai_timeout,
            stats: Arc::new(SessionStats::default()),
        }
    }
}
