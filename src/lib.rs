pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::cache::QueryCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::workbook::Workbook;
use crate::services::{
    analytics_service::AnalyticsService, api_service::ApiService,
    workbook_service::WorkbookService, workbook_session::WorkbookSession,
};

/// Top-level service wiring: one API client and one query cache shared by
/// every service. Cloning is cheap and clones share the cache.
#[derive(Clone)]
pub struct Workbench {
    pub api: ApiService,
    pub cache: QueryCache,
    pub workbook_service: WorkbookService,
    pub analytics_service: AnalyticsService,
}

impl Workbench {
    pub fn new(config: &Config) -> Result<Self> {
        let api = ApiService::new(config)?;
        let cache = QueryCache::new(config);

        let workbook_service = WorkbookService::new(api.clone(), cache.clone());
        let analytics_service = AnalyticsService::new(api.clone(), cache.clone());

        Ok(Self {
            api,
            cache,
            workbook_service,
            analytics_service,
        })
    }

    /// Start a review session for one workbook.
    pub fn open_session(&self, workbook: Workbook) -> WorkbookSession {
        WorkbookSession::new(self.api.clone(), self.cache.clone(), workbook)
    }
}
