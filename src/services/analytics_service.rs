use crate::cache::{QueryCache, QueryKey};
use crate::error::Result;
use crate::models::analytics::{CacheClearResponse, SemanticPerformance, SemanticPerformanceInfo};
use crate::services::api_service::ApiService;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Semantic-performance analytics. The server-side computation can take
/// minutes, so the payload is cached with a long window and refreshed by a
/// periodic background task rather than on every access.
#[derive(Clone)]
pub struct AnalyticsService {
    api: ApiService,
    cache: QueryCache,
}

impl AnalyticsService {
    pub fn new(api: ApiService, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    pub async fn semantic_performance(&self) -> Result<SemanticPerformance> {
        self.cache
            .fetch(QueryKey::SemanticPerformance, || {
                self.api.semantic_performance()
            })
            .await
    }

    /// Discards both the server-side cache and the local entry, so the next
    /// access recomputes from scratch.
    pub async fn clear_cache(&self) -> Result<CacheClearResponse> {
        let response = self.api.clear_semantic_performance_cache().await?;
        self.cache.remove(&QueryKey::SemanticPerformance);
        tracing::info!("semantic performance cache cleared");
        Ok(response)
    }

    pub async fn info(&self) -> Result<SemanticPerformanceInfo> {
        self.api.semantic_performance_info().await
    }

    /// Periodic refresh in the background, in addition to the staleness
    /// window. Failures are logged and retried on the next tick.
    pub fn spawn_auto_refresh(&self) -> JoinHandle<()> {
        let service = self.clone();
        let interval = service
            .cache
            .policy(&QueryKey::SemanticPerformance)
            .refresh_interval
            .unwrap_or(Duration::from_secs(30 * 60));

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                service.cache.invalidate(&QueryKey::SemanticPerformance);
                match service.semantic_performance().await {
                    Ok(_) => tracing::info!("analytics payload refreshed"),
                    Err(e) => tracing::error!(error = %e, "analytics auto-refresh failed"),
                }
            }
        })
    }
}
