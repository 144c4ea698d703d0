use crate::cache::{QueryCache, QueryKey};
use crate::error::Result;
use crate::models::prospect::MatchProspect;
use crate::models::reporting::WorkbooksSummary;
use crate::models::vaga::{Vaga, VagaDetail};
use crate::models::workbook::{CreateWorkbook, DeleteResponse, Workbook};
use crate::services::api_service::ApiService;

/// Workbook and vaga reads through the query cache, plus the mutations
/// whose success must invalidate the affected keys. Serving stale data
/// after a mutation is a correctness bug, not a performance issue: a
/// deleted workbook must not linger in the list view.
#[derive(Clone)]
pub struct WorkbookService {
    api: ApiService,
    cache: QueryCache,
}

impl WorkbookService {
    pub fn new(api: ApiService, cache: QueryCache) -> Self {
        Self { api, cache }
    }

    pub async fn list_workbooks(&self) -> Result<Vec<Workbook>> {
        self.cache
            .fetch(QueryKey::Workbooks, || self.api.list_workbooks())
            .await
    }

    pub async fn get_workbook(&self, workbook_id: &str) -> Result<Workbook> {
        self.cache
            .fetch(QueryKey::Workbook(workbook_id.to_string()), || {
                self.api.get_workbook(workbook_id)
            })
            .await
    }

    pub async fn list_vagas(&self, only_active: bool) -> Result<Vec<Vaga>> {
        self.cache
            .fetch(QueryKey::Vagas { only_active }, || {
                self.api.list_vagas(only_active)
            })
            .await
    }

    pub async fn list_open_vagas(&self) -> Result<Vec<Vaga>> {
        self.cache
            .fetch(QueryKey::OpenVagas, || self.api.list_open_vagas())
            .await
    }

    pub async fn get_vaga(&self, vaga_id: i64) -> Result<VagaDetail> {
        self.cache
            .fetch(QueryKey::Vaga(vaga_id), || self.api.get_vaga(vaga_id))
            .await
    }

    pub async fn match_prospects(&self, workbook_id: &str) -> Result<Vec<MatchProspect>> {
        self.cache
            .fetch(QueryKey::MatchProspects(workbook_id.to_string()), || {
                self.api.get_match_prospects(workbook_id)
            })
            .await
    }

    pub async fn workbooks_summary(&self) -> Result<WorkbooksSummary> {
        self.cache
            .fetch(QueryKey::WorkbooksSummary, || self.api.workbooks_summary())
            .await
    }

    pub async fn create_workbook(
        &self,
        vaga_id: i64,
        created_by: Option<String>,
    ) -> Result<Workbook> {
        let created = self
            .api
            .create_workbook(&CreateWorkbook {
                vaga_id,
                created_by,
            })
            .await?;
        tracing::info!(workbook_id = %created.id, vaga_id, "workbook created");
        Self::invalidate_workbook_collections(&self.cache);
        Ok(created)
    }

    /// Available whether the workbook is open or closed. The backend
    /// cascade-deletes the prospect set.
    pub async fn delete_workbook(&self, workbook_id: &str) -> Result<DeleteResponse> {
        let response = self.api.delete_workbook(workbook_id).await?;
        tracing::info!(workbook_id, "workbook deleted");
        Self::invalidate_workbook_collections(&self.cache);
        self.cache.remove(&QueryKey::Workbook(workbook_id.to_string()));
        self.cache
            .remove(&QueryKey::MatchProspects(workbook_id.to_string()));
        Ok(response)
    }

    /// Creating or deleting a workbook changes which vagas are available
    /// for new workbooks, so the vaga lists go stale along with the
    /// workbook list.
    pub fn invalidate_workbook_collections(cache: &QueryCache) {
        cache.invalidate(&QueryKey::Workbooks);
        cache.invalidate(&QueryKey::WorkbooksSummary);
        cache.invalidate_where(|key| {
            matches!(key, QueryKey::Vagas { .. } | QueryKey::OpenVagas)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheWindows;
    use std::time::Duration;

    fn test_cache() -> QueryCache {
        QueryCache::with_windows(CacheWindows {
            list: Duration::from_secs(300),
            prospects: Duration::from_secs(60),
            analytics: Duration::from_secs(1800),
            analytics_refresh: Duration::from_secs(1800),
        })
    }

    #[tokio::test]
    async fn workbook_mutations_invalidate_workbook_and_vaga_lists() {
        let cache = test_cache();

        let _: i64 = cache
            .fetch(QueryKey::Workbooks, || async { Ok(1) })
            .await
            .unwrap();
        let _: i64 = cache
            .fetch(QueryKey::Vagas { only_active: true }, || async { Ok(2) })
            .await
            .unwrap();
        let _: i64 = cache
            .fetch(QueryKey::OpenVagas, || async { Ok(3) })
            .await
            .unwrap();
        let _: i64 = cache
            .fetch(QueryKey::Vaga(9), || async { Ok(4) })
            .await
            .unwrap();

        WorkbookService::invalidate_workbook_collections(&cache);

        assert!(!cache.is_fresh(&QueryKey::Workbooks));
        assert!(!cache.is_fresh(&QueryKey::Vagas { only_active: true }));
        assert!(!cache.is_fresh(&QueryKey::OpenVagas));
        // Vaga details are unaffected by workbook mutations.
        assert!(cache.is_fresh(&QueryKey::Vaga(9)));
    }
}
