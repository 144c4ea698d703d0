use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::analytics::{CacheClearResponse, SemanticPerformance, SemanticPerformanceInfo};
use crate::models::applicant::Applicant;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::prospect::{MatchProspect, ProspectInput, UpdateProspectsResponse};
use crate::models::reporting::{
    ApplicantProspect, ProspectMatchByVaga, ProspectMatchByWorkbook, WorkbooksSummary,
};
use crate::models::vaga::{Vaga, VagaDetail};
use crate::models::workbook::{CreateWorkbook, DeleteResponse, Workbook, WorkbookPatch};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Typed client for the matching backend. One method per endpoint; non-2xx
/// responses surface as `Error::Api` with status and body, transport
/// failures as `Error::Network`. Retry policy lives in the cache layer,
/// never here.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiService {
    pub fn new(config: &Config) -> Result<Self> {
        // No default timeout on the client itself: the analytics fetch is
        // deliberately unbounded, every other request gets a per-call limit.
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        })
    }

    // Vagas

    pub async fn list_vagas(&self, only_active: bool) -> Result<Vec<Vaga>> {
        let mut url = self.endpoint("/vagas/lista")?;
        url.query_pairs_mut()
            .append_pair("apenas_ativas", if only_active { "true" } else { "false" });
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn list_open_vagas(&self) -> Result<Vec<Vaga>> {
        let url = self.endpoint("/vagas/abertas")?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn get_vaga(&self, vaga_id: i64) -> Result<VagaDetail> {
        let url = self.endpoint(&format!("/vagas/{}", vaga_id))?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    // Workbooks

    pub async fn list_workbooks(&self) -> Result<Vec<Workbook>> {
        let url = self.endpoint("/workbook")?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn create_workbook(&self, payload: &CreateWorkbook) -> Result<Workbook> {
        let url = self.endpoint("/workbook")?;
        self.execute(self.client.post(url).json(payload).timeout(self.timeout))
            .await
    }

    pub async fn get_workbook(&self, workbook_id: &str) -> Result<Workbook> {
        let url = self.endpoint(&format!("/workbook/{}", workbook_id))?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn update_workbook(
        &self,
        workbook_id: &str,
        patch: &WorkbookPatch,
    ) -> Result<Workbook> {
        let url = self.endpoint(&format!("/workbook/{}", workbook_id))?;
        self.execute(self.client.put(url).json(patch).timeout(self.timeout))
            .await
    }

    pub async fn delete_workbook(&self, workbook_id: &str) -> Result<DeleteResponse> {
        let url = self.endpoint(&format!("/workbook/{}", workbook_id))?;
        self.execute(self.client.delete(url).timeout(self.timeout))
            .await
    }

    // Match prospects

    pub async fn get_match_prospects(&self, workbook_id: &str) -> Result<Vec<MatchProspect>> {
        let url = self.endpoint(&format!("/workbook/{}/match-prospects", workbook_id))?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    /// Full-replace semantics: the set sent replaces the persisted set and
    /// an empty list clears it. There is no incremental add/remove endpoint.
    pub async fn update_match_prospects(
        &self,
        workbook_id: &str,
        prospects: &[ProspectInput],
    ) -> Result<UpdateProspectsResponse> {
        let url = self.endpoint(&format!("/workbook/{}/match-prospects", workbook_id))?;
        self.execute(
            self.client
                .post(url)
                .json(&json!({ "prospects": prospects }))
                .timeout(self.timeout),
        )
        .await
    }

    // Applicants

    pub async fn get_applicants_by_ids(&self, applicant_ids: &[i64]) -> Result<Vec<Applicant>> {
        let url = self.endpoint("/get_applicants_by_ids")?;
        self.execute(
            self.client
                .post(url)
                .json(&json!({ "applicant_ids": applicant_ids }))
                .timeout(self.timeout),
        )
        .await
    }

    // Chat

    pub async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint("/chat")?;
        self.execute(self.client.post(url).json(request).timeout(self.timeout))
            .await
    }

    // Reporting views

    pub async fn prospects_by_workbook(&self, workbook_id: &str) -> Result<ProspectMatchByWorkbook> {
        let url = self.endpoint(&format!("/prospects-match/by-workbook/{}", workbook_id))?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn prospects_by_vaga(&self, vaga_id: i64) -> Result<ProspectMatchByVaga> {
        let url = self.endpoint(&format!("/prospects-match/by-vaga/{}", vaga_id))?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn search_prospects_by_name(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<ApplicantProspect>> {
        let mut url = self.endpoint("/prospects-match/search/by-name")?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("limit", &limit.to_string());
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    pub async fn workbooks_summary(&self) -> Result<WorkbooksSummary> {
        let url = self.endpoint("/prospects-match/workbooks/summary")?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    // Analytics

    /// No timeout: the server-side computation may legitimately take
    /// minutes. Callers are expected to keep the session alive.
    pub async fn semantic_performance(&self) -> Result<SemanticPerformance> {
        let url = self.endpoint("/api/analytics/semantic-performance")?;
        self.execute(self.client.get(url)).await
    }

    pub async fn clear_semantic_performance_cache(&self) -> Result<CacheClearResponse> {
        let url = self.endpoint("/api/analytics/semantic-performance/cache")?;
        self.execute(self.client.delete(url).timeout(self.timeout))
            .await
    }

    pub async fn semantic_performance_info(&self) -> Result<SemanticPerformanceInfo> {
        let url = self.endpoint("/api/analytics/semantic-performance/info")?;
        self.execute(self.client.get(url).timeout(self.timeout))
            .await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| Error::Config(format!("Invalid API URL for {}: {}", path, e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "API request failed");
            return Err(Error::Api {
                status,
                status_text,
                body,
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}
