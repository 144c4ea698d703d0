use crate::cache::{QueryCache, QueryKey};
use crate::error::{Error, Result};
use crate::models::chat::ChatRequest;
use crate::models::workbook::{DeleteResponse, Workbook, WorkbookPatch, WorkbookStatus};
use crate::services::api_service::ApiService;
use crate::services::chat_session::ChatSession;
use crate::services::lifecycle::{self, LifecycleState, Transition, TransitionCheck};
use crate::services::reconciler::SelectionReconciler;
use crate::services::workbook_service::WorkbookService;
use crate::utils::time;

/// Per-workbook controller: composes the reconciler, the chat session and
/// the lifecycle state over the API client and query cache. All gating
/// happens here, before any network call, so a rejected operation has no
/// side effect at all.
pub struct WorkbookSession {
    api: ApiService,
    cache: QueryCache,
    workbook: Workbook,
    state: LifecycleState,
    reconciler: SelectionReconciler,
    chat: ChatSession,
}

impl WorkbookSession {
    pub fn new(api: ApiService, cache: QueryCache, workbook: Workbook) -> Self {
        let state = LifecycleState::from_status(workbook.status);
        Self {
            api,
            cache,
            workbook,
            state,
            reconciler: SelectionReconciler::new(),
            chat: ChatSession::new(),
        }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    pub fn reconciler(&self) -> &SelectionReconciler {
        &self.reconciler
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Rebuild the candidate view from the persisted shortlist: prospects
    /// through the cache, then a batch fetch of the applicant profiles
    /// (skipped when nothing is persisted).
    pub async fn load(&mut self) -> Result<()> {
        let api = self.api.clone();
        let workbook_id = self.workbook.id.clone();

        let prospects = self
            .cache
            .fetch(QueryKey::MatchProspects(workbook_id.clone()), || {
                api.get_match_prospects(&workbook_id)
            })
            .await?;

        let applicants = if prospects.is_empty() {
            Vec::new()
        } else {
            let ids: Vec<i64> = prospects.iter().map(|p| p.applicant_id).collect();
            self.api.get_applicants_by_ids(&ids).await?
        };

        self.reconciler.load_saved(&prospects, applicants);
        tracing::info!(
            workbook_id = %self.workbook.id,
            prospects = prospects.len(),
            "workbook state loaded"
        );
        Ok(())
    }

    /// Local toggle. Returns whether the toggle was applied: on a closed
    /// workbook selection is frozen and the call is a no-op, not merely
    /// disabled in the UI.
    pub fn set_selected(&mut self, applicant_id: i64, selected: bool) -> bool {
        if self.state.is_closed() {
            return false;
        }
        self.reconciler.set_selected(applicant_id, selected);
        true
    }

    /// Persist the current selection with replace semantics. An empty
    /// selection persists the empty list, which is the designed way to
    /// clear the shortlist. A failed save leaves local state untouched and
    /// is retryable as-is.
    pub async fn save_selection(&mut self) -> Result<usize> {
        if self.state.is_closed() {
            return Err(Error::Validation(
                "cannot save selection on a closed workbook".to_string(),
            ));
        }

        let payload = self.reconciler.save_payload();
        let count = payload.len();
        self.api
            .update_match_prospects(&self.workbook.id, &payload)
            .await?;

        self.cache
            .invalidate(&QueryKey::MatchProspects(self.workbook.id.clone()));
        self.cache.invalidate(&QueryKey::WorkbooksSummary);
        self.reconciler.finish_save(count);
        tracing::info!(workbook_id = %self.workbook.id, count, "selection saved");
        Ok(count)
    }

    /// Close the workbook. Requires at least one selected candidate; the
    /// check runs before any network call. On success the caller is
    /// expected to navigate back to the workbook list.
    pub async fn close(&mut self) -> Result<&Workbook> {
        self.check(Transition::Close)?;

        let closed_at = time::now();
        let updated = self
            .api
            .update_workbook(
                &self.workbook.id,
                &WorkbookPatch {
                    status: Some(WorkbookStatus::Closed),
                    closed_at: Some(closed_at),
                },
            )
            .await?;

        self.workbook = updated;
        self.workbook.status = Some(WorkbookStatus::Closed);
        self.workbook.closed_at.get_or_insert(closed_at);
        self.state = LifecycleState::Closed;
        self.invalidate_after_update();
        tracing::info!(workbook_id = %self.workbook.id, "workbook closed");
        Ok(&self.workbook)
    }

    /// Reopen a closed workbook, then reload all workbook-scoped state from
    /// scratch: selection and candidates may be stale after reopening, so a
    /// targeted patch would risk subtle inconsistencies.
    pub async fn reopen(&mut self) -> Result<&Workbook> {
        self.check(Transition::Reopen)?;

        let updated = self
            .api
            .update_workbook(
                &self.workbook.id,
                &WorkbookPatch {
                    status: Some(WorkbookStatus::Open),
                    closed_at: None,
                },
            )
            .await?;

        self.workbook = updated;
        self.workbook.status = Some(WorkbookStatus::Open);
        // The backend may echo the old fechado_em; an open workbook never
        // carries a close timestamp.
        self.workbook.closed_at = None;
        self.state = LifecycleState::Open;
        self.invalidate_after_update();

        self.chat = ChatSession::new();
        self.cache
            .invalidate(&QueryKey::MatchProspects(self.workbook.id.clone()));
        self.load().await?;
        tracing::info!(workbook_id = %self.workbook.id, "workbook reopened");
        Ok(&self.workbook)
    }

    /// Send one chat turn. The user message lands on the transcript before
    /// the call is awaited; a backend failure degrades to the fixed apology
    /// reply instead of surfacing. Rejected outright while the workbook is
    /// closed or another turn is in flight.
    pub async fn send_message(&mut self, message: &str) -> Result<()> {
        if self.state.is_closed() {
            return Err(Error::Validation(
                "chat is disabled on a closed workbook".to_string(),
            ));
        }
        if self.chat.is_pending() {
            return Err(Error::Validation(
                "a chat message is already in flight".to_string(),
            ));
        }

        self.chat.begin_turn(message);
        let request = ChatRequest {
            message: message.to_string(),
            workbook_id: Some(self.workbook.id.clone()),
            context: None,
            session_id: self.chat.session_id().map(str::to_string),
        };

        match self.api.send_chat_message(&request).await {
            Ok(response) => {
                if let Some(candidates) = self.chat.complete_turn(response) {
                    self.reconciler.apply_chat_filter(candidates, message);
                }
            }
            Err(e) => {
                tracing::warn!(workbook_id = %self.workbook.id, error = %e, "chat send failed");
                self.chat.fail_turn();
            }
        }
        Ok(())
    }

    /// Deleting stays available in both lifecycle states.
    pub async fn delete(&self) -> Result<DeleteResponse> {
        let response = self.api.delete_workbook(&self.workbook.id).await?;
        WorkbookService::invalidate_workbook_collections(&self.cache);
        self.cache
            .remove(&QueryKey::Workbook(self.workbook.id.clone()));
        self.cache
            .remove(&QueryKey::MatchProspects(self.workbook.id.clone()));
        Ok(response)
    }

    fn check(&self, transition: Transition) -> Result<()> {
        match lifecycle::validate(self.state, transition, self.reconciler.selected_count()) {
            TransitionCheck::Allowed => Ok(()),
            TransitionCheck::Rejected(reason) => Err(Error::Validation(reason.to_string())),
        }
    }

    fn invalidate_after_update(&self) {
        self.cache.invalidate(&QueryKey::Workbooks);
        self.cache
            .invalidate(&QueryKey::Workbook(self.workbook.id.clone()));
    }
}
