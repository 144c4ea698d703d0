use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin tag for prospects persisted from this client.
pub const ORIGIN_MANUAL_SELECTION: &str = "manual_selection";

/// Persisted association between a workbook and an applicant. At most one
/// record exists per `(workbook_id, applicant_id)` pair; the full set for a
/// workbook is the durable shortlist across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProspect {
    pub workbook_id: String,
    pub applicant_id: i64,
    #[serde(rename = "score_semantico")]
    pub semantic_score: f64,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "selecionado")]
    pub selected: bool,
    #[serde(rename = "data_entrada")]
    pub entry_date: Option<DateTime<Utc>>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

/// Write shape for `POST /workbook/{id}/match-prospects`. The endpoint has
/// full-replace semantics: the list sent replaces the persisted set, and an
/// empty list clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectInput {
    pub applicant_id: i64,
    #[serde(rename = "score_semantico")]
    pub semantic_score: f64,
    #[serde(rename = "origem")]
    pub origin: String,
    #[serde(rename = "selecionado")]
    pub selected: bool,
    #[serde(rename = "observacoes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProspectsResponse {
    pub message: String,
    pub workbook_id: Option<String>,
    #[serde(rename = "prospects_count")]
    pub count: i64,
}
