use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkbookStatus {
    #[serde(rename = "aberto")]
    Open,
    #[serde(rename = "fechado")]
    Closed,
    // Declared by the backend but carries no distinct behavior; gated as Open.
    #[serde(rename = "em_andamento")]
    InProgress,
}

/// A per-vaga candidate-review session. Invariant: `closed_at` is set
/// if and only if `status == Closed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    pub id: String,
    pub vaga_id: i64,
    #[serde(rename = "criado_por")]
    pub created_by: Option<String>,
    #[serde(rename = "criado_em")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fechado_em")]
    pub closed_at: Option<DateTime<Utc>>,
    pub status: Option<WorkbookStatus>,
    #[serde(rename = "vaga_titulo")]
    pub vaga_title: Option<String>,
    pub total_prospects: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkbook {
    pub vaga_id: i64,
    #[serde(rename = "criado_por", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Partial update sent via `PUT /workbook/{id}`; only the lifecycle fields
/// are ever patched from this side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkbookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkbookStatus>,
    #[serde(rename = "fechado_em", skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
