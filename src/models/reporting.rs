use crate::models::applicant::Cv;
use serde::{Deserialize, Serialize};

/// Prospect joined with its applicant profile, as returned by the
/// read-only `/prospects-match` reporting views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProspect {
    pub workbook_id: String,
    pub applicant_id: i64,
    #[serde(rename = "score_semantico")]
    pub semantic_score: Option<f64>,
    #[serde(rename = "origem")]
    pub origin: Option<String>,
    #[serde(rename = "selecionado")]
    pub selected: Option<bool>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "cv_pt")]
    pub cv: Option<Cv>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectMatchByWorkbook {
    pub workbook_id: String,
    pub vaga_id: i64,
    #[serde(rename = "vaga_titulo")]
    pub vaga_title: Option<String>,
    pub prospects: Vec<ApplicantProspect>,
    pub total_prospects: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectMatchByVaga {
    pub vaga_id: i64,
    #[serde(rename = "vaga_titulo")]
    pub vaga_title: Option<String>,
    pub workbooks: Vec<ProspectMatchByWorkbook>,
    pub total_prospects: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookProspectSummary {
    pub workbook_id: String,
    pub vaga_id: i64,
    #[serde(rename = "vaga_titulo")]
    pub vaga_title: Option<String>,
    pub total_prospects: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbooksSummary {
    pub total_workbooks: i64,
    pub workbooks: Vec<WorkbookProspectSummary>,
}
