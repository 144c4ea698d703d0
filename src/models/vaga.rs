use serde::{Deserialize, Serialize};

/// Job-posting status as reported by the matching backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VagaStatus {
    #[serde(rename = "nao_iniciada")]
    NotStarted,
    #[serde(rename = "aberta")]
    Open,
    #[serde(rename = "em_andamento")]
    InProgress,
    #[serde(rename = "em_analise")]
    UnderReview,
    #[serde(rename = "pausada")]
    Paused,
    #[serde(rename = "finalizada")]
    Finished,
    #[serde(rename = "cancelada")]
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vaga {
    pub id: i64,
    #[serde(rename = "informacoes_basicas_titulo_vaga")]
    pub title: String,
    #[serde(rename = "status_vaga")]
    pub status: VagaStatus,
}

/// Extended profile returned by `GET /vagas/{id}`. Read-only from this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VagaDetail {
    pub id: i64,
    #[serde(rename = "informacoes_basicas_titulo_vaga")]
    pub title: String,
    #[serde(rename = "status_vaga")]
    pub status: VagaStatus,
    #[serde(rename = "informacoes_basicas_cliente")]
    pub client: Option<String>,
    #[serde(rename = "informacoes_basicas_objetivo_vaga")]
    pub objective: Option<String>,
    #[serde(rename = "perfil_vaga_cidade")]
    pub city: Option<String>,
    #[serde(rename = "perfil_vaga_estado")]
    pub state: Option<String>,
    #[serde(rename = "perfil_vaga_nivel_profissional")]
    pub professional_level: Option<String>,
    #[serde(rename = "perfil_vaga_nivel_academico")]
    pub academic_level: Option<String>,
    #[serde(rename = "perfil_vaga_areas_atuacao")]
    pub work_areas: Option<String>,
    #[serde(rename = "perfil_vaga_principais_atividades")]
    pub main_activities: Option<String>,
    #[serde(rename = "perfil_vaga_competencia_tecnicas_e_comportamentais")]
    pub competencies: Option<String>,
    #[serde(rename = "perfil_vaga_demais_observacoes")]
    pub observations: Option<String>,
    pub updated_at: Option<String>,
}
