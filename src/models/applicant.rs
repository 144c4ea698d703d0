use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    #[serde(rename = "idioma")]
    pub language: String,
    #[serde(rename = "nivel")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "nivel")]
    pub level: String,
    #[serde(rename = "ano_inicio")]
    pub start_year: String,
    #[serde(rename = "ano_fim")]
    pub end_year: String,
    #[serde(rename = "instituicao")]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "inicio")]
    pub start: String,
    #[serde(rename = "fim")]
    pub end: String,
    #[serde(rename = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cv {
    #[serde(rename = "habilidades", default)]
    pub skills: Vec<String>,
    #[serde(rename = "idiomas", default)]
    pub languages: Vec<Language>,
    #[serde(rename = "formacoes", default)]
    pub education: Vec<Education>,
    #[serde(rename = "experiencias", default)]
    pub experience: Vec<Experience>,
}

/// Candidate profile from the backend catalog. `semantic_score` and
/// `selected` are view-local overlays populated from a prospect record;
/// they are not part of the canonical applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub cpf: Option<String>,
    #[serde(rename = "telefone_celular")]
    pub phone: Option<String>,
    #[serde(rename = "data_nascimento")]
    pub birth_date: Option<String>,
    #[serde(rename = "nivel_maximo_formacao")]
    pub highest_education: Option<String>,
    pub url_linkedin: Option<String>,
    pub updated_at: Option<String>,
    #[serde(rename = "cv_pt", default)]
    pub cv: Cv,
    #[serde(rename = "score_semantico")]
    pub semantic_score: Option<f64>,
    #[serde(rename = "selecionado")]
    pub selected: Option<bool>,
}
