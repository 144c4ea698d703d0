use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralMetrics {
    #[serde(rename = "total_aprovados")]
    pub total_approved: i64,
    #[serde(rename = "media_posicao")]
    pub mean_position: f64,
    #[serde(rename = "mediana_posicao")]
    pub median_position: f64,
    #[serde(rename = "desvio_padrao")]
    pub std_deviation: f64,
    #[serde(rename = "vagas_analisadas")]
    pub vagas_analyzed: i64,
    #[serde(rename = "vagas_com_ranking_semantico")]
    pub vagas_with_semantic_ranking: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramPoint {
    #[serde(rename = "posicao")]
    pub position: i64,
    #[serde(rename = "quantidade")]
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub status: String,
    #[serde(rename = "quantidade")]
    pub count: i64,
}

/// Analytics payload summarizing semantic-matching performance. The
/// interpretation blocks are backend-authored presentation data; they are
/// carried opaquely rather than modeled field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticPerformance {
    #[serde(rename = "metricas_gerais")]
    pub general_metrics: GeneralMetrics,
    #[serde(rename = "distribuicao_top_positions", default)]
    pub top_position_distribution: JsonValue,
    #[serde(default)]
    pub histogram_data: Vec<HistogramPoint>,
    #[serde(default)]
    pub status_distribution: Vec<StatusDistribution>,
    #[serde(rename = "pgvector_info", default)]
    pub pgvector_info: JsonValue,
    #[serde(rename = "mensagem_interpretacao", default)]
    pub interpretation_message: String,
    #[serde(rename = "interpretacao_estruturada", default)]
    pub structured_interpretation: JsonValue,
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticPerformanceInfo {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "metodologia", default)]
    pub methodology: JsonValue,
    #[serde(rename = "metricas_principais", default)]
    pub main_metrics: Vec<String>,
    #[serde(rename = "tecnologia", default)]
    pub technology: JsonValue,
    #[serde(default)]
    pub cache: JsonValue,
}
