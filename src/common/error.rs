// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Três famílias: validação (entrada malformada, rejeitada antes de qualquer
// cálculo), cálculo (invariante interna violada, nunca retorna resultado
// parcial) e não-encontrado (cenário inexistente).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Alíquotas somadas chegam a 100%: o preço final deixa de existir.
    #[error("Precificação inviável: alíquotas de tributos e lucro somam 100% ou mais")]
    InfeasiblePricing,

    #[error("Erro de cálculo: {0}")]
    ComputationError(String),

    #[error("Cenário não encontrado")]
    ScenarioNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    #[error("Erro ao gerar planilha: {0}")]
    SpreadsheetError(String),
}

/// Achata a árvore de erros do `validator` num mapa campo => mensagens.
/// Erros aninhados (structs e listas) saem com o caminho completo, ex.:
/// `lots[0].posts[2].base_wage`.
fn collect_validation_details(
    prefix: &str,
    errors: &validator::ValidationErrors,
    details: &mut std::collections::HashMap<String, Vec<String>>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(path, messages);
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_details(&path, nested, details);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_details(&format!("{}[{}]", path, index), nested, details);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo,
            // incluindo os erros aninhados em lotes e postos.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                collect_validation_details("", &errors, &mut details);
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InfeasiblePricing => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Precificação inviável: as alíquotas de tributos e lucro somam 100% ou mais.",
            ),
            AppError::ScenarioNotFound => (StatusCode::NOT_FOUND, "Cenário não encontrado."),

            // Todos os outros erros (DatabaseError, ComputationError, etc.) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
