// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As mensagens espelham as respostas que o painel exibe ao consultor.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Preencha cliente, produto e data.")]
    CamposObrigatorios,

    #[error("Informe cotas e valor unitário (> 0).")]
    QuantidadeInvalida,

    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Este nome de usuário já está em uso")]
    UsernameAlreadyExists,

    #[error("Acesso negado")]
    AcessoNegado,

    #[error("Você não pode alterar venda de outro consultor")]
    VendaDeOutroConsultor,

    #[error("Venda não encontrada")]
    VendaNotFound,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            m @ (AppError::CamposObrigatorios | AppError::QuantidadeInvalida) => {
                (StatusCode::BAD_REQUEST, m.to_string())
            }
            m @ (AppError::InvalidCredentials | AppError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, m.to_string())
            }
            m @ (AppError::AcessoNegado | AppError::VendaDeOutroConsultor) => {
                (StatusCode::FORBIDDEN, m.to_string())
            }
            m @ (AppError::UserNotFound | AppError::VendaNotFound) => {
                (StatusCode::NOT_FOUND, m.to_string())
            }
            m @ AppError::UsernameAlreadyExists => (StatusCode::CONFLICT, m.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
