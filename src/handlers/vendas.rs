// src/handlers/vendas.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::venda::{FiltroVendas, ParcelaDetalhe, VendaInput, VendaView},
};

// GET /api/vendas
#[utoipa::path(
    get,
    path = "/api/vendas",
    tag = "Vendas",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Vendas visíveis ao usuário, já filtradas e com derivados", body = Vec<VendaView>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn listar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filtro): Query<FiltroVendas>,
) -> Result<Json<Vec<VendaView>>, AppError> {
    Ok(Json(app_state.vendas_service.listar(&user, filtro).await?))
}

// POST /api/vendas
#[utoipa::path(
    post,
    path = "/api/vendas",
    tag = "Vendas",
    request_body = VendaInput,
    responses(
        (status = 201, description = "Venda criada", body = VendaView),
        (status = 400, description = "Campos obrigatórios ou quantidades inválidas")
    ),
    security(("api_jwt" = []))
)]
pub async fn criar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(input): Json<VendaInput>,
) -> Result<(StatusCode, Json<VendaView>), AppError> {
    let venda = app_state.vendas_service.criar(&user, input).await?;
    Ok((StatusCode::CREATED, Json(venda)))
}

// PUT /api/vendas/{id}
#[utoipa::path(
    put,
    path = "/api/vendas/{id}",
    tag = "Vendas",
    request_body = VendaInput,
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda atualizada", body = VendaView),
        (status = 403, description = "Venda de outro consultor"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn atualizar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(input): Json<VendaInput>,
) -> Result<Json<VendaView>, AppError> {
    Ok(Json(
        app_state.vendas_service.atualizar(&user, id, input).await?,
    ))
}

// DELETE /api/vendas/{id}
#[utoipa::path(
    delete,
    path = "/api/vendas/{id}",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 204, description = "Venda excluída"),
        (status = 403, description = "Venda de outro consultor"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn excluir(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.vendas_service.excluir(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/vendas/{id}/parcelas
#[utoipa::path(
    get,
    path = "/api/vendas/{id}/parcelas",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "As 6 parcelas com vencimento e situação", body = Vec<ParcelaDetalhe>),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn parcelas(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ParcelaDetalhe>>, AppError> {
    let hoje = Utc::now().date_naive();
    Ok(Json(
        app_state
            .vendas_service
            .detalhar_parcelas(&user, id, hoje)
            .await?,
    ))
}

// POST /api/vendas/{id}/marcar-atrasadas
#[utoipa::path(
    post,
    path = "/api/vendas/{id}/marcar-atrasadas",
    tag = "Vendas",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Parcelas vencidas marcadas como Atrasado", body = VendaView),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn marcar_atrasadas(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<VendaView>, AppError> {
    let hoje = Utc::now().date_naive();
    Ok(Json(
        app_state
            .vendas_service
            .marcar_atrasadas(&user, id, hoje)
            .await?,
    ))
}

// GET /api/vendas/export
#[utoipa::path(
    get,
    path = "/api/vendas/export",
    tag = "Vendas",
    params(FiltroVendas),
    responses(
        (status = 200, description = "CSV das vendas filtradas", body = String, content_type = "text/csv"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn exportar(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filtro): Query<FiltroVendas>,
) -> Result<impl IntoResponse, AppError> {
    let csv = app_state.vendas_service.exportar_csv(&user, filtro).await?;
    let nome = format!("vendas_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{nome}\""),
            ),
        ],
        csv,
    ))
}
