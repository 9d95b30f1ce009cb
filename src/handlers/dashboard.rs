// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        dashboard::{RankingEntry, Resumo, SerieMensalEntry},
        venda::FiltroVendas,
    },
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    params(FiltroVendas),
    responses(
        (status = 200, description = "KPIs do painel sobre o conjunto filtrado", body = Resumo),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn resumo(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filtro): Query<FiltroVendas>,
) -> Result<Json<Resumo>, AppError> {
    let dados = app_state.dashboard_service.dados(&user, filtro).await?;
    Ok(Json(dados.resumo))
}

// GET /api/dashboard/ranking
#[utoipa::path(
    get,
    path = "/api/dashboard/ranking",
    tag = "Dashboard",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Ranking de consultores (pago, total, vendas)", body = Vec<RankingEntry>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn ranking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filtro): Query<FiltroVendas>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    let dados = app_state.dashboard_service.dados(&user, filtro).await?;
    Ok(Json(dados.ranking))
}

// GET /api/dashboard/serie-mensal
#[utoipa::path(
    get,
    path = "/api/dashboard/serie-mensal",
    tag = "Dashboard",
    params(FiltroVendas),
    responses(
        (status = 200, description = "Totais por mês (YYYY-MM) em ordem cronológica", body = Vec<SerieMensalEntry>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn serie_mensal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filtro): Query<FiltroVendas>,
) -> Result<Json<Vec<SerieMensalEntry>>, AppError> {
    let dados = app_state.dashboard_service.dados(&user, filtro).await?;
    Ok(Json(dados.serie_mensal))
}
