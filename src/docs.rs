// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::list_users,
        handlers::auth::create_user,

        // --- Vendas ---
        handlers::vendas::listar,
        handlers::vendas::criar,
        handlers::vendas::atualizar,
        handlers::vendas::excluir,
        handlers::vendas::parcelas,
        handlers::vendas::marcar_atrasadas,
        handlers::vendas::exportar,

        // --- Dashboard ---
        handlers::dashboard::resumo,
        handlers::dashboard::ranking,
        handlers::dashboard::serie_mensal,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::CreateUserPayload,
            models::auth::AuthResponse,

            // --- Vendas ---
            models::venda::ParcelaStatus,
            models::venda::Seguro,
            models::venda::BaseComissao,
            models::venda::Venda,
            models::venda::Derivados,
            models::venda::VendaView,
            models::venda::VendaInput,
            models::venda::ParcelaDetalhe,

            // --- Dashboard ---
            models::dashboard::Resumo,
            models::dashboard::RankingEntry,
            models::dashboard::SerieMensalEntry,
            models::dashboard::DashboardData,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Users", description = "Gestão de Usuários (admin)"),
        (name = "Vendas", description = "Registro de Vendas e Parcelas de Comissão"),
        (name = "Dashboard", description = "Indicadores, Ranking e Série Mensal")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
