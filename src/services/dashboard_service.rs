// src/services/dashboard_service.rs

use crate::{
    common::error::AppError,
    core::{agregado, filtro},
    db::VendaRepository,
    models::{auth::User, dashboard::DashboardData, venda::FiltroVendas},
    services::vendas_service::escopo_filtro,
};

/// Indicadores do painel: sempre o mesmo caminho (listar → filtrar →
/// agregar), para o resumo, o ranking e a série baterem entre si.
#[derive(Clone)]
pub struct DashboardService {
    repo: VendaRepository,
}

impl DashboardService {
    pub fn new(repo: VendaRepository) -> Self {
        Self { repo }
    }

    pub async fn dados(
        &self,
        user: &User,
        filtro: FiltroVendas,
    ) -> Result<DashboardData, AppError> {
        let vendas = self.repo.list_for_user(user.role, user.id).await?;
        let filtro = escopo_filtro(user, filtro);
        Ok(agregado::agregar(&filtro::filtrar(&vendas, &filtro)))
    }
}
