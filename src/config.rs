// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{UserRepository, VendaRepository},
    services::{auth::AuthService, dashboard_service::DashboardService, vendas_service::VendasService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub vendas_service: VendasService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let venda_repo = VendaRepository::new(db_pool.clone());
        let auth_service = AuthService::new(user_repo, jwt_secret);
        let vendas_service = VendasService::new(venda_repo.clone());
        let dashboard_service = DashboardService::new(venda_repo);

        Ok(Self {
            db_pool,
            auth_service,
            vendas_service,
            dashboard_service,
        })
    }
}
