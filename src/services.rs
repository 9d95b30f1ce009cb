pub mod auth;
pub mod dashboard_service;
pub mod vendas_service;
