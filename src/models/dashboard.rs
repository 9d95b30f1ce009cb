// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// 1. Resumo (os cards do topo do painel)
//
// Os valores pago/pendente/atrasado são ponderados por parcela:
// parcela_valor × quantidade de parcelas naquele status, somado sobre as
// vendas filtradas. Isso assume parcelas de valor igual (comissão / 6).
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resumo {
    pub total_vendas: i64,
    pub comissao_total: f64,
    pub pago: f64,
    pub pendente: f64,
    pub atrasado: f64,
    pub parcelas_total: i64,
    pub parcelas_pago: i64,
    pub parcelas_pendente: i64,
    pub parcelas_atrasado: i64,
    /// Comissão total / número de vendas (0 quando não há vendas).
    pub ticket_medio: f64,
}

// 2. Ranking por consultor
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub consultor: String,
    pub vendas: i64,
    pub total: f64,
    pub pago: f64,
    pub pendente: f64,
    pub atrasado: f64,
}

// 3. Série mensal (gráfico de evolução)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SerieMensalEntry {
    /// Chave YYYY-MM; vendas com data ilegível caem no balde "—".
    pub mes: String,
    pub total: f64,
    pub pago: f64,
    pub pendente: f64,
    pub atrasado: f64,
}

/// Resultado completo de uma passada de agregação sobre o conjunto filtrado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub resumo: Resumo,
    pub ranking: Vec<RankingEntry>,
    pub serie_mensal: Vec<SerieMensalEntry>,
}
