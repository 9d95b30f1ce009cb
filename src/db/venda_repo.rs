// src/db/venda_repo.rs
//
// O colaborador de armazenamento do painel. Tudo que sai daqui já é o
// registro canônico: a linha crua do banco passa pelo read-repair
// (parcelas, enums) na conversão, nunca pelo caminho de erro.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    core::normalizador::ensure_parcelas,
    models::{
        auth::Role,
        venda::{BaseComissao, Seguro, Venda},
    },
};

/// A linha como o Postgres a devolve: textos e array de texto, ainda sem
/// as garantias do tipo canônico.
#[derive(Debug, sqlx::FromRow)]
struct VendaRow {
    id: Uuid,
    user_id: Uuid,
    consultor_name: String,
    cliente: String,
    produto: String,
    data: String,
    seguro: String,
    cotas: i64,
    valor_unit: f64,
    valor_venda: f64,
    base_comissao: String,
    taxa_pct: f64,
    parcelas: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VendaRow> for Venda {
    fn from(row: VendaRow) -> Self {
        Venda {
            id: row.id,
            user_id: row.user_id,
            consultor_name: row.consultor_name,
            cliente: row.cliente,
            produto: row.produto,
            data: row.data,
            seguro: if row.seguro == "Sim" {
                Seguro::Sim
            } else {
                Seguro::Nao
            },
            cotas: row.cotas,
            valor_unit: row.valor_unit,
            valor_venda: row.valor_venda,
            base_comissao: if row.base_comissao == "venda" {
                BaseComissao::Venda
            } else {
                BaseComissao::Credito
            },
            taxa_pct: row.taxa_pct,
            // dados legados com array curto/estranho são reparados aqui
            parcelas: ensure_parcelas(&row.parcelas),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUNAS: &str = "id, user_id, consultor_name, cliente, produto, data, seguro, cotas, \
                       valor_unit, valor_venda, base_comissao, taxa_pct, parcelas, \
                       created_at, updated_at";

#[derive(Clone)]
pub struct VendaRepository {
    pool: PgPool,
}

impl VendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Admin enxerga todas as vendas; consultor só as próprias. A ordem
    /// de criação é a ordem "de chegada" usada pelo filtro e pelo ranking.
    pub async fn list_for_user(&self, role: Role, user_id: Uuid) -> Result<Vec<Venda>, AppError> {
        let rows = if role == Role::Admin {
            sqlx::query_as::<_, VendaRow>(&format!(
                "SELECT {COLUNAS} FROM vendas ORDER BY created_at ASC, id ASC"
            ))
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, VendaRow>(&format!(
                "SELECT {COLUNAS} FROM vendas WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
            ))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Venda::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Venda>, AppError> {
        let row = sqlx::query_as::<_, VendaRow>(&format!(
            "SELECT {COLUNAS} FROM vendas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Venda::from))
    }

    pub async fn create(&self, venda: &Venda) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO vendas (id, user_id, consultor_name, cliente, produto, data, seguro, \
             cotas, valor_unit, valor_venda, base_comissao, taxa_pct, parcelas, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(venda.id)
        .bind(venda.user_id)
        .bind(&venda.consultor_name)
        .bind(&venda.cliente)
        .bind(&venda.produto)
        .bind(&venda.data)
        .bind(venda.seguro.as_str())
        .bind(venda.cotas)
        .bind(venda.valor_unit)
        .bind(venda.valor_venda)
        .bind(venda.base_comissao.as_str())
        .bind(venda.taxa_pct)
        .bind(parcelas_texto(venda))
        .bind(venda.created_at)
        .bind(venda.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Substituição integral do registro (last-writer-wins). Devolve o
    /// número de linhas afetadas: 0 = venda não existe mais.
    pub async fn update(&self, venda: &Venda) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE vendas SET user_id = $2, consultor_name = $3, cliente = $4, produto = $5, \
             data = $6, seguro = $7, cotas = $8, valor_unit = $9, valor_venda = $10, \
             base_comissao = $11, taxa_pct = $12, parcelas = $13, updated_at = $14
             WHERE id = $1",
        )
        .bind(venda.id)
        .bind(venda.user_id)
        .bind(&venda.consultor_name)
        .bind(&venda.cliente)
        .bind(&venda.produto)
        .bind(&venda.data)
        .bind(venda.seguro.as_str())
        .bind(venda.cotas)
        .bind(venda.valor_unit)
        .bind(venda.valor_venda)
        .bind(venda.base_comissao.as_str())
        .bind(venda.taxa_pct)
        .bind(parcelas_texto(venda))
        .bind(venda.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Exclusão definitiva (não há soft-delete nem versionamento).
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM vendas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn parcelas_texto(venda: &Venda) -> Vec<String> {
    venda
        .parcelas
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}
