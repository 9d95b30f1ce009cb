// src/models/venda.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// --- Enums do domínio ---

/// Status de uma parcela da comissão. Qualquer valor fora desses três
/// é reparado para `Pendente` na entrada (nunca é rejeitado).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ParcelaStatus {
    #[default]
    Pendente,
    Pago,
    Atrasado,
}

impl ParcelaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelaStatus::Pendente => "Pendente",
            ParcelaStatus::Pago => "Pago",
            ParcelaStatus::Atrasado => "Atrasado",
        }
    }

    /// Interpreta o texto vindo do formulário ou do banco.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "Pago" => ParcelaStatus::Pago,
            "Atrasado" => ParcelaStatus::Atrasado,
            _ => ParcelaStatus::Pendente,
        }
    }

    /// Ciclo de alternância usado pela tela de detalhe:
    /// Pendente → Pago → Atrasado → Pendente.
    pub fn proximo(&self) -> Self {
        match self {
            ParcelaStatus::Pendente => ParcelaStatus::Pago,
            ParcelaStatus::Pago => ParcelaStatus::Atrasado,
            ParcelaStatus::Atrasado => ParcelaStatus::Pendente,
        }
    }
}

/// Flag de seguro, normalizada para exatamente "Sim" ou "Não".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Seguro {
    Sim,
    #[serde(rename = "Não")]
    Nao,
}

impl Seguro {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seguro::Sim => "Sim",
            Seguro::Nao => "Não",
        }
    }
}

/// Base sobre a qual a taxa de comissão incide: o valor declarado da
/// venda ou o crédito (já limitado ao teto).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BaseComissao {
    Venda,
    Credito,
}

impl BaseComissao {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseComissao::Venda => "venda",
            BaseComissao::Credito => "credito",
        }
    }
}

// --- Registro canônico ---

/// Uma venda financiada de um consultor, com seu cronograma de parcelas.
/// O array fixo garante estruturalmente a invariante de 6 parcelas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    pub id: Uuid,
    pub user_id: Uuid,
    pub consultor_name: String,
    pub cliente: String,
    pub produto: String,
    /// Data da venda em formato ISO (YYYY-MM-DD). Fica como texto:
    /// a ordem lexicográfica é a ordem cronológica.
    #[schema(example = "2024-01-31")]
    pub data: String,
    pub seguro: Seguro,
    pub cotas: i64,
    pub valor_unit: f64,
    pub valor_venda: f64,
    pub base_comissao: BaseComissao,
    pub taxa_pct: f64,
    #[schema(value_type = Vec<ParcelaStatus>)]
    pub parcelas: [ParcelaStatus; 6],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos derivados de uma venda. Nunca são armazenados: são recalculados
/// a cada leitura a partir do registro canônico.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Derivados {
    /// Produto bruto cotas × valor unitário, antes do teto (para exibir aviso).
    pub credito_raw: f64,
    /// Crédito final, limitado a [0, LIMIT_CREDITO].
    pub credito: f64,
    /// Valor sobre o qual a taxa incide.
    pub base: f64,
    pub comissao_total: f64,
    /// Comissão dividida em 6 parcelas iguais (sem arredondamento aqui;
    /// arredondar é papel da camada de apresentação).
    pub parcela_valor: f64,
    pub pago_n: i64,
    pub atrasado_n: i64,
    pub pendente_n: i64,
}

/// Venda como a API devolve: registro canônico + figuras derivadas.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaView {
    #[serde(flatten)]
    pub venda: Venda,
    pub derivados: Derivados,
}

// --- Entrada bruta do formulário ---

/// Payload cru de criação/edição. Os campos numéricos aceitam número JSON
/// ou texto em formato brasileiro ("1.234,56"); tudo é coagido pelo
/// normalizador antes de virar registro canônico.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaInput {
    #[serde(default)]
    pub cliente: Option<String>,
    #[serde(default)]
    pub produto: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub seguro: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub cotas: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub valor_unit: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub valor_venda: Value,
    #[serde(default)]
    pub base_comissao: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub taxa_pct: Value,
    #[serde(default)]
    pub parcelas: Option<Vec<String>>,

    // Somente admin pode vincular a venda a outro consultor.
    #[serde(default)]
    pub consultor_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Resultado do normalizador: os campos canônicos de uma venda, ainda sem
/// identidade nem timestamps (o serviço completa isso ao persistir).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VendaNormalizada {
    pub cliente: String,
    pub produto: String,
    pub data: String,
    pub seguro: Seguro,
    pub cotas: i64,
    pub valor_unit: f64,
    pub valor_venda: f64,
    pub base_comissao: BaseComissao,
    pub taxa_pct: f64,
    #[schema(value_type = Vec<ParcelaStatus>)]
    pub parcelas: [ParcelaStatus; 6],
}

// --- Filtro declarativo ---

/// Especificação de filtro da listagem e do dashboard. Campo ausente ou
/// vazio significa "sem restrição" naquela dimensão; todos os predicados
/// são combinados com E lógico.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroVendas {
    /// Busca livre (case-insensitive) em consultor, cliente, produto e data.
    pub q: Option<String>,
    /// Nome exato do consultor ("" = todos).
    pub consultor: Option<String>,
    /// Venda entra se QUALQUER parcela tiver esse status.
    pub status: Option<String>,
    /// Data mínima (inclusive), comparação lexicográfica YYYY-MM-DD.
    pub from: Option<String>,
    /// Data máxima (inclusive).
    pub to: Option<String>,
}

// --- Detalhe de parcelas ---

/// Uma linha da tabela de parcelas da tela de detalhe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParcelaDetalhe {
    /// Número da parcela, 1..=6.
    pub numero: i32,
    /// Vencimento (data da venda + N meses). `None` se a data da venda
    /// for ausente ou ilegível; a tela mostra um placeholder.
    #[schema(value_type = Option<String>, format = Date)]
    pub vencimento: Option<NaiveDate>,
    pub status: ParcelaStatus,
    /// Vencida = passou do vencimento e ainda não está paga.
    pub vencida: bool,
}
