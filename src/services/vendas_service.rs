// src/services/vendas_service.rs
//
// Orquestra o CRUD de vendas por cima do motor puro: normaliza, valida,
// resolve o dono (admin pode reatribuir), aplica o escopo por papel e
// persiste. Nenhuma regra de cálculo vive aqui — isso é do core.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    core::{cronograma, export, filtro, normalizador},
    db::VendaRepository,
    models::{
        auth::{Role, User},
        venda::{FiltroVendas, ParcelaDetalhe, ParcelaStatus, Venda, VendaInput, VendaView},
    },
};

/// Consultor comum nunca filtra por outro consultor: a dimensão é
/// forçada para "todos" (o repositório já restringe as linhas ao dono).
pub(crate) fn escopo_filtro(user: &User, mut filtro: FiltroVendas) -> FiltroVendas {
    if user.role != Role::Admin {
        filtro.consultor = None;
    }
    filtro
}

#[derive(Clone)]
pub struct VendasService {
    repo: VendaRepository,
}

impl VendasService {
    pub fn new(repo: VendaRepository) -> Self {
        Self { repo }
    }

    pub async fn listar(
        &self,
        user: &User,
        filtro: FiltroVendas,
    ) -> Result<Vec<VendaView>, AppError> {
        let vendas = self.repo.list_for_user(user.role, user.id).await?;
        let filtro = escopo_filtro(user, filtro);
        let filtradas = filtro::filtrar(&vendas, &filtro);

        Ok(filtradas
            .into_iter()
            .map(|venda| {
                let derivados = venda.derivados();
                VendaView { venda, derivados }
            })
            .collect())
    }

    pub async fn criar(&self, user: &User, input: VendaInput) -> Result<VendaView, AppError> {
        let norm = normalizador::normalizar_venda(&input)?;
        // regra aplicada apenas na criação (a edição é deliberadamente frouxa)
        normalizador::validar_quantidades(&norm)?;

        let (user_id, consultor_name) = dono(user, &input, None);
        let agora = Utc::now();
        let venda = Venda {
            id: Uuid::new_v4(),
            user_id,
            consultor_name,
            cliente: norm.cliente,
            produto: norm.produto,
            data: norm.data,
            seguro: norm.seguro,
            cotas: norm.cotas,
            valor_unit: norm.valor_unit,
            valor_venda: norm.valor_venda,
            base_comissao: norm.base_comissao,
            taxa_pct: norm.taxa_pct,
            parcelas: norm.parcelas,
            created_at: agora,
            updated_at: agora,
        };

        self.repo.create(&venda).await?;
        tracing::info!("🧾 Venda {} criada para {}.", venda.id, venda.consultor_name);

        let derivados = venda.derivados();
        Ok(VendaView { venda, derivados })
    }

    /// Substituição integral do registro (o formulário de edição reenvia
    /// todos os campos, incluindo o array de parcelas).
    pub async fn atualizar(
        &self,
        user: &User,
        id: Uuid,
        input: VendaInput,
    ) -> Result<VendaView, AppError> {
        let norm = normalizador::normalizar_venda(&input)?;
        let atual = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::VendaNotFound)?;

        if user.role != Role::Admin && atual.user_id != user.id {
            return Err(AppError::VendaDeOutroConsultor);
        }

        let (user_id, consultor_name) = dono(user, &input, Some(&atual));
        let venda = Venda {
            id,
            user_id,
            consultor_name,
            cliente: norm.cliente,
            produto: norm.produto,
            data: norm.data,
            seguro: norm.seguro,
            cotas: norm.cotas,
            valor_unit: norm.valor_unit,
            valor_venda: norm.valor_venda,
            base_comissao: norm.base_comissao,
            taxa_pct: norm.taxa_pct,
            parcelas: norm.parcelas,
            created_at: atual.created_at,
            updated_at: Utc::now(),
        };

        if self.repo.update(&venda).await? == 0 {
            return Err(AppError::VendaNotFound);
        }

        let derivados = venda.derivados();
        Ok(VendaView { venda, derivados })
    }

    pub async fn excluir(&self, user: &User, id: Uuid) -> Result<(), AppError> {
        self.buscar_do_usuario(user, id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::VendaNotFound);
        }

        tracing::info!("🗑 Venda {} excluída.", id);
        Ok(())
    }

    /// Tabela de parcelas da tela de detalhe: vencimento + flag de
    /// vencida por parcela, com "hoje" vindo de fora.
    pub async fn detalhar_parcelas(
        &self,
        user: &User,
        id: Uuid,
        hoje: NaiveDate,
    ) -> Result<Vec<ParcelaDetalhe>, AppError> {
        let venda = self.buscar_do_usuario(user, id).await?;
        let vencimentos = cronograma::vencimentos(&venda.data);

        Ok((0..6)
            .map(|i| {
                let status = venda.parcelas[i];
                // parcela paga nunca é exibida como vencida
                let vencida = status != ParcelaStatus::Pago
                    && vencimentos[i]
                        .map(|v| cronograma::esta_vencida(v, hoje))
                        .unwrap_or(false);
                ParcelaDetalhe {
                    numero: (i + 1) as i32,
                    vencimento: vencimentos[i],
                    status,
                    vencida,
                }
            })
            .collect())
    }

    /// Botão "marcar atrasadas": toda parcela não paga e vencida vira
    /// Atrasado, e o registro é persistido.
    pub async fn marcar_atrasadas(
        &self,
        user: &User,
        id: Uuid,
        hoje: NaiveDate,
    ) -> Result<VendaView, AppError> {
        let mut venda = self.buscar_do_usuario(user, id).await?;
        venda.parcelas = cronograma::marcar_atrasadas(&venda.parcelas, &venda.data, hoje);
        venda.updated_at = Utc::now();

        if self.repo.update(&venda).await? == 0 {
            return Err(AppError::VendaNotFound);
        }

        let derivados = venda.derivados();
        Ok(VendaView { venda, derivados })
    }

    pub async fn exportar_csv(
        &self,
        user: &User,
        filtro: FiltroVendas,
    ) -> Result<String, AppError> {
        let vendas = self.repo.list_for_user(user.role, user.id).await?;
        let filtro = escopo_filtro(user, filtro);
        Ok(export::gerar_csv(&filtro::filtrar(&vendas, &filtro)))
    }

    async fn buscar_do_usuario(&self, user: &User, id: Uuid) -> Result<Venda, AppError> {
        let venda = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::VendaNotFound)?;

        if user.role != Role::Admin && venda.user_id != user.id {
            return Err(AppError::VendaDeOutroConsultor);
        }

        Ok(venda)
    }
}

/// Resolve o dono do registro: admin pode reatribuir consultor e userId
/// (na edição, os valores atuais são o fallback); consultor comum é
/// sempre o próprio dono.
fn dono(user: &User, input: &VendaInput, atual: Option<&Venda>) -> (Uuid, String) {
    if user.role != Role::Admin {
        return (user.id, user.display_name.clone());
    }

    let user_id = input
        .user_id
        .or(atual.map(|v| v.user_id))
        .unwrap_or(user.id);

    let consultor_name = input
        .consultor_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| atual.map(|v| v.consultor_name.clone()))
        .unwrap_or_else(|| user.display_name.clone());

    (user_id, consultor_name)
}
