// src/core/normalizador.rs
//
// Transforma o payload cru do formulário no registro canônico. Coerção
// em vez de rejeição para tudo que dá: só campos de texto obrigatórios
// e a regra de quantidade (na criação) geram erro.

use crate::common::error::AppError;
use crate::core::numerico::parse_num;
use crate::models::venda::{BaseComissao, ParcelaStatus, Seguro, VendaInput, VendaNormalizada};

/// Repara qualquer forma de entrada de parcelas para exatamente 6 status
/// válidos: corta o excesso, completa o que falta com `Pendente` e troca
/// entradas desconhecidas por `Pendente`.
pub fn ensure_parcelas<I, S>(entrada: I) -> [ParcelaStatus; 6]
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parcelas = [ParcelaStatus::Pendente; 6];
    for (slot, valor) in parcelas.iter_mut().zip(entrada) {
        *slot = ParcelaStatus::parse_or_default(valor.as_ref());
    }
    parcelas
}

/// Normaliza a entrada do formulário. Exige cliente, produto e data não
/// vazios (após trim); todo o resto é coagido para um valor válido.
pub fn normalizar_venda(input: &VendaInput) -> Result<VendaNormalizada, AppError> {
    let cliente = input.cliente.as_deref().unwrap_or("").trim().to_string();
    let produto = input.produto.as_deref().unwrap_or("").trim().to_string();
    let data = input.data.as_deref().unwrap_or("").trim().to_string();

    if cliente.is_empty() || produto.is_empty() || data.is_empty() {
        return Err(AppError::CamposObrigatorios);
    }

    // cotas: parse → floor → nunca negativo. Fração digitada é truncada.
    let cotas = parse_num(&input.cotas).floor().max(0.0) as i64;
    let valor_unit = parse_num(&input.valor_unit).max(0.0);
    let valor_venda = parse_num(&input.valor_venda).max(0.0);
    // A taxa não é limitada: taxa 0 (ou negativa) produz comissão 0 ou
    // negativa intencionalmente.
    let taxa_pct = parse_num(&input.taxa_pct);

    let seguro = if input.seguro.as_deref() == Some("Sim") {
        Seguro::Sim
    } else {
        Seguro::Nao
    };
    let base_comissao = if input.base_comissao.as_deref() == Some("venda") {
        BaseComissao::Venda
    } else {
        BaseComissao::Credito
    };

    let parcelas = ensure_parcelas(input.parcelas.as_deref().unwrap_or(&[]));

    Ok(VendaNormalizada {
        cliente,
        produto,
        data,
        seguro,
        cotas,
        valor_unit,
        valor_venda,
        base_comissao,
        taxa_pct,
        parcelas,
    })
}

/// Regra aplicada SOMENTE na criação: cotas e valor unitário precisam ser
/// positivos. A edição não repassa por aqui (semântica deliberadamente
/// mais frouxa para correções).
pub fn validar_quantidades(venda: &VendaNormalizada) -> Result<(), AppError> {
    if venda.cotas <= 0 || venda.valor_unit <= 0.0 {
        return Err(AppError::QuantidadeInvalida);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entrada_base() -> VendaInput {
        VendaInput {
            cliente: Some("Maria Souza".into()),
            produto: Some("Consórcio Imóvel".into()),
            data: Some("2024-05-10".into()),
            seguro: Some("Sim".into()),
            cotas: json!("10"),
            valor_unit: json!("200.000,00"),
            valor_venda: json!(0),
            base_comissao: Some("credito".into()),
            taxa_pct: json!(5),
            parcelas: None,
            consultor_name: None,
            user_id: None,
        }
    }

    #[test]
    fn coage_os_campos_numericos_e_enums() {
        let v = normalizar_venda(&entrada_base()).unwrap();
        assert_eq!(v.cotas, 10);
        assert_eq!(v.valor_unit, 200_000.0);
        assert_eq!(v.taxa_pct, 5.0);
        assert_eq!(v.seguro, Seguro::Sim);
        assert_eq!(v.base_comissao, BaseComissao::Credito);
        assert_eq!(v.parcelas, [ParcelaStatus::Pendente; 6]);
    }

    #[test]
    fn exige_cliente_produto_e_data() {
        for campo in ["cliente", "produto", "data"] {
            let mut input = entrada_base();
            match campo {
                "cliente" => input.cliente = Some("   ".into()),
                "produto" => input.produto = None,
                _ => input.data = Some("".into()),
            }
            assert!(matches!(
                normalizar_venda(&input),
                Err(AppError::CamposObrigatorios)
            ));
        }
    }

    #[test]
    fn literais_fora_do_padrao_viram_o_default() {
        let mut input = entrada_base();
        // Só o literal exato conta: "sim" minúsculo vira "Não".
        input.seguro = Some("sim".into());
        input.base_comissao = Some("VENDA".into());
        let v = normalizar_venda(&input).unwrap();
        assert_eq!(v.seguro, Seguro::Nao);
        assert_eq!(v.base_comissao, BaseComissao::Credito);
    }

    #[test]
    fn cotas_fracionarias_sao_truncadas_e_negativos_zerados() {
        let mut input = entrada_base();
        input.cotas = json!("10,9");
        input.valor_unit = json!(-50);
        input.taxa_pct = json!("-2,5");
        let v = normalizar_venda(&input).unwrap();
        assert_eq!(v.cotas, 10);
        assert_eq!(v.valor_unit, 0.0);
        // taxa pode ser negativa
        assert_eq!(v.taxa_pct, -2.5);
    }

    #[test]
    fn parcelas_sao_reparadas_para_6_em_qualquer_forma() {
        use ParcelaStatus::*;

        // ausente
        assert_eq!(ensure_parcelas(Vec::<String>::new()), [Pendente; 6]);
        // curta (3) completa com Pendente
        assert_eq!(
            ensure_parcelas(["Pago", "Atrasado", "Pago"]),
            [Pago, Atrasado, Pago, Pendente, Pendente, Pendente]
        );
        // longa (8) é truncada
        assert_eq!(
            ensure_parcelas(["Pago"; 8]),
            [Pago, Pago, Pago, Pago, Pago, Pago]
        );
        // entrada inválida vira Pendente
        assert_eq!(
            ensure_parcelas(["Pago", "???", "Atrasado", "", "Pago", "pago"]),
            [Pago, Pendente, Atrasado, Pendente, Pago, Pendente]
        );

        // a partição pago + pendente + atrasado == 6 vale sempre
        for forma in [vec![], vec!["Pago"; 3], vec!["x"; 8]] {
            let p = ensure_parcelas(forma);
            let pago = p.iter().filter(|s| **s == Pago).count();
            let pend = p.iter().filter(|s| **s == Pendente).count();
            let atr = p.iter().filter(|s| **s == Atrasado).count();
            assert_eq!(pago + pend + atr, 6);
        }
    }

    #[test]
    fn quantidades_positivas_so_valem_na_criacao() {
        let mut input = entrada_base();
        input.cotas = json!(0);
        let v = normalizar_venda(&input).unwrap();
        // o normalizador aceita; a regra é um passo separado do caminho de criação
        assert!(matches!(
            validar_quantidades(&v),
            Err(AppError::QuantidadeInvalida)
        ));
    }

    #[test]
    fn normalizacao_e_idempotente() {
        let mut input = entrada_base();
        input.parcelas = Some(vec!["Pago".into(), "lixo".into()]);
        let primeira = normalizar_venda(&input).unwrap();

        // reapresenta o registro canônico como se fosse o formulário de edição
        let reenvio: VendaInput =
            serde_json::from_value(serde_json::to_value(&primeira).unwrap()).unwrap();
        let segunda = normalizar_venda(&reenvio).unwrap();

        assert_eq!(primeira, segunda);
    }
}
