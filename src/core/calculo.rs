// src/core/calculo.rs
//
// O cálculo de comissão em si. Puro e determinístico: nada de I/O nem
// relógio — quem precisa de "hoje" (vencimento de parcela) usa o
// cronograma e passa a data explicitamente.

use crate::core::numerico::clamp_credito;
use crate::models::venda::{BaseComissao, Derivados, ParcelaStatus, Venda, VendaNormalizada};

/// Deriva todas as figuras financeiras de uma venda:
/// credito = clamp(cotas × valor_unit), comissão = base × taxa/100,
/// parcela = comissão / 6, e a contagem de parcelas por status
/// (que sempre particiona as 6 posições).
pub fn computar(
    cotas: i64,
    valor_unit: f64,
    valor_venda: f64,
    base_comissao: BaseComissao,
    taxa_pct: f64,
    parcelas: &[ParcelaStatus; 6],
) -> Derivados {
    let credito_raw = cotas as f64 * valor_unit;
    let credito = clamp_credito(credito_raw);

    // A base "credito" usa o valor já limitado ao teto, não o bruto.
    let base = match base_comissao {
        BaseComissao::Venda => valor_venda,
        BaseComissao::Credito => credito,
    };

    let comissao_total = base * (taxa_pct / 100.0);
    let parcela_valor = comissao_total / 6.0;

    let conta = |status: ParcelaStatus| parcelas.iter().filter(|p| **p == status).count() as i64;

    Derivados {
        credito_raw,
        credito,
        base,
        comissao_total,
        parcela_valor,
        pago_n: conta(ParcelaStatus::Pago),
        atrasado_n: conta(ParcelaStatus::Atrasado),
        pendente_n: conta(ParcelaStatus::Pendente),
    }
}

impl Venda {
    pub fn derivados(&self) -> Derivados {
        computar(
            self.cotas,
            self.valor_unit,
            self.valor_venda,
            self.base_comissao,
            self.taxa_pct,
            &self.parcelas,
        )
    }
}

impl VendaNormalizada {
    pub fn derivados(&self) -> Derivados {
        computar(
            self.cotas,
            self.valor_unit,
            self.valor_venda,
            self.base_comissao,
            self.taxa_pct,
            &self.parcelas,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParcelaStatus::*;

    #[test]
    fn exemplo_completo_com_teto_de_credito() {
        // 10 cotas × 200.000 = 2.000.000, limitado a 1.500.000;
        // 5% sobre o crédito = 75.000; parcela = 12.500.
        let d = computar(
            10,
            200_000.0,
            0.0,
            BaseComissao::Credito,
            5.0,
            &[Pago, Pago, Pendente, Pendente, Atrasado, Pendente],
        );

        assert_eq!(d.credito_raw, 2_000_000.0);
        assert_eq!(d.credito, 1_500_000.0);
        assert_eq!(d.comissao_total, 75_000.0);
        assert_eq!(d.parcela_valor, 12_500.0);
        assert_eq!((d.pago_n, d.pendente_n, d.atrasado_n), (2, 3, 1));
        assert_eq!(d.pago_n + d.pendente_n + d.atrasado_n, 6);
    }

    #[test]
    fn base_venda_ignora_o_credito() {
        let d = computar(
            10,
            200_000.0,
            120_000.0,
            BaseComissao::Venda,
            10.0,
            &[Pendente; 6],
        );
        assert_eq!(d.base, 120_000.0);
        assert_eq!(d.comissao_total, 12_000.0);
        // o crédito continua derivado (e limitado) para exibição
        assert_eq!(d.credito, 1_500_000.0);
    }

    #[test]
    fn taxa_zero_ou_negativa_e_permitida() {
        let zero = computar(5, 1_000.0, 0.0, BaseComissao::Credito, 0.0, &[Pendente; 6]);
        assert_eq!(zero.comissao_total, 0.0);

        let negativa = computar(5, 1_000.0, 0.0, BaseComissao::Credito, -10.0, &[Pendente; 6]);
        assert_eq!(negativa.comissao_total, -500.0);
        assert_eq!(negativa.parcela_valor, -500.0 / 6.0);
    }

    #[test]
    fn credito_nunca_sai_do_intervalo() {
        for (cotas, unit) in [(0, 0.0), (1, 1.0), (100, 999_999.0), (3, 500_000.0)] {
            let d = computar(cotas, unit, 0.0, BaseComissao::Credito, 5.0, &[Pendente; 6]);
            assert!(d.credito >= 0.0 && d.credito <= 1_500_000.0);
            assert_eq!(d.credito, d.credito_raw.min(1_500_000.0));
        }
    }
}
