// src/core/cronograma.rs
//
// Vencimentos das 6 parcelas mensais. Toda a aritmética é de calendário
// puro (NaiveDate, sem fuso): "hoje" entra sempre como parâmetro para o
// componente continuar determinístico e testável.

use chrono::{Months, NaiveDate};

use crate::models::venda::ParcelaStatus;

/// Vencimento da parcela N (1..=6): data da venda + N meses, com o dia
/// grudado no fim do mês quando o mês alvo é mais curto (31/01 + 1 mês
/// vence em 28/02 ou 29/02, nunca rola para março).
/// `None` quando a data da venda é ausente ou ilegível.
pub fn vencimento(data: &str, parcela: u32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(data.trim(), "%Y-%m-%d")
        .ok()?
        .checked_add_months(Months::new(parcela))
}

/// Os 6 vencimentos de uma venda, na ordem das parcelas.
pub fn vencimentos(data: &str) -> [Option<NaiveDate>; 6] {
    std::array::from_fn(|i| vencimento(data, i as u32 + 1))
}

/// Vencida = estritamente antes de hoje, em granularidade de dia.
/// A convenção de quem chama: parcela já "Pago" nunca é tratada como
/// vencida, independente da data.
pub fn esta_vencida(vencimento: NaiveDate, hoje: NaiveDate) -> bool {
    vencimento < hoje
}

/// Transição em lote da tela de detalhe: toda parcela não paga cujo
/// vencimento já passou vira `Atrasado`. Parcelas pagas e vencimentos
/// indeterminados ficam como estão.
pub fn marcar_atrasadas(
    parcelas: &[ParcelaStatus; 6],
    data: &str,
    hoje: NaiveDate,
) -> [ParcelaStatus; 6] {
    let vencs = vencimentos(data);
    std::array::from_fn(|i| match vencs[i] {
        Some(v) if parcelas[i] != ParcelaStatus::Pago && esta_vencida(v, hoje) => {
            ParcelaStatus::Atrasado
        }
        _ => parcelas[i],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParcelaStatus::*;

    fn dia(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn gruda_no_fim_do_mes_curto() {
        // ano bissexto: 31/01 + 1 mês = 29/02
        assert_eq!(vencimento("2024-01-31", 1), Some(dia("2024-02-29")));
        // 31/08 + 6 meses = 28/02 do ano seguinte (não bissexto)
        assert_eq!(vencimento("2024-08-31", 6), Some(dia("2025-02-28")));
        // mês de 30 dias
        assert_eq!(vencimento("2024-03-31", 1), Some(dia("2024-04-30")));
        // dia que existe no alvo passa intacto
        assert_eq!(vencimento("2024-01-15", 3), Some(dia("2024-04-15")));
    }

    #[test]
    fn data_ilegivel_da_indeterminado() {
        assert_eq!(vencimento("", 1), None);
        assert_eq!(vencimento("ontem", 1), None);
        assert_eq!(vencimento("2024-13-40", 1), None);
        assert_eq!(vencimentos("sem data"), [None; 6]);
    }

    #[test]
    fn vencida_e_estrita_no_dia() {
        let hoje = dia("2024-06-15");
        assert!(esta_vencida(dia("2024-06-14"), hoje));
        // vence hoje: ainda não está vencida
        assert!(!esta_vencida(dia("2024-06-15"), hoje));
        assert!(!esta_vencida(dia("2024-06-16"), hoje));
    }

    #[test]
    fn marcar_atrasadas_poupa_as_pagas() {
        // venda em 10/01: parcelas vencem 10/02, 10/03, ... 10/07
        let antes = [Pago, Pendente, Atrasado, Pendente, Pendente, Pendente];
        let depois = marcar_atrasadas(&antes, "2024-01-10", dia("2024-04-15"));
        // vencidas: parcelas 1..=3 (10/02, 10/03, 10/04); a 1ª está paga
        assert_eq!(
            depois,
            [Pago, Atrasado, Atrasado, Pendente, Pendente, Pendente]
        );
    }

    #[test]
    fn marcar_atrasadas_sem_data_nao_muda_nada() {
        let antes = [Pendente, Pago, Pendente, Pendente, Atrasado, Pendente];
        assert_eq!(marcar_atrasadas(&antes, "???", dia("2030-01-01")), antes);
    }

    #[test]
    fn ciclo_de_status() {
        assert_eq!(Pendente.proximo(), Pago);
        assert_eq!(Pago.proximo(), Atrasado);
        assert_eq!(Atrasado.proximo(), Pendente);
        // três passos voltam ao início
        assert_eq!(Pendente.proximo().proximo().proximo(), Pendente);
    }
}
