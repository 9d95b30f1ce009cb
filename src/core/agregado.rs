// src/core/agregado.rs
//
// Reduções sobre o conjunto filtrado: resumo (KPIs), ranking por
// consultor e série mensal, tudo em uma passada só. As três saídas são
// reduções independentes — uma passada ou três dá o mesmo resultado.

use std::collections::HashMap;

use crate::core::filtro::nome_consultor;
use crate::models::dashboard::{DashboardData, RankingEntry, Resumo, SerieMensalEntry};
use crate::models::venda::Venda;

/// Balde mensal: prefixo YYYY-MM de uma data ISO. Data ausente ou
/// malformada cai no balde placeholder, em vez de sumir do gráfico.
fn chave_mes(data: &str) -> String {
    let b = data.as_bytes();
    let valida = b.len() >= 7
        && b[4] == b'-'
        && b[..4].iter().all(|c| c.is_ascii_digit())
        && b[5..7].iter().all(|c| c.is_ascii_digit());
    if valida {
        data[..7].to_string()
    } else {
        "—".to_string()
    }
}

pub fn agregar(vendas: &[Venda]) -> DashboardData {
    let mut resumo = Resumo::default();

    // índices de primeira ocorrência para manter a ordem de chegada
    // estável em empates exatos do ranking
    let mut ranking: Vec<RankingEntry> = Vec::new();
    let mut indice_ranking: HashMap<String, usize> = HashMap::new();
    let mut serie: Vec<SerieMensalEntry> = Vec::new();
    let mut indice_serie: HashMap<String, usize> = HashMap::new();

    for venda in vendas {
        let d = venda.derivados();

        // Valores ponderados por parcela: parcela_valor × contagem por
        // status. Assume parcelas iguais (comissão / 6) — se um dia as
        // parcelas tiverem valores distintos, esta fórmula muda.
        let pago = d.parcela_valor * d.pago_n as f64;
        let pendente = d.parcela_valor * d.pendente_n as f64;
        let atrasado = d.parcela_valor * d.atrasado_n as f64;

        resumo.total_vendas += 1;
        resumo.comissao_total += d.comissao_total;
        resumo.pago += pago;
        resumo.pendente += pendente;
        resumo.atrasado += atrasado;
        resumo.parcelas_total += 6;
        resumo.parcelas_pago += d.pago_n;
        resumo.parcelas_pendente += d.pendente_n;
        resumo.parcelas_atrasado += d.atrasado_n;

        let consultor = nome_consultor(venda);
        let idx = match indice_ranking.get(consultor) {
            Some(&i) => i,
            None => {
                ranking.push(RankingEntry {
                    consultor: consultor.to_string(),
                    vendas: 0,
                    total: 0.0,
                    pago: 0.0,
                    pendente: 0.0,
                    atrasado: 0.0,
                });
                indice_ranking.insert(consultor.to_string(), ranking.len() - 1);
                ranking.len() - 1
            }
        };
        let entry = &mut ranking[idx];
        entry.vendas += 1;
        entry.total += d.comissao_total;
        entry.pago += pago;
        entry.pendente += pendente;
        entry.atrasado += atrasado;

        let mes = chave_mes(&venda.data);
        let idx = match indice_serie.get(&mes) {
            Some(&i) => i,
            None => {
                serie.push(SerieMensalEntry {
                    mes: mes.clone(),
                    total: 0.0,
                    pago: 0.0,
                    pendente: 0.0,
                    atrasado: 0.0,
                });
                indice_serie.insert(mes, serie.len() - 1);
                serie.len() - 1
            }
        };
        let bucket = &mut serie[idx];
        bucket.total += d.comissao_total;
        bucket.pago += pago;
        bucket.pendente += pendente;
        bucket.atrasado += atrasado;
    }

    resumo.ticket_medio = if resumo.total_vendas > 0 {
        resumo.comissao_total / resumo.total_vendas as f64
    } else {
        0.0
    };

    // pago desc, empate em total desc, empate em vendas desc; o sort é
    // estável, então empates exatos preservam a ordem de chegada
    ranking.sort_by(|a, b| {
        b.pago
            .total_cmp(&a.pago)
            .then(b.total.total_cmp(&a.total))
            .then(b.vendas.cmp(&a.vendas))
    });

    serie.sort_by(|a, b| a.mes.cmp(&b.mes));

    DashboardData {
        resumo,
        ranking,
        serie_mensal: serie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::venda::{BaseComissao, ParcelaStatus, Seguro};
    use chrono::Utc;
    use uuid::Uuid;

    fn venda(
        consultor: &str,
        data: &str,
        cotas: i64,
        valor_unit: f64,
        taxa_pct: f64,
        parcelas: [ParcelaStatus; 6],
    ) -> Venda {
        let agora = Utc::now();
        Venda {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            consultor_name: consultor.to_string(),
            cliente: "Cliente".to_string(),
            produto: "Consórcio".to_string(),
            data: data.to_string(),
            seguro: Seguro::Nao,
            cotas,
            valor_unit,
            valor_venda: 0.0,
            base_comissao: BaseComissao::Credito,
            taxa_pct,
            parcelas,
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn resumo_pondera_por_parcela() {
        use ParcelaStatus::*;
        // comissão 75.000, parcela 12.500: pago 2×, pendente 3×, atrasado 1×
        let vendas = vec![venda(
            "Ana",
            "2024-05-01",
            10,
            200_000.0,
            5.0,
            [Pago, Pago, Pendente, Pendente, Atrasado, Pendente],
        )];

        let r = agregar(&vendas).resumo;
        assert_eq!(r.total_vendas, 1);
        assert_eq!(r.comissao_total, 75_000.0);
        assert_eq!(r.pago, 25_000.0);
        assert_eq!(r.pendente, 37_500.0);
        assert_eq!(r.atrasado, 12_500.0);
        assert_eq!(r.parcelas_total, 6);
        assert_eq!(
            r.parcelas_pago + r.parcelas_pendente + r.parcelas_atrasado,
            r.parcelas_total
        );
        assert_eq!(r.ticket_medio, 75_000.0);
    }

    #[test]
    fn resumo_vazio_zera_o_ticket() {
        let r = agregar(&[]).resumo;
        assert_eq!(r.total_vendas, 0);
        assert_eq!(r.ticket_medio, 0.0);
    }

    #[test]
    fn ranking_ordena_por_pago_total_e_vendas() {
        use ParcelaStatus::*;
        let tudo_pago = [Pago; 6];
        let nada_pago = [Pendente; 6];

        let vendas = vec![
            // Ana: pago 5.000 (comissão 5.000 toda paga)
            venda("Ana", "2024-01-01", 1, 100_000.0, 5.0, tudo_pago),
            // Bruno: pago 0, total 10.000
            venda("Bruno", "2024-01-02", 2, 100_000.0, 5.0, nada_pago),
            // Carla: pago 0, total 10.000 repartido em DUAS vendas
            venda("Carla", "2024-01-03", 1, 100_000.0, 5.0, nada_pago),
            venda("Carla", "2024-01-04", 1, 100_000.0, 5.0, nada_pago),
        ];

        let ranking = agregar(&vendas).ranking;
        let nomes: Vec<_> = ranking.iter().map(|r| r.consultor.as_str()).collect();
        // Ana lidera por pago; Bruno e Carla empatam em pago (0) e total
        // (10.000), Carla desempata por número de vendas
        assert_eq!(nomes, ["Ana", "Carla", "Bruno"]);
    }

    #[test]
    fn ranking_estavel_em_empate_exato() {
        use ParcelaStatus::*;
        let parcelas = [Pago, Pendente, Pendente, Pendente, Pendente, Pendente];
        // mesmos números para os três: a ordem de chegada decide
        let vendas = vec![
            venda("Zeca", "2024-01-01", 1, 100_000.0, 5.0, parcelas),
            venda("Alice", "2024-01-02", 1, 100_000.0, 5.0, parcelas),
            venda("Mário", "2024-01-03", 1, 100_000.0, 5.0, parcelas),
        ];

        let ranking = agregar(&vendas).ranking;
        let nomes: Vec<_> = ranking.iter().map(|r| r.consultor.as_str()).collect();
        assert_eq!(nomes, ["Zeca", "Alice", "Mário"]);
    }

    #[test]
    fn serie_agrupa_por_mes_em_ordem_crescente() {
        use ParcelaStatus::*;
        let vendas = vec![
            venda("Ana", "2024-03-15", 1, 100_000.0, 5.0, [Pendente; 6]),
            venda("Ana", "2024-01-10", 1, 100_000.0, 5.0, [Pago; 6]),
            venda("Ana", "2024-03-20", 1, 100_000.0, 5.0, [Pendente; 6]),
            venda("Ana", "data ruim", 1, 100_000.0, 5.0, [Pendente; 6]),
        ];

        let serie = agregar(&vendas).serie_mensal;
        let meses: Vec<_> = serie.iter().map(|s| s.mes.as_str()).collect();
        assert_eq!(meses, ["2024-01", "2024-03", "—"]);

        let marco = &serie[1];
        assert_eq!(marco.total, 10_000.0);
        assert_eq!(marco.pendente, 10_000.0);
    }

    #[test]
    fn uma_passada_equivale_a_tres() {
        use ParcelaStatus::*;
        let vendas = vec![
            venda("Ana", "2024-01-01", 2, 100_000.0, 5.0, [Pago; 6]),
            venda("Bruno", "2024-02-01", 1, 100_000.0, 4.0, [Atrasado; 6]),
        ];

        // agregar duas vezes sobre a mesma entrada é determinístico e as
        // somas do resumo fecham com o ranking inteiro
        let a = agregar(&vendas);
        let b = agregar(&vendas);
        assert_eq!(a.resumo, b.resumo);
        assert_eq!(a.ranking, b.ranking);

        let total_ranking: f64 = a.ranking.iter().map(|r| r.total).sum();
        assert_eq!(total_ranking, a.resumo.comissao_total);
    }
}
