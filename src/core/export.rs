// src/core/export.rs
//
// Achata vendas + figuras derivadas nas linhas planas do export. A
// codificação de arquivo fica toda aqui também: CSV com toda célula
// entre aspas (vírgula no nome de cliente não quebra nada) e BOM para o
// Excel abrir acentuação direito.

use serde::Serialize;

use crate::models::venda::Venda;

/// Colunas do export, na ordem em que saem no arquivo.
const CABECALHO: [&str; 18] = [
    "consultorName",
    "cliente",
    "produto",
    "data",
    "seguro",
    "cotas",
    "valorUnit",
    "credito",
    "baseComissao",
    "valorVenda",
    "taxaPct",
    "comissaoTotal",
    "p1",
    "p2",
    "p3",
    "p4",
    "p5",
    "p6",
];

/// Uma venda achatada para export: campos do registro + derivados já
/// calculados, cada parcela em sua coluna.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinhaExport {
    pub consultor_name: String,
    pub cliente: String,
    pub produto: String,
    pub data: String,
    pub seguro: String,
    pub cotas: i64,
    pub valor_unit: f64,
    pub credito: f64,
    pub base_comissao: String,
    pub valor_venda: f64,
    pub taxa_pct: f64,
    pub comissao_total: f64,
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub p4: String,
    pub p5: String,
    pub p6: String,
}

/// Achata o conjunto (já filtrado) nas linhas de export.
pub fn linhas_export(vendas: &[Venda]) -> Vec<LinhaExport> {
    vendas
        .iter()
        .map(|v| {
            let d = v.derivados();
            let p = v.parcelas;
            LinhaExport {
                consultor_name: v.consultor_name.clone(),
                cliente: v.cliente.clone(),
                produto: v.produto.clone(),
                data: v.data.clone(),
                seguro: v.seguro.as_str().to_string(),
                cotas: v.cotas,
                valor_unit: v.valor_unit,
                credito: d.credito,
                base_comissao: v.base_comissao.as_str().to_string(),
                valor_venda: v.valor_venda,
                taxa_pct: v.taxa_pct,
                comissao_total: d.comissao_total,
                p1: p[0].as_str().to_string(),
                p2: p[1].as_str().to_string(),
                p3: p[2].as_str().to_string(),
                p4: p[3].as_str().to_string(),
                p5: p[4].as_str().to_string(),
                p6: p[5].as_str().to_string(),
            }
        })
        .collect()
}

// sempre entre aspas para vírgula não quebrar a linha
fn celula_csv(valor: &str) -> String {
    format!("\"{}\"", valor.replace('"', "\"\""))
}

/// Gera o texto CSV completo (cabeçalho + linhas), com BOM UTF-8.
pub fn gerar_csv(vendas: &[Venda]) -> String {
    let mut linhas = vec![CABECALHO.join(",")];

    for l in linhas_export(vendas) {
        let campos = [
            l.consultor_name,
            l.cliente,
            l.produto,
            l.data,
            l.seguro,
            l.cotas.to_string(),
            l.valor_unit.to_string(),
            l.credito.to_string(),
            l.base_comissao,
            l.valor_venda.to_string(),
            l.taxa_pct.to_string(),
            l.comissao_total.to_string(),
            l.p1,
            l.p2,
            l.p3,
            l.p4,
            l.p5,
            l.p6,
        ];
        let linha: Vec<String> = campos.iter().map(|c| celula_csv(c)).collect();
        linhas.push(linha.join(","));
    }

    format!("\u{feff}{}", linhas.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::venda::{BaseComissao, ParcelaStatus, Seguro};
    use chrono::Utc;
    use uuid::Uuid;

    fn venda_exemplo() -> Venda {
        use ParcelaStatus::*;
        let agora = Utc::now();
        Venda {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            consultor_name: "Ana".to_string(),
            cliente: "Souza, Maria \"Mia\"".to_string(),
            produto: "Consórcio Imóvel".to_string(),
            data: "2024-05-10".to_string(),
            seguro: Seguro::Sim,
            cotas: 10,
            valor_unit: 200_000.0,
            valor_venda: 0.0,
            base_comissao: BaseComissao::Credito,
            taxa_pct: 5.0,
            parcelas: [Pago, Pago, Pendente, Pendente, Atrasado, Pendente],
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn achata_com_derivados_calculados() {
        let linhas = linhas_export(&[venda_exemplo()]);
        assert_eq!(linhas.len(), 1);
        let l = &linhas[0];
        assert_eq!(l.credito, 1_500_000.0);
        assert_eq!(l.comissao_total, 75_000.0);
        assert_eq!(l.seguro, "Sim");
        assert_eq!(l.base_comissao, "credito");
        assert_eq!((l.p1.as_str(), l.p5.as_str()), ("Pago", "Atrasado"));
    }

    #[test]
    fn csv_tem_bom_cabecalho_e_celulas_citadas() {
        let csv = gerar_csv(&[venda_exemplo()]);
        assert!(csv.starts_with('\u{feff}'));

        let mut linhas = csv.trim_start_matches('\u{feff}').lines();
        let cabecalho = linhas.next().unwrap();
        assert!(cabecalho.starts_with("consultorName,cliente,produto"));
        assert!(cabecalho.ends_with("p1,p2,p3,p4,p5,p6"));

        let linha = linhas.next().unwrap();
        // vírgula e aspas no nome do cliente ficam seguras dentro da célula
        assert!(linha.contains("\"Souza, Maria \"\"Mia\"\"\""));
        assert!(linha.contains("\"1500000\""));
        assert!(linha.contains("\"75000\""));
        assert!(linhas.next().is_none());
    }

    #[test]
    fn export_vazio_so_tem_cabecalho() {
        let csv = gerar_csv(&[]);
        assert_eq!(csv.trim_start_matches('\u{feff}').lines().count(), 1);
    }
}
