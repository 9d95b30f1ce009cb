// src/core/filtro.rs
//
// Filtro declarativo sobre a coleção de vendas. O motor não conhece
// identidade nem papel: o escopo por consultor logado é imposto pelos
// serviços antes de chegar aqui.

use crate::models::venda::{FiltroVendas, Venda};

/// Nome de exibição do consultor; vendas sem nome caem no placeholder,
/// o mesmo usado pelo ranking e pelo filtro por consultor.
pub fn nome_consultor(venda: &Venda) -> &str {
    if venda.consultor_name.is_empty() {
        "—"
    } else {
        &venda.consultor_name
    }
}

/// Aplica a especificação sobre as vendas: predicados combinados com E,
/// campo vazio = sem restrição. Não muta a entrada e preserva a ordem
/// relativa original.
pub fn filtrar(vendas: &[Venda], filtro: &FiltroVendas) -> Vec<Venda> {
    let q = filtro.q.as_deref().unwrap_or("").trim().to_lowercase();
    let consultor = filtro.consultor.as_deref().unwrap_or("");
    let status = filtro.status.as_deref().unwrap_or("");
    let from = filtro.from.as_deref().unwrap_or("");
    let to = filtro.to.as_deref().unwrap_or("");

    vendas
        .iter()
        .filter(|v| {
            if !consultor.is_empty() && nome_consultor(v) != consultor {
                return false;
            }
            // match existencial: basta UMA parcela com o status pedido
            if !status.is_empty() && !v.parcelas.iter().any(|p| p.as_str() == status) {
                return false;
            }
            // datas ISO: comparação lexicográfica == cronológica, inclusiva
            if !from.is_empty() && v.data.as_str() < from {
                return false;
            }
            if !to.is_empty() && v.data.as_str() > to {
                return false;
            }
            if !q.is_empty() {
                let alvo = format!(
                    "{} {} {} {}",
                    v.consultor_name, v.cliente, v.produto, v.data
                )
                .to_lowercase();
                if !alvo.contains(&q) {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}
