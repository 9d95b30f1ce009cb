// src/core/numerico.rs
//
// Conversão numérica total: nenhuma entrada do formulário derruba o
// cálculo. O que não dá para interpretar vira 0, de propósito — o
// consultor digita "1.234,56" pela metade o tempo todo.

use serde_json::Value;

/// Teto fixo do crédito financiável (regra de negócio).
pub const LIMIT_CREDITO: f64 = 1_500_000.0;

/// Converte texto em formato brasileiro para número: "." é separador de
/// milhar (removido), "," é o separador decimal (vira ponto, só o
/// primeiro). Qualquer resultado não finito vira 0.
pub fn parse_num_str(s: &str) -> f64 {
    let limpo = s.trim().replace('.', "").replacen(',', ".", 1);
    match limpo.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Versão total sobre valores JSON: números passam direto (se finitos),
/// texto passa pelo parse brasileiro, o resto (null, bool, array...) é 0.
pub fn parse_num(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_num_str(s),
        _ => 0.0,
    }
}

/// Limita o produto bruto cotas × valor unitário ao intervalo
/// [0, LIMIT_CREDITO]. Total: `max`/`min` engolem NaN.
pub fn clamp_credito(raw: f64) -> f64 {
    raw.max(0.0).min(LIMIT_CREDITO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_formato_brasileiro() {
        assert_eq!(parse_num_str("1.234,56"), 1234.56);
        assert_eq!(parse_num_str("10,5"), 10.5);
        assert_eq!(parse_num_str("  200000  "), 200000.0);
        assert_eq!(parse_num_str("-1,5"), -1.5);
        // "." é sempre milhar, nunca decimal: "12.5" vira 125.
        assert_eq!(parse_num_str("12.5"), 125.0);
    }

    #[test]
    fn parse_e_total_sobre_lixo() {
        assert_eq!(parse_num_str(""), 0.0);
        assert_eq!(parse_num_str("abc"), 0.0);
        assert_eq!(parse_num_str("1,2,3"), 0.0);
        assert_eq!(parse_num_str("Infinity"), 0.0);
        assert_eq!(parse_num(&Value::Null), 0.0);
        assert_eq!(parse_num(&json!(true)), 0.0);
        assert_eq!(parse_num(&json!([1, 2])), 0.0);
        assert_eq!(parse_num(&json!({"x": 1})), 0.0);
    }

    #[test]
    fn parse_numero_passa_direto() {
        assert_eq!(parse_num(&json!(200000)), 200000.0);
        assert_eq!(parse_num(&json!(5.5)), 5.5);
        assert_eq!(parse_num(&json!(-3)), -3.0);
    }

    #[test]
    fn clamp_respeita_o_teto_e_o_piso() {
        assert_eq!(clamp_credito(2_000_000.0), LIMIT_CREDITO);
        assert_eq!(clamp_credito(-10.0), 0.0);
        assert_eq!(clamp_credito(0.0), 0.0);
        assert_eq!(clamp_credito(1_500_000.0), 1_500_000.0);
        assert_eq!(clamp_credito(750_000.0), 750_000.0);
    }
}
