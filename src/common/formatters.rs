// src/common/formatters.rs

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::production::ProductionType;
use crate::models::repasse::RepasseStatus;

pub fn format_production_type(kind: Option<&ProductionType>) -> String {
    match kind {
        None => "-".to_string(),
        Some(ProductionType::Shift) => "Plantão".to_string(),
        Some(ProductionType::Consultation) => "Consulta".to_string(),
        Some(ProductionType::Other(raw)) => capitalize(raw),
    }
}

pub fn format_repasse_status(status: Option<&RepasseStatus>) -> String {
    match status {
        None => "-".to_string(),
        Some(RepasseStatus::Pending) => "Pendente".to_string(),
        Some(RepasseStatus::Consolidated) => "Consolidado".to_string(),
        // "pago" não faz parte do ciclo de vida, mas aparece em servidores antigos
        Some(RepasseStatus::Other(raw)) if raw == "paid" || raw == "pago" => "Pago".to_string(),
        Some(RepasseStatus::Other(raw)) => raw.clone(),
    }
}

/// Formata em Real (pt-BR): `R$ 1.234,50`, negativos como `-R$ 10,00`.
pub fn format_currency(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "R$ 0,00".to_string();
    };

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    // Sempre duas casas: "1234.5" -> "1234.50"
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), format_date)
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => "-".to_string(),
    }
}
