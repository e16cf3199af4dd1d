// src/models/repasse.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::wire;

// --- Status do repasse ---
//
// Duas grafias convivem na API: "pending"/"consolidated" e "pendente"/"consolidado".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepasseStatus {
    Pending,
    Consolidated,
    Other(String),
}

impl RepasseStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "pending" | "pendente" => RepasseStatus::Pending,
            "consolidated" | "consolidado" => RepasseStatus::Consolidated,
            _ => RepasseStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RepasseStatus::Pending => "pending",
            RepasseStatus::Consolidated => "consolidated",
            RepasseStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for RepasseStatus {
    fn from(raw: String) -> Self {
        RepasseStatus::parse(&raw)
    }
}

impl From<RepasseStatus> for String {
    fn from(status: RepasseStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RepasseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Repasse ---

// Formato cru recebido da API (qualquer versão)
#[derive(Debug, Deserialize)]
struct RepasseWire {
    id: Uuid,
    production_id: Uuid,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    valor: Option<Value>, // legado
    #[serde(default)]
    status: Option<String>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RepasseWire")]
pub struct Repasse {
    pub id: Uuid,
    pub production_id: Uuid,
    pub amount: Decimal,
    pub status: RepasseStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RepasseWire> for Repasse {
    fn from(raw: RepasseWire) -> Self {
        // `amount` vence; `valor` só quando `amount` não veio. Valor ilegível conta como zero.
        let source = if wire::is_blank(raw.amount.as_ref()) {
            raw.valor.as_ref()
        } else {
            raw.amount.as_ref()
        };
        let amount = source
            .and_then(wire::decimal_from_value)
            .unwrap_or(Decimal::ZERO);

        Self {
            id: raw.id,
            production_id: raw.production_id,
            amount,
            status: RepasseStatus::parse(raw.status.as_deref().unwrap_or_default()),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRepasseDto {
    pub production_id: Uuid,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RepasseStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateRepasseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RepasseStatus>,
}

// --- Estatísticas por médico (agregadas no servidor) ---

#[derive(Debug, Deserialize)]
struct RepasseStatsWire {
    #[serde(default)]
    doctor_id: Option<Uuid>,

    #[serde(default)]
    period_start: Option<String>,
    #[serde(default)]
    period_end: Option<String>,
    #[serde(default)]
    total_pending_count: Option<u64>,
    #[serde(default)]
    total_pending_value: Option<Value>,
    #[serde(default)]
    total_consolidated_count: Option<u64>,
    #[serde(default)]
    total_consolidated_value: Option<Value>,

    // Campos legados em português
    #[serde(default)]
    periodo_inicio: Option<String>,
    #[serde(default)]
    periodo_fim: Option<String>,
    #[serde(default)]
    total_pendente_qtd: Option<u64>,
    #[serde(default)]
    total_pendente_valor: Option<Value>,
    #[serde(default)]
    total_consolidado_qtd: Option<u64>,
    #[serde(default)]
    total_consolidado_valor: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RepasseStatsWire")]
pub struct RepasseStats {
    pub doctor_id: Option<Uuid>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub pending_count: u64,
    pub pending_value: Decimal,
    pub consolidated_count: u64,
    pub consolidated_value: Decimal,
}

fn first_value(current: Option<Value>, legacy: Option<Value>) -> Decimal {
    let chosen = if wire::is_blank(current.as_ref()) { legacy } else { current };
    chosen
        .as_ref()
        .and_then(wire::decimal_from_value)
        .unwrap_or(Decimal::ZERO)
}

fn first_date(current: Option<String>, legacy: Option<String>) -> Option<NaiveDate> {
    current
        .or(legacy)
        .and_then(|raw| wire::parse_calendar_date(&raw))
}

impl From<RepasseStatsWire> for RepasseStats {
    fn from(raw: RepasseStatsWire) -> Self {
        Self {
            doctor_id: raw.doctor_id,
            period_start: first_date(raw.period_start, raw.periodo_inicio),
            period_end: first_date(raw.period_end, raw.periodo_fim),
            pending_count: raw.total_pending_count.or(raw.total_pendente_qtd).unwrap_or(0),
            pending_value: first_value(raw.total_pending_value, raw.total_pendente_valor),
            consolidated_count: raw
                .total_consolidated_count
                .or(raw.total_consolidado_qtd)
                .unwrap_or(0),
            consolidated_value: first_value(
                raw.total_consolidated_value,
                raw.total_consolidado_valor,
            ),
        }
    }
}
