// src/models/production.rs

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::common::error::{AppError, FieldErrors};
use crate::models::wire;

// --- Tipo de produção ---
//
// A API antiga manda "plantao"/"consulta", a atual "shift"/"consultation".
// Normalizamos na leitura e sempre enviamos a grafia em inglês.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductionType {
    Shift,        // Plantão
    Consultation, // Consulta
    Other(String),
}

impl ProductionType {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "shift" | "plantao" | "plantão" => ProductionType::Shift,
            "consultation" | "consulta" => ProductionType::Consultation,
            _ => ProductionType::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductionType::Shift => "shift",
            ProductionType::Consultation => "consultation",
            ProductionType::Other(raw) => raw,
        }
    }

    /// Opções do seletor do formulário.
    pub fn choices() -> [ProductionType; 2] {
        [ProductionType::Shift, ProductionType::Consultation]
    }
}

impl From<String> for ProductionType {
    fn from(raw: String) -> Self {
        ProductionType::parse(&raw)
    }
}

impl From<ProductionType> for String {
    fn from(kind: ProductionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ProductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub hospital_id: Uuid,
    // Tipo ou data ausentes não derrubam a lista inteira
    #[serde(rename = "type", default, deserialize_with = "optional_kind")]
    pub kind: Option<ProductionType>,
    #[serde(default, deserialize_with = "wire::optional_calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn optional_kind<'de, D>(deserializer: D) -> Result<Option<ProductionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Some(ProductionType::parse(&raw)),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProductionDto {
    pub doctor_id: Uuid,
    pub hospital_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ProductionType,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// --- Formulário de cadastro ---

static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("regex de data válida"));

// Campo vazio fica por conta do `length`, aqui só o formato
fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if !DATE_FORMAT.is_match(value) {
        let mut err = ValidationError::new("date_format");
        err.message = Some("Formato inválido (AAAA-MM-DD)".into());
        return Err(err);
    }
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        let mut err = ValidationError::new("date_value");
        err.message = Some("Data inválida".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Validate)]
pub struct ProductionForm {
    #[validate(required(message = "Médico é obrigatório"))]
    pub doctor_id: Option<Uuid>,
    #[validate(required(message = "Hospital é obrigatório"))]
    pub hospital_id: Option<Uuid>,
    #[validate(required(message = "Tipo é obrigatório"))]
    pub kind: Option<ProductionType>,
    #[validate(
        length(min = 1, message = "Data é obrigatória"),
        custom(function = "validate_iso_date")
    )]
    pub date: String,
    pub description: String,
}

impl ProductionForm {
    /// Formulário novo com a data de hoje preenchida.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            doctor_id: None,
            hospital_id: None,
            kind: None,
            date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
        }
    }

    /// Valida e monta o corpo do POST. Nada é enviado se houver erro.
    pub fn to_dto(&self) -> Result<CreateProductionDto, AppError> {
        self.validate()?;

        let (Some(doctor_id), Some(hospital_id), Some(kind)) =
            (self.doctor_id, self.hospital_id, self.kind.clone())
        else {
            return Err(AppError::Validation(FieldErrors::new()));
        };
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.insert("date", "Data inválida");
            AppError::Validation(errors)
        })?;

        let description = self.description.trim();
        Ok(CreateProductionDto {
            doctor_id,
            hospital_id,
            kind,
            date,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}
