// src/models/doctor.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, models::wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub crm: String, // registro no conselho (ex: 12345/SP)
    pub specialty: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDoctorDto {
    pub name: String,
    pub crm: String,
    pub specialty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub email: String,
}

// PUT parcial: só os campos informados vão no corpo
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDoctorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// Resultado de cada vínculo médico-hospital de uma sequência.
// Depois da primeira falha os hospitais restantes não são tentados.
#[derive(Debug)]
pub enum AssignmentOutcome {
    Linked,
    Failed(AppError),
    Skipped,
}

#[derive(Debug)]
pub struct AssignmentResult {
    pub hospital_id: Uuid,
    pub outcome: AssignmentOutcome,
}

impl AssignmentResult {
    pub fn is_linked(&self) -> bool {
        matches!(self.outcome, AssignmentOutcome::Linked)
    }
}

// --- Formulário de cadastro ---

#[derive(Debug, Clone, Default, Validate)]
pub struct DoctorForm {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "CRM é obrigatório"))]
    pub crm: String,
    #[validate(length(min = 1, message = "Especialidade é obrigatória"))]
    pub specialty: String,
    pub phone: String,
    #[validate(length(min = 1, message = "Email é obrigatório"))]
    pub email: String,
}

impl DoctorForm {
    pub fn to_dto(&self) -> CreateDoctorDto {
        CreateDoctorDto {
            name: self.name.clone(),
            crm: self.crm.clone(),
            specialty: self.specialty.clone(),
            phone: (!self.phone.trim().is_empty()).then(|| self.phone.clone()),
            email: self.email.clone(),
        }
    }
}
