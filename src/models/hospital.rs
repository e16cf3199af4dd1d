// src/models/hospital.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::wire;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[serde(default, deserialize_with = "wire::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateHospitalDto {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct HospitalForm {
    #[validate(length(min = 1, message = "Nome é obrigatório"))]
    pub name: String,
    #[validate(length(min = 1, message = "Endereço é obrigatório"))]
    pub address: String,
}

impl HospitalForm {
    pub fn to_dto(&self) -> CreateHospitalDto {
        CreateHospitalDto {
            name: self.name.clone(),
            address: self.address.clone(),
        }
    }
}
