// src/services/hospital_service.rs

use uuid::Uuid;

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::{
        doctor::Doctor,
        hospital::{CreateHospitalDto, Hospital},
        pagination::{Listing, Page},
    },
};

#[derive(Clone)]
pub struct HospitalService {
    client: ApiClient,
}

impl HospitalService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<Hospital>, AppError> {
        self.client
            .get(
                "/hospitals/",
                &[("page", page.to_string()), ("page_size", page_size.to_string())],
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Hospital, AppError> {
        self.client.get(&format!("/hospitals/{id}"), &[]).await
    }

    pub async fn create(&self, dto: &CreateHospitalDto) -> Result<Hospital, AppError> {
        let hospital: Hospital = self.client.post("/hospitals/", dto).await?;
        tracing::info!("✅ Hospital {} cadastrado ({})", hospital.name, hospital.id);
        Ok(hospital)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.client.delete(&format!("/hospitals/{id}")).await?;
        tracing::info!("Hospital {} removido", id);
        Ok(())
    }

    /// Médicos vinculados ao hospital, na ordem em que o servidor devolver.
    pub async fn doctors(
        &self,
        hospital_id: Uuid,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<Doctor>, AppError> {
        let listing: Listing<Doctor> = self
            .client
            .get(
                &format!("/hospitals/{hospital_id}/doctors/"),
                &[("page", page.to_string()), ("page_size", page_size.to_string())],
            )
            .await?;
        Ok(listing.into_vec())
    }
}
