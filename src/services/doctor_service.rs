// src/services/doctor_service.rs

use uuid::Uuid;

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::{
        doctor::{
            AssignmentOutcome, AssignmentResult, CreateDoctorDto, Doctor, UpdateDoctorDto,
        },
        pagination::Page,
    },
};

#[derive(Clone)]
pub struct DoctorService {
    client: ApiClient,
}

impl DoctorService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<Doctor>, AppError> {
        self.client
            .get(
                "/doctors/",
                &[("page", page.to_string()), ("page_size", page_size.to_string())],
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Doctor, AppError> {
        self.client.get(&format!("/doctors/{id}"), &[]).await
    }

    pub async fn create(&self, dto: &CreateDoctorDto) -> Result<Doctor, AppError> {
        let doctor: Doctor = self.client.post("/doctors/", dto).await?;
        tracing::info!("✅ Médico {} cadastrado ({})", doctor.name, doctor.id);
        Ok(doctor)
    }

    pub async fn update(&self, id: Uuid, dto: &UpdateDoctorDto) -> Result<Doctor, AppError> {
        self.client.put(&format!("/doctors/{id}"), dto).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.client.delete(&format!("/doctors/{id}")).await?;
        tracing::info!("Médico {} removido", id);
        Ok(())
    }

    // A rota de vínculo não consta das definições do backend; foi inferida do uso
    pub async fn assign_to_hospital(&self, doctor_id: Uuid, hospital_id: Uuid) -> Result<(), AppError> {
        self.client
            .post_empty(&format!("/doctors/{doctor_id}/hospitals/{hospital_id}"))
            .await
    }

    /// Vincula o médico a vários hospitais, um por vez e na ordem dada.
    ///
    /// Não existe endpoint em lote nem rollback: vínculos já criados permanecem
    /// se um posterior falhar, e os seguintes ficam como `Skipped`.
    pub async fn assign_to_hospitals(
        &self,
        doctor_id: Uuid,
        hospital_ids: &[Uuid],
    ) -> Vec<AssignmentResult> {
        let mut results = Vec::with_capacity(hospital_ids.len());
        let mut failed = false;

        for &hospital_id in hospital_ids {
            let outcome = if failed {
                AssignmentOutcome::Skipped
            } else {
                match self.assign_to_hospital(doctor_id, hospital_id).await {
                    Ok(()) => {
                        tracing::info!("🔗 Médico {} vinculado ao hospital {}", doctor_id, hospital_id);
                        AssignmentOutcome::Linked
                    }
                    Err(err) => {
                        tracing::error!("🔥 Falha ao vincular hospital {}: {}", hospital_id, err);
                        failed = true;
                        AssignmentOutcome::Failed(err)
                    }
                }
            };
            results.push(AssignmentResult { hospital_id, outcome });
        }

        results
    }
}
