// src/services/repasse_service.rs

use uuid::Uuid;

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::{
        pagination::{Listing, Page},
        repasse::{CreateRepasseDto, Repasse, RepasseStats, RepasseStatus, UpdateRepasseDto},
    },
};

#[derive(Clone)]
pub struct RepasseService {
    client: ApiClient,
}

impl RepasseService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<Repasse>, AppError> {
        self.client
            .get(
                "/repasses/",
                &[("page", page.to_string()), ("page_size", page_size.to_string())],
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Repasse, AppError> {
        self.client.get(&format!("/repasses/{id}"), &[]).await
    }

    pub async fn create(&self, dto: &CreateRepasseDto) -> Result<Repasse, AppError> {
        let repasse: Repasse = self.client.post("/repasses/", dto).await?;
        tracing::info!("✅ Repasse {} criado para a produção {}", repasse.id, repasse.production_id);
        Ok(repasse)
    }

    pub async fn update(&self, id: Uuid, dto: &UpdateRepasseDto) -> Result<Repasse, AppError> {
        let repasse: Repasse = self.client.put(&format!("/repasses/{id}"), dto).await?;
        tracing::info!("Repasse {} atualizado (status: {})", repasse.id, repasse.status);
        Ok(repasse)
    }

    /// Atalho para o PUT que muda só o status para consolidado.
    pub async fn consolidate(&self, id: Uuid) -> Result<Repasse, AppError> {
        let dto = UpdateRepasseDto {
            status: Some(RepasseStatus::Consolidated),
            ..Default::default()
        };
        self.update(id, &dto).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.client.delete(&format!("/repasses/{id}")).await?;
        tracing::info!("Repasse {} removido", id);
        Ok(())
    }

    /// Totais pendentes/consolidados do médico, já agregados pelo servidor.
    pub async fn stats(&self, doctor_id: Uuid) -> Result<RepasseStats, AppError> {
        self.client.get(&format!("/repasses/stats/{doctor_id}"), &[]).await
    }

    pub async fn by_hospital(&self, hospital_id: Uuid) -> Result<Vec<Repasse>, AppError> {
        let listing: Listing<Repasse> = self
            .client
            .get(&format!("/repasses/hospital/{hospital_id}"), &[])
            .await?;
        Ok(listing.into_vec())
    }
}
