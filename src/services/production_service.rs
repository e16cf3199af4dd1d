// src/services/production_service.rs

use uuid::Uuid;

use crate::{
    api::ApiClient,
    common::{
        error::AppError,
        formatters::{format_optional_date, format_production_type},
    },
    models::{
        pagination::{Listing, Page},
        production::{CreateProductionDto, Production},
    },
};

// Os endpoints por médico/hospital usam skip/limit em vez de página
const RELATION_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ProductionService {
    client: ApiClient,
}

impl ProductionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<Production>, AppError> {
        self.client
            .get(
                "/productions/",
                &[("page", page.to_string()), ("page_size", page_size.to_string())],
            )
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Production, AppError> {
        self.client.get(&format!("/productions/{id}"), &[]).await
    }

    pub async fn create(&self, dto: &CreateProductionDto) -> Result<Production, AppError> {
        let production: Production = self.client.post("/productions/", dto).await?;
        tracing::info!(
            "✅ Produção {} registrada ({} em {})",
            production.id,
            format_production_type(production.kind.as_ref()),
            format_optional_date(production.date)
        );
        Ok(production)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.client.delete(&format!("/productions/{id}")).await?;
        tracing::info!("Produção {} removida", id);
        Ok(())
    }

    pub async fn by_doctor(&self, doctor_id: Uuid) -> Result<Vec<Production>, AppError> {
        self.related(&format!("/productions/doctor/{doctor_id}")).await
    }

    pub async fn by_hospital(&self, hospital_id: Uuid) -> Result<Vec<Production>, AppError> {
        self.related(&format!("/productions/hospital/{hospital_id}")).await
    }

    async fn related(&self, path: &str) -> Result<Vec<Production>, AppError> {
        let listing: Listing<Production> = self
            .client
            .get(path, &[("skip", "0".to_string()), ("limit", RELATION_LIMIT.to_string())])
            .await?;
        Ok(listing.into_vec())
    }
}
