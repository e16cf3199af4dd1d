// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;

use crate::{
    api::{ApiClient, SessionContext},
    services::{AuthService, DoctorService, HospitalService, ProductionService, RepasseService},
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
// Quantidade buscada para os seletores e para os mapas id -> nome
pub const DEFAULT_LOOKUP_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub page_size: u32,
    pub lookup_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            lookup_page_size: DEFAULT_LOOKUP_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Lê o ambiente (carregando o `.env` se existir).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado do `from_env` para poder testar sem mexer no ambiente do processo
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup("API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let page_size = parse_size(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let lookup_page_size = parse_size(&lookup, "LOOKUP_PAGE_SIZE", DEFAULT_LOOKUP_PAGE_SIZE)?;

        Ok(Self {
            api_url,
            page_size,
            lookup_page_size,
        })
    }
}

fn parse_size(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u32,
) -> anyhow::Result<u32> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            let value: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("{key} deve ser um número inteiro positivo (recebido: {raw:?})"))?;
            anyhow::ensure!(value > 0, "{key} deve ser maior que zero");
            Ok(value)
        }
    }
}

// O estado compartilhado por todas as telas
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<SessionContext>,
    pub auth_service: AuthService,
    pub doctor_service: DoctorService,
    pub hospital_service: HospitalService,
    pub production_service: ProductionService,
    pub repasse_service: RepasseService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        // --- Monta o gráfico de dependências ---
        let session = Arc::new(SessionContext::new());
        let client = ApiClient::new(&config.api_url, session.clone());

        tracing::info!("API configurada em {}", client.base_url());

        Self {
            config,
            session,
            auth_service: AuthService::new(client.clone()),
            doctor_service: DoctorService::new(client.clone()),
            hospital_service: HospitalService::new(client.clone()),
            production_service: ProductionService::new(client.clone()),
            repasse_service: RepasseService::new(client),
        }
    }
}
