// src/screens/repasses.rs

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        error::{AppError, FieldErrors},
        formatters::{format_optional_date, format_production_type},
    },
    config::AppState,
    models::{
        doctor::Doctor,
        hospital::Hospital,
        production::Production,
        repasse::{CreateRepasseDto, Repasse, RepasseStatus},
    },
    screens::{ListState, Notification, Outcome, Route},
};

pub const UNKNOWN_PRODUCTION: &str = "Desconhecida";

/// "Plantão - 10/03/2024"
pub fn production_label(production: &Production) -> String {
    format!(
        "{} - {}",
        format_production_type(production.kind.as_ref()),
        format_optional_date(production.date)
    )
}

// =============================================================================
//  LISTA
// =============================================================================

#[derive(Debug, Default)]
pub struct RepassesScreen {
    pub repasses: ListState<Repasse>,
    pub productions: Vec<Production>,
    pub production_labels: HashMap<Uuid, String>,
    pub errors: FieldErrors,
    pub creating: bool,
}

impl RepassesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.repasses.loading = true;
        let result = tokio::try_join!(
            app.repasse_service.list(1, app.config.page_size),
            app.production_service.list(1, app.config.lookup_page_size),
        );
        self.repasses.loading = false;

        match result {
            Ok((page, productions)) => {
                self.production_labels = productions
                    .items
                    .iter()
                    .map(|p| (p.id, production_label(p)))
                    .collect();
                self.productions = productions.items;
                self.repasses.list.apply(page);
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao buscar repasses: {}", err);
                Outcome::error("Falha ao buscar repasses")
            }
        }
    }

    pub async fn load_more(&mut self, app: &AppState) -> Outcome {
        let Some(next) = self.repasses.next_page() else {
            return Outcome::none();
        };
        let size = app.config.page_size;
        self.repasses
            .fetch(next, |page| app.repasse_service.list(page, size), "Falha ao buscar repasses")
            .await
    }

    pub fn production_label(&self, production_id: Uuid) -> &str {
        self.production_labels
            .get(&production_id)
            .map_or(UNKNOWN_PRODUCTION, String::as_str)
    }

    pub fn open(&self, index: usize) -> Outcome {
        match self.repasses.get(index) {
            Some(repasse) => Outcome::navigate(Route::RepasseDetail {
                repasse_id: repasse.id,
            }),
            None => Outcome::none(),
        }
    }

    /// Lança um repasse pendente para a produção escolhida e recarrega a lista.
    pub async fn create(
        &mut self,
        app: &AppState,
        production_index: Option<usize>,
        amount: &str,
    ) -> Outcome {
        if self.creating {
            return Outcome::none();
        }
        self.errors = FieldErrors::new();

        let production_id = production_index
            .and_then(|i| self.productions.get(i))
            .map(|p| p.id);
        if production_id.is_none() {
            self.errors.insert("production_id", "Produção é obrigatória");
        }

        let amount = amount.trim().replace(',', ".");
        let parsed = if amount.is_empty() {
            self.errors.insert("amount", "Valor é obrigatório");
            None
        } else {
            match Decimal::from_str(&amount) {
                Ok(value) if value > Decimal::ZERO => Some(value),
                _ => {
                    self.errors.insert("amount", "Valor inválido");
                    None
                }
            }
        };

        let (Some(production_id), Some(amount)) = (production_id, parsed) else {
            return Outcome::none();
        };

        let dto = CreateRepasseDto {
            production_id,
            amount,
            status: Some(RepasseStatus::Pending),
        };
        self.creating = true;
        let result = app.repasse_service.create(&dto).await;
        self.creating = false;

        match result {
            Ok(_) => Outcome::success("Repasse cadastrado com sucesso!").merge(self.load(app).await),
            Err(err) => {
                tracing::error!("Erro ao cadastrar repasse: {}", err);
                Outcome::error(err.user_message("Erro ao cadastrar repasse"))
            }
        }
    }
}

// =============================================================================
//  DETALHE
// =============================================================================

#[derive(Debug)]
pub struct RepasseDetailScreen {
    pub repasse_id: Uuid,
    pub repasse: Option<Repasse>,
    pub production: Option<Production>,
    pub doctor: Option<Doctor>,
    pub hospital: Option<Hospital>,
    pub loading: bool,
}

impl RepasseDetailScreen {
    pub fn new(repasse_id: Uuid) -> Self {
        Self {
            repasse_id,
            repasse: None,
            production: None,
            doctor: None,
            hospital: None,
            loading: false,
        }
    }

    /// Repasse -> produção -> (médico, hospital). Cada passo depende do anterior.
    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.loading = true;
        let id = self.repasse_id;
        let result = async {
            let repasse = app.repasse_service.get(id).await?;
            let production = app.production_service.get(repasse.production_id).await?;
            let (doctor, hospital) = tokio::try_join!(
                app.doctor_service.get(production.doctor_id),
                app.hospital_service.get(production.hospital_id),
            )?;
            Ok::<_, AppError>((repasse, production, doctor, hospital))
        }
        .await;
        self.loading = false;

        match result {
            Ok((repasse, production, doctor, hospital)) => {
                self.repasse = Some(repasse);
                self.production = Some(production);
                self.doctor = Some(doctor);
                self.hospital = Some(hospital);
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao carregar repasse {}: {}", id, err);
                Outcome::back().notify(Notification::error("Falha ao carregar detalhes"))
            }
        }
    }

    pub fn can_consolidate(&self) -> bool {
        matches!(
            self.repasse.as_ref().map(|r| &r.status),
            Some(RepasseStatus::Pending)
        )
    }

    pub async fn consolidate(&mut self, app: &AppState) -> Outcome {
        if self.loading || !self.can_consolidate() {
            return Outcome::none();
        }
        self.loading = true;
        let result = app.repasse_service.consolidate(self.repasse_id).await;
        self.loading = false;

        match result {
            Ok(repasse) => {
                self.repasse = Some(repasse);
                Outcome::success("Repasse consolidado com sucesso!")
            }
            Err(err) => Outcome::error(err.user_message("Erro ao consolidar repasse")),
        }
    }

    pub async fn delete(&mut self, app: &AppState) -> Outcome {
        if self.loading {
            return Outcome::none();
        }
        self.loading = true;
        let result = app.repasse_service.delete(self.repasse_id).await;
        self.loading = false;

        match result {
            Ok(()) => Outcome::back().notify(Notification::success("Repasse removido com sucesso!")),
            Err(err) => Outcome::error(err.user_message("Erro ao remover repasse")),
        }
    }
}
