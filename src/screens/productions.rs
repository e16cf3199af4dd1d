// src/screens/productions.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::{AppError, FieldErrors},
    config::AppState,
    models::{
        doctor::Doctor,
        hospital::Hospital,
        production::{Production, ProductionForm, ProductionType},
    },
    screens::{ListState, Notification, Outcome, Route},
};

pub const UNKNOWN_NAME: &str = "Desconhecido";

fn name_map<T>(items: &[T], key: impl Fn(&T) -> (Uuid, String)) -> HashMap<Uuid, String> {
    items.iter().map(key).collect()
}

// =============================================================================
//  LISTA
// =============================================================================

#[derive(Debug, Default)]
pub struct ProductionsScreen {
    pub productions: ListState<Production>,
    pub doctor_names: HashMap<Uuid, String>,
    pub hospital_names: HashMap<Uuid, String>,
    pub deleting: bool,
}

impl ProductionsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primeira página junto com médicos e hospitais (para mostrar os nomes).
    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.productions.loading = true;
        let lookup = app.config.lookup_page_size;
        let result = tokio::try_join!(
            app.production_service.list(1, app.config.page_size),
            app.doctor_service.list(1, lookup),
            app.hospital_service.list(1, lookup),
        );
        self.productions.loading = false;

        match result {
            Ok((page, doctors, hospitals)) => {
                self.doctor_names = name_map(&doctors.items, |d| (d.id, d.name.clone()));
                self.hospital_names = name_map(&hospitals.items, |h| (h.id, h.name.clone()));
                self.productions.list.apply(page);
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao buscar produções: {}", err);
                Outcome::error("Falha ao buscar produções")
            }
        }
    }

    pub async fn load_more(&mut self, app: &AppState) -> Outcome {
        let Some(next) = self.productions.next_page() else {
            return Outcome::none();
        };
        let size = app.config.page_size;
        self.productions
            .fetch(next, |page| app.production_service.list(page, size), "Falha ao buscar produções")
            .await
    }

    pub fn doctor_name(&self, id: Uuid) -> &str {
        self.doctor_names.get(&id).map_or(UNKNOWN_NAME, String::as_str)
    }

    pub fn hospital_name(&self, id: Uuid) -> &str {
        self.hospital_names.get(&id).map_or(UNKNOWN_NAME, String::as_str)
    }

    pub fn create(&self) -> Outcome {
        Outcome::navigate(Route::ProductionCreate)
    }

    /// Remove a produção da posição `index` e recarrega a lista.
    pub async fn delete(&mut self, app: &AppState, index: usize) -> Outcome {
        if self.deleting {
            return Outcome::none();
        }
        let Some(id) = self.productions.get(index).map(|p| p.id) else {
            return Outcome::none();
        };

        self.deleting = true;
        let result = app.production_service.delete(id).await;
        self.deleting = false;

        match result {
            Ok(()) => Outcome::success("Produção removida com sucesso!").merge(self.load(app).await),
            Err(err) => Outcome::error(err.user_message("Erro ao remover produção")),
        }
    }
}

// =============================================================================
//  CADASTRO
// =============================================================================

#[derive(Debug)]
pub struct ProductionCreateScreen {
    pub form: ProductionForm,
    pub errors: FieldErrors,
    pub doctors: Vec<Doctor>,
    pub hospitals: Vec<Hospital>,
    pub loading: bool,
    pub initial_loading: bool,
}

impl ProductionCreateScreen {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: ProductionForm::new(today),
            errors: FieldErrors::new(),
            doctors: Vec::new(),
            hospitals: Vec::new(),
            loading: false,
            initial_loading: false,
        }
    }

    /// Carrega as opções dos seletores de médico e hospital.
    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.initial_loading = true;
        let lookup = app.config.lookup_page_size;
        let result = tokio::try_join!(
            app.doctor_service.list(1, lookup),
            app.hospital_service.list(1, lookup),
        );
        self.initial_loading = false;

        match result {
            Ok((doctors, hospitals)) => {
                self.doctors = doctors.items;
                self.hospitals = hospitals.items;
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao carregar médicos/hospitais: {}", err);
                Outcome::error("Falha ao carregar dados iniciais")
            }
        }
    }

    pub fn select_doctor(&mut self, index: usize) -> bool {
        let picked = self.doctors.get(index).map(|d| d.id);
        if picked.is_some() {
            self.form.doctor_id = picked;
        }
        picked.is_some()
    }

    pub fn select_hospital(&mut self, index: usize) -> bool {
        let picked = self.hospitals.get(index).map(|h| h.id);
        if picked.is_some() {
            self.form.hospital_id = picked;
        }
        picked.is_some()
    }

    pub fn select_type(&mut self, kind: ProductionType) {
        self.form.kind = Some(kind);
    }

    pub async fn submit(&mut self, app: &AppState) -> Outcome {
        if self.loading {
            return Outcome::none();
        }

        self.errors = FieldErrors::new();
        let dto = match self.form.to_dto() {
            Ok(dto) => dto,
            Err(AppError::Validation(errors)) => {
                self.errors = errors;
                return Outcome::none();
            }
            Err(err) => return Outcome::error(err.user_message("Erro ao cadastrar produção")),
        };

        self.loading = true;
        let result = app.production_service.create(&dto).await;
        self.loading = false;

        match result {
            Ok(_) => Outcome::back().notify(Notification::success("Produção cadastrada com sucesso!")),
            Err(err) => {
                tracing::error!("Erro ao cadastrar produção: {}", err);
                Outcome::error(err.user_message("Erro ao cadastrar produção"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_fall_back_to_placeholder() {
        let known = Uuid::new_v4();
        let mut screen = ProductionsScreen::new();
        screen.doctor_names.insert(known, "Dra. Ana".into());

        assert_eq!(screen.doctor_name(known), "Dra. Ana");
        assert_eq!(screen.doctor_name(Uuid::new_v4()), UNKNOWN_NAME);
        assert_eq!(screen.hospital_name(known), UNKNOWN_NAME);
    }

    #[test]
    fn selecting_out_of_range_keeps_form() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut screen = ProductionCreateScreen::new(today);
        assert_eq!(screen.form.date, "2024-03-10");
        assert!(!screen.select_doctor(0));
        assert!(screen.form.doctor_id.is_none());
    }
}
