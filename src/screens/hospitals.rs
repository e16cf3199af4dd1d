// src/screens/hospitals.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::FieldErrors,
    config::AppState,
    models::{
        doctor::Doctor,
        finance::HospitalSummary,
        hospital::{Hospital, HospitalForm},
        production::Production,
        repasse::Repasse,
    },
    screens::{ListState, Notification, Outcome, Route},
    services::finance_service,
};

// =============================================================================
//  LISTA (rolagem infinita)
// =============================================================================

#[derive(Debug, Default)]
pub struct HospitalsScreen {
    pub hospitals: ListState<Hospital>,
}

impl HospitalsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) -> Outcome {
        let size = app.config.page_size;
        self.hospitals
            .fetch(1, |page| app.hospital_service.list(page, size), "Falha ao buscar hospitais")
            .await
    }

    /// Anexa a próxima página; para quando `page == total_pages`.
    pub async fn load_more(&mut self, app: &AppState) -> Outcome {
        let Some(next) = self.hospitals.next_page() else {
            return Outcome::none();
        };
        let size = app.config.page_size;
        self.hospitals
            .fetch(next, |page| app.hospital_service.list(page, size), "Falha ao buscar hospitais")
            .await
    }

    pub fn open(&self, index: usize) -> Outcome {
        match self.hospitals.get(index) {
            Some(hospital) => Outcome::navigate(Route::HospitalDetail {
                hospital_id: hospital.id,
            }),
            None => Outcome::none(),
        }
    }

    pub fn create(&self) -> Outcome {
        Outcome::navigate(Route::HospitalCreate)
    }
}

// =============================================================================
//  CADASTRO
// =============================================================================

#[derive(Debug, Default)]
pub struct HospitalCreateScreen {
    pub form: HospitalForm,
    pub errors: FieldErrors,
    pub loading: bool,
}

impl HospitalCreateScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, app: &AppState) -> Outcome {
        if self.loading {
            return Outcome::none();
        }

        self.errors = FieldErrors::new();
        if let Err(errors) = self.form.validate() {
            self.errors = errors.into();
            return Outcome::none();
        }

        self.loading = true;
        let result = app.hospital_service.create(&self.form.to_dto()).await;
        self.loading = false;

        match result {
            Ok(_) => Outcome::back().notify(Notification::success("Hospital cadastrado com sucesso!")),
            Err(err) => {
                tracing::error!("Erro ao cadastrar hospital: {}", err);
                Outcome::error(err.user_message("Erro ao cadastrar hospital"))
            }
        }
    }
}

// =============================================================================
//  DETALHE (com resumo financeiro)
// =============================================================================

#[derive(Debug)]
pub struct HospitalDetailScreen {
    pub hospital_id: Uuid,
    pub hospital: Option<Hospital>,
    pub doctors: Vec<Doctor>,
    pub productions: Vec<Production>,
    pub repasses: Vec<Repasse>,
    pub summary: HospitalSummary,
    pub loading: bool,
}

impl HospitalDetailScreen {
    pub fn new(hospital_id: Uuid) -> Self {
        Self {
            hospital_id,
            hospital: None,
            doctors: Vec::new(),
            productions: Vec::new(),
            repasses: Vec::new(),
            summary: HospitalSummary::default(),
            loading: false,
        }
    }

    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.loading = true;
        let id = self.hospital_id;
        let result = tokio::try_join!(
            app.hospital_service.get(id),
            app.hospital_service.doctors(id, 1, app.config.lookup_page_size),
            app.production_service.by_hospital(id),
            app.repasse_service.by_hospital(id),
        );
        self.loading = false;

        match result {
            Ok((hospital, doctors, productions, repasses)) => {
                self.summary = finance_service::summarize(&productions, &repasses);
                self.hospital = Some(hospital);
                self.doctors = doctors;
                self.productions = productions;
                self.repasses = repasses;
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao carregar hospital {}: {}", id, err);
                Outcome::error("Falha ao carregar detalhes do hospital")
            }
        }
    }

    pub fn open_doctor(&self, index: usize) -> Outcome {
        match self.doctors.get(index) {
            Some(doctor) => Outcome::navigate(Route::DoctorDetail { doctor_id: doctor.id }),
            None => Outcome::none(),
        }
    }

    pub async fn delete(&mut self, app: &AppState) -> Outcome {
        if self.loading {
            return Outcome::none();
        }
        self.loading = true;
        let result = app.hospital_service.delete(self.hospital_id).await;
        self.loading = false;

        match result {
            Ok(()) => Outcome::back().notify(Notification::success("Hospital removido com sucesso!")),
            Err(err) => Outcome::error(err.user_message("Erro ao remover hospital")),
        }
    }
}
