// src/screens/doctors.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::FieldErrors,
    config::AppState,
    models::{
        doctor::{AssignmentResult, Doctor, DoctorForm, UpdateDoctorDto},
        hospital::Hospital,
        production::Production,
        repasse::RepasseStats,
    },
    screens::{ListState, Notification, Outcome, Route},
};

// =============================================================================
//  LISTA
// =============================================================================

#[derive(Debug, Default)]
pub struct DoctorsScreen {
    pub doctors: ListState<Doctor>,
}

impl DoctorsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) -> Outcome {
        let size = app.config.page_size;
        self.doctors
            .fetch(1, |page| app.doctor_service.list(page, size), "Falha ao buscar médicos")
            .await
    }

    pub async fn load_more(&mut self, app: &AppState) -> Outcome {
        let Some(next) = self.doctors.next_page() else {
            return Outcome::none();
        };
        let size = app.config.page_size;
        self.doctors
            .fetch(next, |page| app.doctor_service.list(page, size), "Falha ao buscar médicos")
            .await
    }

    pub fn open(&self, index: usize) -> Outcome {
        match self.doctors.get(index) {
            Some(doctor) => Outcome::navigate(Route::DoctorDetail { doctor_id: doctor.id }),
            None => Outcome::none(),
        }
    }

    pub fn create(&self) -> Outcome {
        Outcome::navigate(Route::DoctorCreate)
    }
}

// =============================================================================
//  CADASTRO (+ vínculo com hospitais)
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoctorCreateStep {
    #[default]
    Create,
    Assign,
}

#[derive(Debug, Default)]
pub struct DoctorCreateScreen {
    pub step: DoctorCreateStep,
    pub form: DoctorForm,
    pub errors: FieldErrors,
    pub loading: bool,
    pub created: Option<Doctor>,

    pub hospitals: Vec<Hospital>,
    pub hospitals_loading: bool,
    // Na ordem em que foram marcados; é a ordem dos vínculos
    pub selected: Vec<Uuid>,
    pub last_assignment: Vec<AssignmentResult>,
}

impl DoctorCreateScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passo 1: cadastra o médico e passa para a escolha de hospitais.
    pub async fn submit(&mut self, app: &AppState) -> Outcome {
        if self.loading || self.step != DoctorCreateStep::Create {
            return Outcome::none();
        }

        self.errors = FieldErrors::new();
        if let Err(errors) = self.form.validate() {
            self.errors = errors.into();
            return Outcome::none();
        }

        self.loading = true;
        let result = app.doctor_service.create(&self.form.to_dto()).await;
        self.loading = false;

        match result {
            Ok(doctor) => {
                self.created = Some(doctor);
                self.step = DoctorCreateStep::Assign;
                Outcome::success("Médico cadastrado com sucesso! Agora você pode vinculá-lo a hospitais.")
                    .merge(self.load_hospitals(app).await)
            }
            Err(err) => {
                tracing::error!("Erro ao cadastrar médico: {}", err);
                Outcome::error(err.user_message("Erro ao cadastrar médico"))
            }
        }
    }

    pub async fn load_hospitals(&mut self, app: &AppState) -> Outcome {
        self.hospitals_loading = true;
        let result = app
            .hospital_service
            .list(1, app.config.lookup_page_size)
            .await;
        self.hospitals_loading = false;

        match result {
            Ok(page) => {
                self.hospitals = page.items;
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao buscar hospitais: {}", err);
                Outcome::error("Falha ao buscar hospitais")
            }
        }
    }

    pub fn toggle_hospital(&mut self, hospital_id: Uuid) {
        if let Some(pos) = self.selected.iter().position(|id| *id == hospital_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(hospital_id);
        }
    }

    pub fn is_selected(&self, hospital_id: Uuid) -> bool {
        self.selected.contains(&hospital_id)
    }

    /// Passo 2: cria os vínculos um a um. Sem seleção, apenas volta.
    /// Uma falha no meio mantém os vínculos já criados e fica na tela.
    pub async fn finish(&mut self, app: &AppState) -> Outcome {
        let Some(doctor_id) = self.created.as_ref().map(|d| d.id) else {
            return Outcome::none();
        };
        if self.loading {
            return Outcome::none();
        }
        if self.selected.is_empty() {
            return Outcome::back();
        }

        self.loading = true;
        let results = app
            .doctor_service
            .assign_to_hospitals(doctor_id, &self.selected)
            .await;
        self.loading = false;

        let all_linked = results.iter().all(AssignmentResult::is_linked);
        self.last_assignment = results;

        if all_linked {
            Outcome::back().notify(Notification::success("Vínculos criados com sucesso!"))
        } else {
            Outcome::error("Falha ao vincular com alguns hospitais")
        }
    }

    pub fn skip(&self) -> Outcome {
        Outcome::back()
    }
}

// =============================================================================
//  DETALHE
// =============================================================================

#[derive(Debug)]
pub struct DoctorDetailScreen {
    pub doctor_id: Uuid,
    pub doctor: Option<Doctor>,
    pub productions: Vec<Production>,
    pub stats: Option<RepasseStats>,
    pub loading: bool,
}

impl DoctorDetailScreen {
    pub fn new(doctor_id: Uuid) -> Self {
        Self {
            doctor_id,
            doctor: None,
            productions: Vec::new(),
            stats: None,
            loading: false,
        }
    }

    /// Médico, produções e estatísticas em paralelo; qualquer falha derruba as três.
    pub async fn load(&mut self, app: &AppState) -> Outcome {
        self.loading = true;
        let result = tokio::try_join!(
            app.doctor_service.get(self.doctor_id),
            app.production_service.by_doctor(self.doctor_id),
            app.repasse_service.stats(self.doctor_id),
        );
        self.loading = false;

        match result {
            Ok((doctor, productions, stats)) => {
                self.doctor = Some(doctor);
                self.productions = productions;
                self.stats = Some(stats);
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("Erro ao carregar médico {}: {}", self.doctor_id, err);
                Outcome::error("Falha ao carregar detalhes do médico")
            }
        }
    }

    pub async fn update(&mut self, app: &AppState, dto: &UpdateDoctorDto) -> Outcome {
        if self.loading {
            return Outcome::none();
        }
        self.loading = true;
        let result = app.doctor_service.update(self.doctor_id, dto).await;
        self.loading = false;

        match result {
            Ok(doctor) => {
                self.doctor = Some(doctor);
                Outcome::success("Médico atualizado com sucesso!")
            }
            Err(err) => Outcome::error(err.user_message("Erro ao atualizar médico")),
        }
    }

    pub async fn delete(&mut self, app: &AppState) -> Outcome {
        if self.loading {
            return Outcome::none();
        }
        self.loading = true;
        let result = app.doctor_service.delete(self.doctor_id).await;
        self.loading = false;

        match result {
            Ok(()) => Outcome::back().notify(Notification::success("Médico removido com sucesso!")),
            Err(err) => Outcome::error(err.user_message("Erro ao remover médico")),
        }
    }
}
