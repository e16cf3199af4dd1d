// src/screens/navigation.rs

use uuid::Uuid;

use crate::models::auth::User;

// As rotas do app e os parâmetros que cada uma recebe
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    Register,
    Dashboard { user: Option<User> },
    Doctors,
    DoctorCreate,
    DoctorDetail { doctor_id: Uuid },
    Hospitals,
    HospitalCreate,
    HospitalDetail { hospital_id: Uuid },
    Productions,
    ProductionCreate,
    Repasses,
    RepasseDetail { repasse_id: Uuid },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard { .. } => "Dashboard",
            Route::Doctors => "Doctors",
            Route::DoctorCreate => "DoctorCreate",
            Route::DoctorDetail { .. } => "DoctorDetail",
            Route::Hospitals => "Hospitals",
            Route::HospitalCreate => "HospitalCreate",
            Route::HospitalDetail { .. } => "HospitalDetail",
            Route::Productions => "Productions",
            Route::ProductionCreate => "ProductionCreate",
            Route::Repasses => "Repasses",
            Route::RepasseDetail { .. } => "RepasseDetail",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Navigate(Route),
    Reset(Route),
    Back,
}

/// Pilha de navegação. Começa no Login e nunca fica vazia.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::Login],
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        // a pilha sempre tem pelo menos uma rota
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn navigate(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Volta uma tela. Retorna `false` quando já está na raiz.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Navigate(route) => self.navigate(route),
            Transition::Reset(route) => self.reset(route),
            Transition::Back => {
                self.back();
            }
        }
    }
}
