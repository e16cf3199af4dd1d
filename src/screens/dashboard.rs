// src/screens/dashboard.rs

use crate::{
    config::AppState,
    models::auth::User,
    screens::{Outcome, Route},
};

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

/// As quatro entradas do menu, sempre as mesmas, haja dados ou não.
pub fn menu_items() -> [MenuItem; 4] {
    [
        MenuItem {
            title: "Médicos",
            description: "Gerenciar equipe médica",
            icon: "🩺",
            route: Route::Doctors,
        },
        MenuItem {
            title: "Hospitais",
            description: "Gerenciar hospitais",
            icon: "🏥",
            route: Route::Hospitals,
        },
        MenuItem {
            title: "Produções",
            description: "Acompanhar produções",
            icon: "📋",
            route: Route::Productions,
        },
        MenuItem {
            title: "Repasses",
            description: "Registros financeiros",
            icon: "💰",
            route: Route::Repasses,
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct DashboardScreen {
    pub user: Option<User>,
}

impl DashboardScreen {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn user_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Usuário")
    }

    pub fn menu(&self) -> [MenuItem; 4] {
        menu_items()
    }

    pub fn open(&self, index: usize) -> Outcome {
        menu_items()
            .into_iter()
            .nth(index)
            .map(|item| Outcome::navigate(item.route))
            .unwrap_or_default()
    }

    /// Logout local: apaga a credencial e volta ao login, sem chamar o servidor.
    pub fn logout(&self, app: &AppState) -> Outcome {
        app.auth_service.sign_out();
        Outcome::reset(Route::Login)
    }
}
