// src/screens/login.rs

use validator::Validate;

use crate::{
    common::error::FieldErrors,
    config::AppState,
    models::auth::LoginForm,
    screens::{Outcome, Route},
};

#[derive(Debug, Default)]
pub struct LoginScreen {
    pub form: LoginForm,
    pub errors: FieldErrors,
    pub loading: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entra com e-mail e senha. Em caso de sucesso grava o token na sessão
    /// e reinicia a navegação no Dashboard.
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
        let result = app
            .auth_service
            .sign_in(&self.form.email, &self.form.password)
            .await;
        self.loading = false;

        match result {
            Ok(session) => {
                app.session.set(session.token);
                self.form.password.clear();
                Outcome::reset(Route::Dashboard {
                    user: Some(session.user),
                })
            }
            Err(err) => {
                tracing::error!("Erro no login: {}", err);
                Outcome::error(err.user_message("Falha ao entrar. Tente novamente."))
            }
        }
    }

    pub fn go_to_register(&self) -> Outcome {
        Outcome::navigate(Route::Register)
    }
}
