// src/screens/register.rs

use validator::Validate;

use crate::{
    common::error::FieldErrors,
    config::AppState,
    models::auth::RegisterForm,
    screens::{Notification, Outcome, Route},
};

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub form: RegisterForm,
    pub errors: FieldErrors,
    pub loading: bool,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cria a conta. Senhas diferentes bloqueiam o envio; sucesso volta para o login
    /// sem autenticar.
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
            .sign_up(&self.form.name, &self.form.email, &self.form.password)
            .await;
        self.loading = false;

        match result {
            Ok(_) => Outcome::navigate(Route::Login)
                .notify(Notification::success("Conta criada com sucesso! Faça login.")),
            Err(err) => {
                tracing::error!("Erro no cadastro: {}", err);
                Outcome::error(err.user_message("Falha ao cadastrar. Tente novamente."))
            }
        }
    }

    pub fn back(&self) -> Outcome {
        Outcome::back()
    }
}
