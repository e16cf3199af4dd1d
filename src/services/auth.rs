// src/services/auth.rs

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::auth::{AuthSession, SignInRequest, SignInResponse, SignUpRequest, SignUpResponse},
};

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST /signin. Qualquer 4xx vira `InvalidCredentials` com a mensagem do servidor.
    ///
    /// Não grava o token: isso é responsabilidade de quem chama (tela de login).
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let response: SignInResponse = self
            .client
            .post("/signin", &SignInRequest { email, password })
            .await
            .map_err(|err| match err {
                AppError::Rejected { detail, .. } | AppError::NotFound { detail, .. } => {
                    AppError::InvalidCredentials { detail }
                }
                other => other,
            })?;

        tracing::info!("✅ Login realizado para {}", response.user.email);

        Ok(AuthSession {
            token: response.access_token,
            user: response.user,
        })
    }

    /// POST /signup. Não autentica: o usuário volta para o login.
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, AppError> {
        let response: SignUpResponse = self
            .client
            .post("/signup", &SignUpRequest { name, email, password })
            .await?;

        tracing::info!("✅ Conta criada para {}", response.email);
        Ok(response)
    }

    /// Logout é só local: apaga a credencial da sessão.
    pub fn sign_out(&self) {
        self.client.session().clear();
        tracing::info!("Sessão encerrada");
    }
}
