// src/common/error.rs

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// Erros de formulário: campo -> primeira mensagem encontrada.
// BTreeMap para que a ordem de exibição seja estável.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{k}: {v}")).collect();
        write!(f, "{}", parts.join("; "))
    }
}

// Converte o resultado do `validator` mantendo só a primeira mensagem de cada campo,
// como o formulário exibe um erro por vez.
impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let message = field_errors
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Campo inválido".to_string());
            details.insert(field.to_string(), message);
        }
        details
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação: {0}")]
    Validation(FieldErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials { detail: Option<String> },

    // 4xx que não é 404: o servidor recusou o payload
    #[error("Requisição recusada pelo servidor ({status})")]
    Rejected { status: u16, detail: Option<String> },

    #[error("Recurso não encontrado: {path}")]
    NotFound { path: String, detail: Option<String> },

    #[error("Erro do servidor ({status})")]
    Server { status: u16, detail: Option<String> },

    #[error("Falha de rede: {0}")]
    Network(String),

    #[error("Resposta inválida do servidor: {0}")]
    Decode(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl AppError {
    /// Mensagem enviada pelo servidor (`detail`), quando houver.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::InvalidCredentials { detail }
            | AppError::Rejected { detail, .. }
            | AppError::NotFound { detail, .. }
            | AppError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Texto para o alerta exibido ao usuário: a mensagem do servidor, sem alteração,
    /// ou o texto genérico da tela.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(fields) => fields.to_string(),
            other => other
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}
