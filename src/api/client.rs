// src/api/client.rs

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{api::session::SessionContext, common::error::AppError};

// Cliente HTTP compartilhado por todos os serviços.
// Anexa `Authorization: Bearer <token>` enquanto houver sessão.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Arc<SessionContext>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let builder = self.request(Method::GET, path).query(query);
        let body = self.send(builder, Method::GET, path).await?;
        decode(&body)
    }

    pub async fn post<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.send(builder, Method::POST, path).await?;
        decode(&body)
    }

    /// POST sem corpo cuja resposta não interessa (ex: vínculos).
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        let builder = self.request(Method::POST, path);
        self.send(builder, Method::POST, path).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(payload);
        let body = self.send(builder, Method::PUT, path).await?;
        decode(&body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder, Method::DELETE, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<String, AppError> {
        tracing::debug!(%method, path, "➡️ requisição");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "Falha de rede");
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let err = error_for_status(status, path, &body);
        tracing::warn!(%method, path, status = status.as_u16(), "Resposta de erro: {}", err);
        Err(err)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::Decode(e.to_string()))
}

fn error_for_status(status: StatusCode, path: &str, body: &str) -> AppError {
    let detail = extract_detail(body);
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound {
            path: path.to_string(),
            detail,
        },
        s if s.is_client_error() => AppError::Rejected {
            status: s.as_u16(),
            detail,
        },
        s => AppError::Server {
            status: s.as_u16(),
            detail,
        },
    }
}

/// Mensagem de erro do corpo: `detail` (texto ou lista de erros de validação),
/// senão `error` ou `message`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let text = |v: &Value| v.as_str().map(str::trim).filter(|s| !s.is_empty()).map(String::from);

    match value.get("detail") {
        Some(detail @ Value::String(_)) => return text(detail),
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(text))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("error")
        .and_then(text)
        .or_else(|| value.get("message").and_then(text))
}
