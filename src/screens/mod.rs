// src/screens/mod.rs
//
// Estado de cada tela e as ações que o usuário dispara nela. As telas não
// desenham nada: devolvem um `Outcome` (navegação + alertas) para quem renderiza.

use std::future::Future;

use crate::{
    common::error::AppError,
    models::pagination::{Page, PagedList},
};

pub mod dashboard;
pub mod doctors;
pub mod hospitals;
pub mod login;
pub mod navigation;
pub mod productions;
pub mod register;
pub mod repasses;

pub use navigation::{Navigator, Route, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Alerta bloqueante mostrado ao usuário.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Erro".to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Sucesso".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub transition: Option<Transition>,
    pub notifications: Vec<Notification>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            transition: Some(Transition::Navigate(route)),
            ..Default::default()
        }
    }

    pub fn reset(route: Route) -> Self {
        Self {
            transition: Some(Transition::Reset(route)),
            ..Default::default()
        }
    }

    pub fn back() -> Self {
        Self {
            transition: Some(Transition::Back),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::none().notify(Notification::error(message))
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::none().notify(Notification::success(message))
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    pub fn merge(mut self, other: Outcome) -> Self {
        if other.transition.is_some() {
            self.transition = other.transition;
        }
        self.notifications.extend(other.notifications);
        self
    }

    pub fn has_error(&self) -> bool {
        self.notifications
            .iter()
            .any(|n| n.kind == NotificationKind::Error)
    }
}

/// Lista paginada com rolagem incremental, compartilhada pelas telas de listagem.
#[derive(Debug)]
pub struct ListState<T> {
    pub list: PagedList<T>,
    pub loading: bool,
    pub loading_more: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            list: PagedList::new(),
            loading: false,
            loading_more: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        self.list.items()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.list.items().get(index)
    }

    /// Busca `page` e aplica na lista. Em caso de erro a lista fica como estava.
    pub async fn fetch<F, Fut>(&mut self, page: u32, fetch: F, error_message: &str) -> Outcome
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, AppError>>,
    {
        if page <= 1 {
            self.loading = true;
        } else {
            self.loading_more = true;
        }

        let result = fetch(page).await;

        self.loading = false;
        self.loading_more = false;

        match result {
            Ok(page) => {
                self.list.apply(page);
                Outcome::none()
            }
            Err(err) => {
                tracing::error!("{}: {}", error_message, err);
                Outcome::error(err.user_message(error_message))
            }
        }
    }

    /// Próxima página, se houver e se nada estiver carregando.
    pub fn next_page(&self) -> Option<u32> {
        if self.loading || self.loading_more {
            return None;
        }
        self.list.next_page()
    }
}
