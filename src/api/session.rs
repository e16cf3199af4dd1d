// src/api/session.rs

use std::sync::RwLock;

/// Credencial bearer da sessão atual. Gravada no login, apagada no logout
/// e lida por toda requisição que sai do `ApiClient`.
#[derive(Debug, Default)]
pub struct SessionContext {
    token: RwLock<Option<String>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_clear() {
        let session = SessionContext::new();
        assert!(!session.is_authenticated());

        session.set("abc");
        assert_eq!(session.get().as_deref(), Some("abc"));

        session.set("def");
        assert_eq!(session.get().as_deref(), Some("def"));

        session.clear();
        assert_eq!(session.get(), None);
    }
}
