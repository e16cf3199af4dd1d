// src/models/pagination.rs

use serde::{Deserialize, Serialize};

/// Envelope devolvido por todos os endpoints de listagem. `page` começa em 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

// Os endpoints de relacionamento ora devolvem um array, ora o envelope paginado.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Paged(page) => page.items,
        }
    }
}

/// Lista que cresce página a página (rolagem infinita).
#[derive(Debug, Clone)]
pub struct PagedList<T> {
    items: Vec<T>,
    page: u32,
    total_pages: u32,
    total: u64,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            total: 0,
        }
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Página 1 substitui o conteúdo; as demais são anexadas na ordem do servidor.
    pub fn apply(&mut self, page: Page<T>) {
        if page.page <= 1 {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.page = page.page;
        self.total_pages = page.total_pages;
        self.total = page.total;
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then_some(self.page + 1)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
