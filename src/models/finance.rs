// src/models/finance.rs

use rust_decimal::Decimal;
use serde::Serialize;

// Um grupo de repasses (consolidados ou pendentes): quantidade e soma
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepasseBucket {
    pub count: usize,
    pub total: Decimal,
}

// Resumo financeiro exibido no detalhe do hospital
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HospitalSummary {
    pub total_productions: usize,
    pub shift_count: usize,        // plantões
    pub consultation_count: usize, // consultas
    pub consolidated: RepasseBucket,
    pub pending: RepasseBucket,
}
