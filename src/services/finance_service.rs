// src/services/finance_service.rs

use crate::models::{
    finance::{HospitalSummary, RepasseBucket},
    production::{Production, ProductionType},
    repasse::{Repasse, RepasseStatus},
};

/// Resume as produções e os repasses de um hospital.
///
/// Tipos e status desconhecidos não entram em nenhum contador, mas as
/// produções continuam contando no total.
pub fn summarize(productions: &[Production], repasses: &[Repasse]) -> HospitalSummary {
    let mut summary = HospitalSummary {
        total_productions: productions.len(),
        ..Default::default()
    };

    for production in productions {
        match production.kind {
            Some(ProductionType::Shift) => summary.shift_count += 1,
            Some(ProductionType::Consultation) => summary.consultation_count += 1,
            Some(ProductionType::Other(_)) | None => {}
        }
    }

    for repasse in repasses {
        let bucket: &mut RepasseBucket = match repasse.status {
            RepasseStatus::Consolidated => &mut summary.consolidated,
            RepasseStatus::Pending => &mut summary.pending,
            RepasseStatus::Other(_) => continue,
        };
        bucket.count += 1;
        bucket.total += repasse.amount;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    fn production(kind: &str) -> Production {
        Production {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            hospital_id: Uuid::new_v4(),
            kind: Some(ProductionType::parse(kind)),
            date: NaiveDate::from_ymd_opt(2026, 2, 1),
            description: None,
            created_at: None,
        }
    }

    fn repasse(status: &str, amount: &str) -> Repasse {
        Repasse {
            id: Uuid::new_v4(),
            production_id: Uuid::new_v4(),
            amount: Decimal::from_str(amount).unwrap(),
            status: RepasseStatus::parse(status),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_inputs_give_zeroes() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary, HospitalSummary::default());
        assert_eq!(summary.consolidated.total, Decimal::ZERO);
    }

    #[test]
    fn counts_types_in_both_spellings() {
        let productions = [
            production("shift"),
            production("plantao"),
            production("CONSULTA"),
            production("cirurgia"),
        ];
        let summary = summarize(&productions, &[]);
        assert_eq!(summary.total_productions, 4);
        assert_eq!(summary.shift_count, 2);
        assert_eq!(summary.consultation_count, 1);
        assert!(summary.shift_count + summary.consultation_count <= productions.len());
    }

    #[test]
    fn sums_each_status_independently() {
        let repasses = [
            repasse("consolidated", "100.50"),
            repasse("consolidado", "49.50"),
            repasse("pending", "10"),
            repasse("PENDENTE", "0.25"),
            repasse("pago", "999"),
        ];
        let summary = summarize(&[], &repasses);

        assert_eq!(summary.consolidated.count, 2);
        assert_eq!(summary.consolidated.total, Decimal::from(150));
        assert_eq!(summary.pending.count, 2);
        assert_eq!(summary.pending.total, Decimal::from_str("10.25").unwrap());
        assert!(summary.consolidated.count + summary.pending.count <= repasses.len());
    }
}
