// tests/hospitals_flow.rs

mod common;

use common::MockBackend;
use rust_decimal::Decimal;
use serde_json::json;
use seiwa::screens::{
    hospitals::{HospitalCreateScreen, HospitalDetailScreen, HospitalsScreen},
    Outcome, Route, Transition,
};
use uuid::Uuid;

#[tokio::test]
async fn detail_builds_financial_summary() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let hospital = backend.seed_hospital("Hospital São Lucas");
    let other = backend.seed_hospital("Hospital Vizinho");
    let doctor = backend.seed_doctor("Dra. Ana");
    backend.link(doctor, hospital);

    let p1 = backend.seed_production(doctor, hospital, "plantao", "2024-03-10");
    let p2 = backend.seed_production(doctor, hospital, "shift", "2024-03-11");
    let p3 = backend.seed_production(doctor, hospital, "Consulta", "2024-03-12");
    let p4 = backend.seed_production(doctor, hospital, "cirurgia", "2024-03-13");
    let elsewhere = backend.seed_production(doctor, other, "plantao", "2024-03-14");

    backend.seed_repasse(p1, "amount", json!("1500.50"), "consolidated");
    backend.seed_repasse(p2, "valor", json!(200), "consolidado");
    backend.seed_repasse(p3, "amount", json!("300"), "pendente");
    backend.seed_repasse(p4, "amount", json!(999), "paid");
    backend.seed_repasse(elsewhere, "amount", json!(5000), "pending");

    let mut screen = HospitalDetailScreen::new(hospital);
    let outcome = screen.load(&app).await;
    assert!(outcome.notifications.is_empty(), "{outcome:?}");

    let summary = screen.summary;
    assert_eq!(summary.total_productions, 4);
    assert_eq!(summary.shift_count, 2);
    assert_eq!(summary.consultation_count, 1);
    assert_eq!(summary.consolidated.count, 2);
    assert_eq!(summary.consolidated.total, Decimal::new(170050, 2));
    assert_eq!(summary.pending.count, 1);
    assert_eq!(summary.pending.total, Decimal::new(300, 0));

    assert_eq!(screen.doctors.len(), 1);
    assert_eq!(
        screen.open_doctor(0),
        Outcome::navigate(Route::DoctorDetail { doctor_id: doctor })
    );
    assert_eq!(screen.open_doctor(5), Outcome::none());
}

#[tokio::test]
async fn detail_of_missing_hospital_reports_failure() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();

    let mut screen = HospitalDetailScreen::new(Uuid::new_v4());
    let outcome = screen.load(&app).await;

    assert_eq!(outcome.notifications[0].message, "Falha ao carregar detalhes do hospital");
    assert!(screen.hospital.is_none());
}

#[tokio::test]
async fn get_unknown_hospital_is_not_found() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();

    let err = app.hospital_service.get(Uuid::new_v4()).await.unwrap_err();
    assert!(err.is_not_found(), "{err:?}");
}

#[tokio::test]
async fn list_appends_pages_until_the_last() {
    let backend = MockBackend::start().await;
    let app = backend.app_state_with_page_size(2);
    for name in ["A", "B", "C", "D", "E"] {
        backend.seed_hospital(&format!("Hospital {name}"));
    }

    let mut screen = HospitalsScreen::new();
    screen.load(&app).await;
    assert_eq!(screen.hospitals.items().len(), 2);
    assert_eq!(screen.hospitals.list.total_pages(), 3);

    screen.load_more(&app).await;
    screen.load_more(&app).await;
    assert_eq!(screen.hospitals.items().len(), 5);
    assert!(screen.hospitals.next_page().is_none());

    // Recarregar volta para a primeira página
    screen.load(&app).await;
    assert_eq!(screen.hospitals.items().len(), 2);
    assert_eq!(screen.create(), Outcome::navigate(Route::HospitalCreate));
}

#[tokio::test]
async fn create_validates_then_posts() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();

    let mut screen = HospitalCreateScreen::new();
    screen.form.name = "Hospital Central".into();
    let outcome = screen.submit(&app).await;
    assert!(outcome.transition.is_none());
    assert_eq!(screen.errors.get("address"), Some("Endereço é obrigatório"));
    assert!(!backend.was_called("POST", "/hospitals/"));

    screen.form.address = "Rua das Flores, 10".into();
    let outcome = screen.submit(&app).await;
    assert_eq!(outcome.transition, Some(Transition::Back));
    assert_eq!(outcome.notifications[0].message, "Hospital cadastrado com sucesso!");
    assert_eq!(backend.count("hospitals"), 1);
}

#[tokio::test]
async fn create_failure_uses_fallback_without_detail() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    backend.fail_with_body("POST", "/hospitals/", 500, json!({}));

    let mut screen = HospitalCreateScreen::new();
    screen.form.name = "Hospital Central".into();
    screen.form.address = "Rua das Flores, 10".into();
    let outcome = screen.submit(&app).await;

    assert!(outcome.transition.is_none());
    assert_eq!(outcome.notifications[0].message, "Erro ao cadastrar hospital");
}

#[tokio::test]
async fn delete_from_detail_goes_back() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let hospital = backend.seed_hospital("Hospital Central");

    let mut screen = HospitalDetailScreen::new(hospital);
    screen.load(&app).await;
    let outcome = screen.delete(&app).await;

    assert_eq!(outcome.transition, Some(Transition::Back));
    assert!(backend.was_called("DELETE", &format!("/hospitals/{hospital}")));
    assert_eq!(backend.count("hospitals"), 0);
}

#[tokio::test]
async fn production_without_type_does_not_break_summary() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let hospital = backend.seed_hospital("Hospital São Lucas");
    let doctor = Uuid::new_v4();
    backend.fail_with_body(
        "GET",
        &format!("/productions/hospital/{hospital}"),
        200,
        json!([
            {
                "id": Uuid::new_v4(), "doctor_id": doctor, "hospital_id": hospital,
                "type": "plantao", "date": "2024-03-10"
            },
            {
                "id": Uuid::new_v4(), "doctor_id": doctor, "hospital_id": hospital,
                "type": null, "date": "2024-03-11"
            },
            {
                "id": Uuid::new_v4(), "doctor_id": doctor, "hospital_id": hospital,
                "type": "consulta"
            }
        ]),
    );

    let mut screen = HospitalDetailScreen::new(hospital);
    let outcome = screen.load(&app).await;

    assert!(outcome.notifications.is_empty(), "{outcome:?}");
    assert!(screen.hospital.is_some());
    assert_eq!(screen.summary.total_productions, 3);
    assert_eq!(screen.summary.shift_count, 1);
    assert_eq!(screen.summary.consultation_count, 1);
    assert_eq!(screen.productions[2].date, None);
}

#[tokio::test]
async fn delete_of_missing_hospital_shows_server_message() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();

    let mut screen = HospitalDetailScreen::new(Uuid::new_v4());
    let outcome = screen.delete(&app).await;

    assert!(outcome.transition.is_none());
    assert_eq!(outcome.notifications[0].message, "Não encontrado");
}
