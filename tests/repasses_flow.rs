// tests/repasses_flow.rs

mod common;

use common::MockBackend;
use rust_decimal::Decimal;
use serde_json::json;
use seiwa::{
    models::repasse::RepasseStatus,
    screens::{
        repasses::{RepasseDetailScreen, RepassesScreen, UNKNOWN_PRODUCTION},
        Route, Transition,
    },
};
use uuid::Uuid;

struct Seeded {
    doctor: Uuid,
    hospital: Uuid,
    production: Uuid,
    repasse: Uuid,
}

fn seed(backend: &MockBackend) -> Seeded {
    let doctor = backend.seed_doctor("Dra. Ana");
    let hospital = backend.seed_hospital("Hospital Central");
    let production = backend.seed_production(doctor, hospital, "plantao", "2024-03-10");
    let repasse = backend.seed_repasse(production, "amount", json!("1250.00"), "pendente");
    Seeded {
        doctor,
        hospital,
        production,
        repasse,
    }
}

#[tokio::test]
async fn detail_loads_in_dependency_order() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let s = seed(&backend);

    let mut screen = RepasseDetailScreen::new(s.repasse);
    let outcome = screen.load(&app).await;
    assert!(outcome.notifications.is_empty(), "{outcome:?}");

    assert_eq!(screen.repasse.as_ref().unwrap().amount, Decimal::new(125000, 2));
    assert_eq!(screen.production.as_ref().unwrap().id, s.production);
    assert_eq!(screen.doctor.as_ref().unwrap().id, s.doctor);
    assert_eq!(screen.hospital.as_ref().unwrap().id, s.hospital);

    let calls = backend.calls();
    let pos = |path: String| calls.iter().position(|c| *c == path).unwrap();
    let repasse = pos(format!("GET /repasses/{}", s.repasse));
    let production = pos(format!("GET /productions/{}", s.production));
    let doctor = pos(format!("GET /doctors/{}", s.doctor));
    let hospital = pos(format!("GET /hospitals/{}", s.hospital));
    assert!(repasse < production);
    assert!(production < doctor);
    assert!(production < hospital);
}

#[tokio::test]
async fn broken_chain_goes_back_without_later_calls() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let s = seed(&backend);
    backend.fail("GET", &format!("/productions/{}", s.production), 500, "erro");

    let mut screen = RepasseDetailScreen::new(s.repasse);
    let outcome = screen.load(&app).await;

    assert_eq!(outcome.transition, Some(Transition::Back));
    assert_eq!(outcome.notifications[0].message, "Falha ao carregar detalhes");
    assert!(!backend.was_called("GET", &format!("/doctors/{}", s.doctor)));
    assert!(!backend.was_called("GET", &format!("/hospitals/{}", s.hospital)));
}

#[tokio::test]
async fn consolidate_updates_status() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let s = seed(&backend);

    let mut screen = RepasseDetailScreen::new(s.repasse);
    screen.load(&app).await;
    assert!(screen.can_consolidate());

    let outcome = screen.consolidate(&app).await;
    assert_eq!(outcome.notifications[0].message, "Repasse consolidado com sucesso!");
    assert!(backend.was_called("PUT", &format!("/repasses/{}", s.repasse)));

    let repasse = screen.repasse.as_ref().unwrap();
    assert_eq!(repasse.status, RepasseStatus::Consolidated);
    assert!(repasse.updated_at.is_some());
    assert!(!screen.can_consolidate());

    // Já consolidado: nada é enviado
    backend.clear_requests();
    screen.consolidate(&app).await;
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn delete_goes_back() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let s = seed(&backend);

    let mut screen = RepasseDetailScreen::new(s.repasse);
    screen.load(&app).await;
    let outcome = screen.delete(&app).await;

    assert_eq!(outcome.transition, Some(Transition::Back));
    assert_eq!(backend.count("repasses"), 0);
}

#[tokio::test]
async fn list_labels_productions_and_reads_legacy_amounts() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    let s = seed(&backend);
    backend.seed_repasse(Uuid::new_v4(), "valor", json!(80.5), "consolidado");

    let mut screen = RepassesScreen::new();
    let outcome = screen.load(&app).await;
    assert!(outcome.notifications.is_empty());

    let items = screen.repasses.items();
    assert_eq!(items.len(), 2);
    assert_eq!(screen.production_label(items[0].production_id), "Plantão - 10/03/2024");
    assert_eq!(screen.production_label(items[1].production_id), UNKNOWN_PRODUCTION);
    assert_eq!(items[1].amount, Decimal::new(805, 1));
    assert_eq!(items[1].status, RepasseStatus::Consolidated);

    assert_eq!(
        screen.open(0),
        seiwa::screens::Outcome::navigate(Route::RepasseDetail { repasse_id: s.repasse })
    );
}

#[tokio::test]
async fn create_validates_amount_before_sending() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    seed(&backend);

    let mut screen = RepassesScreen::new();
    screen.load(&app).await;

    screen.create(&app, Some(0), "abc").await;
    assert_eq!(screen.errors.get("amount"), Some("Valor inválido"));
    screen.create(&app, None, "").await;
    assert_eq!(screen.errors.get("production_id"), Some("Produção é obrigatória"));
    assert_eq!(screen.errors.get("amount"), Some("Valor é obrigatório"));
    assert!(!backend.was_called("POST", "/repasses/"));

    let outcome = screen.create(&app, Some(0), "350,75").await;
    assert_eq!(outcome.notifications[0].message, "Repasse cadastrado com sucesso!");
    assert!(screen.errors.is_empty());
    assert_eq!(screen.repasses.items().len(), 2);
    assert_eq!(screen.repasses.items()[1].amount, Decimal::new(35075, 2));
    assert_eq!(screen.repasses.items()[1].status, RepasseStatus::Pending);
}

#[tokio::test]
async fn create_in_flight_is_not_repeated() {
    let backend = MockBackend::start().await;
    let app = backend.app_state();
    seed(&backend);

    let mut screen = RepassesScreen::new();
    screen.load(&app).await;
    screen.creating = true;
    let outcome = screen.create(&app, Some(0), "100").await;

    assert!(outcome.notifications.is_empty());
    assert!(!backend.was_called("POST", "/repasses/"));
    assert_eq!(backend.count("repasses"), 1);
}
