// tests/common/mod.rs
//
// Backend REST falso em memória (axum em 127.0.0.1:0). Registra cada
// requisição recebida e permite injetar falhas por método + caminho.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, MethodRouter},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use seiwa::config::{AppConfig, AppState};

pub const TOKEN: &str = "token-de-teste";
pub const PASSWORD: &str = "segredo123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct Db {
    collections: HashMap<&'static str, Vec<Value>>,
    links: Vec<(Uuid, Uuid)>, // (médico, hospital)
    requests: Vec<Recorded>,
    failures: HashMap<(String, String), (StatusCode, Value)>,
}

#[derive(Clone, Default)]
struct Mock(Arc<Mutex<Db>>);

impl Mock {
    fn db(&self) -> std::sync::MutexGuard<'_, Db> {
        self.0.lock().unwrap()
    }
}

pub struct MockBackend {
    mock: Mock,
    base_url: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let mock = Mock::default();
        let app = Router::new()
            .nest("/api/v1", routes())
            .layer(middleware::from_fn_with_state(mock.clone(), record))
            .with_state(mock.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            mock,
            base_url: format!("http://{addr}/api/v1"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(AppConfig {
            api_url: self.base_url.clone(),
            ..AppConfig::default()
        })
    }

    pub fn app_state_with_page_size(&self, page_size: u32) -> AppState {
        AppState::new(AppConfig {
            api_url: self.base_url.clone(),
            page_size,
            ..AppConfig::default()
        })
    }

    /// Todas as requisições recebidas, em ordem.
    pub fn requests(&self) -> Vec<Recorded> {
        self.mock.db().requests.clone()
    }

    /// "MÉTODO /caminho" (sem o prefixo /api/v1), para asserts curtos.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path.trim_start_matches("/api/v1")))
            .collect()
    }

    pub fn was_called(&self, method: &str, path: &str) -> bool {
        let wanted = format!("{method} {path}");
        self.calls().iter().any(|c| *c == wanted)
    }

    pub fn clear_requests(&self) {
        self.mock.db().requests.clear();
    }

    /// A próxima chamada (e as seguintes) a `method path` responde com `status` e `{"detail": ...}`.
    pub fn fail(&self, method: &str, path: &str, status: u16, detail: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.mock.db().failures.insert(
            (method.to_string(), format!("/api/v1{path}")),
            (status, json!({ "detail": detail })),
        );
    }

    pub fn fail_with_body(&self, method: &str, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap();
        self.mock
            .db()
            .failures
            .insert((method.to_string(), format!("/api/v1{path}")), (status, body));
    }

    pub fn links(&self) -> Vec<(Uuid, Uuid)> {
        self.mock.db().links.clone()
    }

    pub fn count(&self, kind: &'static str) -> usize {
        self.mock.db().collections.get(kind).map_or(0, Vec::len)
    }

    fn insert(&self, kind: &'static str, mut value: Value) -> Uuid {
        let id = Uuid::new_v4();
        value["id"] = json!(id);
        value["created_at"] = json!("2024-03-01T10:00:00Z");
        self.mock.db().collections.entry(kind).or_default().push(value);
        id
    }

    pub fn seed_doctor(&self, name: &str) -> Uuid {
        self.insert(
            "doctors",
            json!({
                "name": name,
                "crm": "12345/SP",
                "specialty": "Cardiologia",
                "email": format!("{}@hospital.com", name.to_lowercase().replace(' ', ".")),
            }),
        )
    }

    pub fn seed_hospital(&self, name: &str) -> Uuid {
        self.insert(
            "hospitals",
            json!({ "name": name, "address": "Av. Paulista, 1000" }),
        )
    }

    pub fn seed_production(&self, doctor_id: Uuid, hospital_id: Uuid, kind: &str, date: &str) -> Uuid {
        self.insert(
            "productions",
            json!({
                "doctor_id": doctor_id,
                "hospital_id": hospital_id,
                "type": kind,
                "date": date,
            }),
        )
    }

    /// `amount` vai como veio (texto ou número) e no campo indicado (`amount` ou `valor`).
    pub fn seed_repasse(&self, production_id: Uuid, field: &str, amount: Value, status: &str) -> Uuid {
        let mut body = json!({ "production_id": production_id, "status": status });
        body[field] = amount;
        self.insert("repasses", body)
    }

    pub fn link(&self, doctor_id: Uuid, hospital_id: Uuid) {
        self.mock.db().links.push((doctor_id, hospital_id));
    }
}

// =============================================================================
//  MIDDLEWARE
// =============================================================================

async fn record(State(mock): State<Mock>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let failure = {
        let mut db = mock.db();
        db.requests.push(Recorded {
            method: method.clone(),
            path: path.clone(),
            authorization,
        });
        db.failures.get(&(method, path)).cloned()
    };

    match failure {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(request).await,
    }
}

// =============================================================================
//  ROTAS
// =============================================================================

fn routes() -> Router<Mock> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signup", post(sign_up))
        .route("/doctors/", collection("doctors"))
        .route("/doctors/{id}", item("doctors"))
        .route("/doctors/{id}/hospitals/{hospital_id}", post(link_doctor))
        .route("/hospitals/", collection("hospitals"))
        .route("/hospitals/{id}", item("hospitals"))
        .route("/hospitals/{id}/doctors/", get(hospital_doctors))
        .route("/productions/", collection("productions"))
        .route("/productions/{id}", item("productions"))
        .route("/productions/doctor/{id}", get(productions_by_doctor))
        .route("/productions/hospital/{id}", get(productions_by_hospital))
        .route("/repasses/", collection("repasses"))
        .route("/repasses/{id}", item("repasses"))
        .route("/repasses/stats/{id}", get(repasse_stats))
        .route("/repasses/hospital/{id}", get(repasses_by_hospital))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Não encontrado" }))).into_response()
}

async fn sign_in(Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "E-mail ou senha incorretos" })),
        )
            .into_response();
    }
    Json(json!({
        "message": "ok",
        "access_token": TOKEN,
        "token_type": "bearer",
        "user": {
            "id": Uuid::new_v4(),
            "name": "Ana Souza",
            "email": body["email"],
        }
    }))
    .into_response()
}

async fn sign_up(Json(body): Json<Value>) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Usuário criado", "email": body["email"] })),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

fn collection(kind: &'static str) -> MethodRouter<Mock> {
    get(move |State(mock): State<Mock>, Query(q): Query<PageQuery>| async move {
        let page = q.page.unwrap_or(1).max(1);
        let page_size = q.page_size.unwrap_or(10).max(1);
        let all = mock.db().collections.get(kind).cloned().unwrap_or_default();
        let total = all.len();
        let items: Vec<Value> = all
            .into_iter()
            .skip(((page - 1) * page_size) as usize)
            .take(page_size as usize)
            .collect();
        Json(json!({
            "items": items,
            "total": total,
            "page": page,
            "page_size": page_size,
            "total_pages": total.div_ceil(page_size as usize),
        }))
    })
    .post(move |State(mock): State<Mock>, Json(mut body): Json<Value>| async move {
        body["id"] = json!(Uuid::new_v4());
        body["created_at"] = json!("2024-03-01T10:00:00Z");
        mock.db()
            .collections
            .entry(kind)
            .or_default()
            .push(body.clone());
        (StatusCode::CREATED, Json(body))
    })
}

fn find(mock: &Mock, kind: &str, id: Uuid) -> Option<Value> {
    mock.db()
        .collections
        .get(kind)?
        .iter()
        .find(|v| v["id"] == json!(id))
        .cloned()
}

fn item(kind: &'static str) -> MethodRouter<Mock> {
    get(move |State(mock): State<Mock>, Path(id): Path<Uuid>| async move {
        match find(&mock, kind, id) {
            Some(value) => Json(value).into_response(),
            None => not_found(),
        }
    })
    .put(
        move |State(mock): State<Mock>, Path(id): Path<Uuid>, Json(patch): Json<Value>| async move {
            let mut db = mock.db();
            let Some(stored) = db
                .collections
                .get_mut(kind)
                .and_then(|items| items.iter_mut().find(|v| v["id"] == json!(id)))
            else {
                return not_found();
            };
            if let (Some(target), Some(fields)) = (stored.as_object_mut(), patch.as_object()) {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            stored["updated_at"] = json!("2024-03-02T08:30:00Z");
            Json(stored.clone()).into_response()
        },
    )
    .delete(move |State(mock): State<Mock>, Path(id): Path<Uuid>| async move {
        let mut db = mock.db();
        let Some(items) = db.collections.get_mut(kind) else {
            return not_found();
        };
        let before = items.len();
        items.retain(|v| v["id"] != json!(id));
        if items.len() == before {
            return not_found();
        }
        StatusCode::NO_CONTENT.into_response()
    })
}

async fn link_doctor(
    State(mock): State<Mock>,
    Path((doctor_id, hospital_id)): Path<(Uuid, Uuid)>,
) -> Response {
    if find(&mock, "hospitals", hospital_id).is_none() {
        return not_found();
    }
    mock.db().links.push((doctor_id, hospital_id));
    Json(json!({ "message": "Vínculo criado" })).into_response()
}

// Relacionamentos: uns devolvem array puro, outros o envelope paginado
async fn hospital_doctors(State(mock): State<Mock>, Path(hospital_id): Path<Uuid>) -> Response {
    let linked: Vec<Uuid> = mock
        .db()
        .links
        .iter()
        .filter(|(_, h)| *h == hospital_id)
        .map(|(d, _)| *d)
        .collect();
    let doctors: Vec<Value> = linked
        .into_iter()
        .filter_map(|id| find(&mock, "doctors", id))
        .collect();
    Json(json!(doctors)).into_response()
}

fn filter_by(mock: &Mock, kind: &str, field: &str, id: Uuid) -> Vec<Value> {
    mock.db()
        .collections
        .get(kind)
        .map(|items| {
            items
                .iter()
                .filter(|v| v[field] == json!(id))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

async fn productions_by_doctor(State(mock): State<Mock>, Path(id): Path<Uuid>) -> Response {
    Json(json!(filter_by(&mock, "productions", "doctor_id", id))).into_response()
}

async fn productions_by_hospital(State(mock): State<Mock>, Path(id): Path<Uuid>) -> Response {
    let items = filter_by(&mock, "productions", "hospital_id", id);
    let total = items.len();
    Json(json!({
        "items": items,
        "total": total,
        "page": 1,
        "page_size": 100,
        "total_pages": 1,
    }))
    .into_response()
}

async fn repasses_by_hospital(State(mock): State<Mock>, Path(id): Path<Uuid>) -> Response {
    let productions: Vec<Value> = filter_by(&mock, "productions", "hospital_id", id)
        .into_iter()
        .map(|p| p["id"].clone())
        .collect();
    let repasses: Vec<Value> = mock
        .db()
        .collections
        .get("repasses")
        .map(|items| {
            items
                .iter()
                .filter(|r| productions.contains(&r["production_id"]))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(json!(repasses)).into_response()
}

// Responde com os nomes de campo legados
async fn repasse_stats(State(mock): State<Mock>, Path(doctor_id): Path<Uuid>) -> Response {
    let productions: Vec<Value> = filter_by(&mock, "productions", "doctor_id", doctor_id)
        .into_iter()
        .map(|p| p["id"].clone())
        .collect();
    let repasses: Vec<Value> = mock
        .db()
        .collections
        .get("repasses")
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|r| productions.contains(&r["production_id"]))
        .collect();

    let count = |status: &str| repasses.iter().filter(|r| r["status"] == status).count();
    Json(json!({
        "doctor_id": doctor_id,
        "periodo_inicio": "2024-01-01",
        "periodo_fim": "2024-12-31",
        "total_pendente_qtd": count("pendente") + count("pending"),
        "total_pendente_valor": "0",
        "total_consolidado_qtd": count("consolidado") + count("consolidated"),
        "total_consolidado_valor": 0,
    }))
    .into_response()
}
