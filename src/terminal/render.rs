// src/terminal/render.rs
//
// Desenha cada tela como texto. Sem I/O: só monta a `String`.

use std::fmt::Write;

use crate::{
    common::{
        error::FieldErrors,
        formatters::{
            format_currency, format_date, format_optional_date, format_production_type,
            format_repasse_status,
        },
    },
    models::pagination::PagedList,
    screens::{
        dashboard::DashboardScreen,
        doctors::{DoctorCreateScreen, DoctorCreateStep, DoctorDetailScreen, DoctorsScreen},
        hospitals::{HospitalDetailScreen, HospitalsScreen},
        productions::{ProductionCreateScreen, ProductionsScreen},
        repasses::{RepasseDetailScreen, RepassesScreen},
    },
    terminal::ActiveScreen,
};

const LOADING: &str = "Carregando...";
const UNAVAILABLE: &str = "Não foi possível carregar os dados.";

pub fn render(screen: &ActiveScreen) -> String {
    let mut out = String::new();
    match screen {
        ActiveScreen::Login(s) => {
            header(&mut out, "Entrar");
            errors(&mut out, &s.errors);
            out.push_str("[e] entrar  [r] criar conta  [q] sair\n");
        }
        ActiveScreen::Register(s) => {
            header(&mut out, "Criar conta");
            errors(&mut out, &s.errors);
            out.push_str("[f] preencher cadastro  [b] voltar\n");
        }
        ActiveScreen::Dashboard(s) => dashboard(&mut out, s),
        ActiveScreen::Doctors(s) => doctors(&mut out, s),
        ActiveScreen::DoctorCreate(s) => doctor_create(&mut out, s),
        ActiveScreen::DoctorDetail(s) => doctor_detail(&mut out, s),
        ActiveScreen::Hospitals(s) => hospitals(&mut out, s),
        ActiveScreen::HospitalCreate(s) => {
            header(&mut out, "Novo hospital");
            errors(&mut out, &s.errors);
            out.push_str("[f] preencher cadastro  [b] voltar\n");
        }
        ActiveScreen::HospitalDetail(s) => hospital_detail(&mut out, s),
        ActiveScreen::Productions(s) => productions(&mut out, s),
        ActiveScreen::ProductionCreate(s) => production_create(&mut out, s),
        ActiveScreen::Repasses(s) => repasses(&mut out, s),
        ActiveScreen::RepasseDetail(s) => repasse_detail(&mut out, s),
    }
    out
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n=== {title} ===");
}

fn errors(out: &mut String, errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  ⚠ {field}: {message}");
    }
}

fn footer<T>(out: &mut String, list: &PagedList<T>, extra: &str) {
    if list.total_pages() > 0 {
        let _ = writeln!(
            out,
            "Página {} de {} ({} registros)",
            list.page(),
            list.total_pages(),
            list.total()
        );
    }
    let more = if list.has_more() { "[m] mais  " } else { "" };
    let _ = writeln!(out, "[1..n] abrir  {more}{extra}[b] voltar");
}

fn dashboard(out: &mut String, s: &DashboardScreen) {
    header(out, "Painel");
    let _ = writeln!(out, "Olá, {}!", s.user_name());
    for (i, item) in s.menu().iter().enumerate() {
        let _ = writeln!(out, "{}. {} {} - {}", i + 1, item.icon, item.title, item.description);
    }
    out.push_str("[s] sair da conta  [q] fechar\n");
}

fn doctors(out: &mut String, s: &DoctorsScreen) {
    header(out, "Médicos");
    if s.doctors.loading {
        let _ = writeln!(out, "{LOADING}");
    } else if s.doctors.list.is_empty() {
        out.push_str("Nenhum médico cadastrado\n");
    }
    for (i, d) in s.doctors.items().iter().enumerate() {
        let _ = writeln!(out, "{}. {} | CRM {} | {}", i + 1, d.name, d.crm, d.specialty);
    }
    footer(out, &s.doctors.list, "[n] novo  ");
}

fn doctor_create(out: &mut String, s: &DoctorCreateScreen) {
    match s.step {
        DoctorCreateStep::Create => {
            header(out, "Novo médico");
            errors(out, &s.errors);
            out.push_str("[f] preencher cadastro  [b] voltar\n");
        }
        DoctorCreateStep::Assign => {
            let name = s.created.as_ref().map(|d| d.name.as_str()).unwrap_or_default();
            header(out, &format!("Vincular {name} a hospitais"));
            if s.hospitals_loading {
                let _ = writeln!(out, "{LOADING}");
            } else if s.hospitals.is_empty() {
                out.push_str("Nenhum hospital disponível\n");
            }
            for (i, h) in s.hospitals.iter().enumerate() {
                let mark = if s.is_selected(h.id) { "x" } else { " " };
                let _ = writeln!(out, "{}. [{mark}] {}", i + 1, h.name);
            }
            out.push_str("[1..n] marcar/desmarcar  [c] concluir  [p] pular\n");
        }
    }
}

// Detalhe sem entidade: ainda carregando ou a busca falhou
fn unavailable(out: &mut String, loading: bool) {
    let _ = writeln!(out, "{}", if loading { LOADING } else { UNAVAILABLE });
    out.push_str("[b] voltar\n");
}

fn doctor_detail(out: &mut String, s: &DoctorDetailScreen) {
    header(out, "Médico");
    let Some(d) = &s.doctor else {
        unavailable(out, s.loading);
        return;
    };
    let _ = writeln!(out, "{}\nCRM: {}\nEspecialidade: {}", d.name, d.crm, d.specialty);
    let _ = writeln!(out, "E-mail: {}", d.email);
    if let Some(phone) = d.phone.as_deref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "Telefone: {phone}");
    }
    if let Some(stats) = &s.stats {
        let _ = writeln!(
            out,
            "Pendentes: {} ({})\nConsolidados: {} ({})",
            stats.pending_count,
            format_currency(Some(stats.pending_value)),
            stats.consolidated_count,
            format_currency(Some(stats.consolidated_value)),
        );
    }
    let _ = writeln!(out, "Produções ({}):", s.productions.len());
    for p in &s.productions {
        let _ = writeln!(out, "  - {} em {}", format_production_type(p.kind.as_ref()), format_optional_date(p.date));
    }
    out.push_str("[e] editar  [x] excluir  [b] voltar\n");
}

fn hospitals(out: &mut String, s: &HospitalsScreen) {
    header(out, "Hospitais");
    if s.hospitals.loading {
        let _ = writeln!(out, "{LOADING}");
    } else if s.hospitals.list.is_empty() {
        out.push_str("Nenhum hospital cadastrado\n");
    }
    for (i, h) in s.hospitals.items().iter().enumerate() {
        let _ = writeln!(out, "{}. {} | {}", i + 1, h.name, h.address);
    }
    footer(out, &s.hospitals.list, "[n] novo  ");
}

fn hospital_detail(out: &mut String, s: &HospitalDetailScreen) {
    header(out, "Hospital");
    let Some(h) = &s.hospital else {
        unavailable(out, s.loading);
        return;
    };
    let summary = &s.summary;
    let _ = writeln!(out, "{}\n{}", h.name, h.address);
    let _ = writeln!(
        out,
        "Produções: {} (Plantões: {}, Consultas: {})",
        summary.total_productions, summary.shift_count, summary.consultation_count
    );
    let _ = writeln!(
        out,
        "Consolidado: {} em {} repasse(s)",
        format_currency(Some(summary.consolidated.total)),
        summary.consolidated.count
    );
    let _ = writeln!(
        out,
        "Pendente: {} em {} repasse(s)",
        format_currency(Some(summary.pending.total)),
        summary.pending.count
    );
    let _ = writeln!(out, "Médicos vinculados ({}):", s.doctors.len());
    for (i, d) in s.doctors.iter().enumerate() {
        let _ = writeln!(out, "{}. {} | {}", i + 1, d.name, d.specialty);
    }
    out.push_str("[1..n] abrir médico  [x] excluir hospital  [b] voltar\n");
}

fn productions(out: &mut String, s: &ProductionsScreen) {
    header(out, "Produções");
    if s.productions.loading {
        let _ = writeln!(out, "{LOADING}");
    } else if s.productions.list.is_empty() {
        out.push_str("Nenhuma produção cadastrada\n");
    }
    for (i, p) in s.productions.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | {} | {} | {}",
            i + 1,
            format_production_type(p.kind.as_ref()),
            format_optional_date(p.date),
            s.doctor_name(p.doctor_id),
            s.hospital_name(p.hospital_id),
        );
    }
    let more = if s.productions.list.has_more() { "[m] mais  " } else { "" };
    let _ = writeln!(out, "{more}[n] nova  [x] excluir  [b] voltar");
}

fn production_create(out: &mut String, s: &ProductionCreateScreen) {
    header(out, "Nova produção");
    if s.initial_loading {
        let _ = writeln!(out, "{LOADING}");
    }
    let doctor = s
        .form
        .doctor_id
        .and_then(|id| s.doctors.iter().find(|d| d.id == id))
        .map_or("-", |d| d.name.as_str());
    let hospital = s
        .form
        .hospital_id
        .and_then(|id| s.hospitals.iter().find(|h| h.id == id))
        .map_or("-", |h| h.name.as_str());
    let _ = writeln!(out, "Médico: {doctor}\nHospital: {hospital}");
    let _ = writeln!(out, "Tipo: {}", format_production_type(s.form.kind.as_ref()));
    let _ = writeln!(out, "Data: {}", s.form.date);
    errors(out, &s.errors);
    out.push_str("[f] preencher cadastro  [b] voltar\n");
}

fn repasses(out: &mut String, s: &RepassesScreen) {
    header(out, "Repasses");
    if s.repasses.loading {
        let _ = writeln!(out, "{LOADING}");
    } else if s.repasses.list.is_empty() {
        out.push_str("Nenhum repasse cadastrado\n");
    }
    for (i, r) in s.repasses.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} | {} | {}",
            i + 1,
            format_currency(Some(r.amount)),
            format_repasse_status(Some(&r.status)),
            s.production_label(r.production_id),
        );
    }
    errors(out, &s.errors);
    footer(out, &s.repasses.list, "[n] novo  ");
}

fn repasse_detail(out: &mut String, s: &RepasseDetailScreen) {
    header(out, "Repasse");
    let Some(r) = &s.repasse else {
        unavailable(out, s.loading);
        return;
    };
    let _ = writeln!(out, "Valor: {}", format_currency(Some(r.amount)));
    let _ = writeln!(out, "Status: {}", format_repasse_status(Some(&r.status)));
    if let Some(created) = r.created_at {
        let _ = writeln!(out, "Criado em: {}", format_date(created.date_naive()));
    }
    if let Some(p) = &s.production {
        let _ = writeln!(
            out,
            "Produção: {} em {}",
            format_production_type(p.kind.as_ref()),
            format_optional_date(p.date)
        );
    }
    if let Some(d) = &s.doctor {
        let _ = writeln!(out, "Médico: {} (CRM {})", d.name, d.crm);
    }
    if let Some(h) = &s.hospital {
        let _ = writeln!(out, "Hospital: {}", h.name);
    }
    let consolidate = if s.can_consolidate() { "[c] consolidar  " } else { "" };
    let _ = writeln!(out, "{consolidate}[x] excluir  [b] voltar");
}
