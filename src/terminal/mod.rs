// src/terminal/mod.rs
//
// Front-end de terminal: desenha a tela da rota atual, lê um comando,
// executa a ação correspondente e aplica o `Outcome` na navegação.

use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::{
    config::AppState,
    models::{doctor::UpdateDoctorDto, production::ProductionType},
    screens::{
        dashboard::DashboardScreen,
        doctors::{DoctorCreateScreen, DoctorCreateStep, DoctorDetailScreen, DoctorsScreen},
        hospitals::{HospitalCreateScreen, HospitalDetailScreen, HospitalsScreen},
        login::LoginScreen,
        productions::{ProductionCreateScreen, ProductionsScreen},
        register::RegisterScreen,
        repasses::{RepasseDetailScreen, RepassesScreen},
        Navigator, Outcome, Route,
    },
};

pub mod console;
pub mod render;

pub use console::Console;
use console::parse_index;

/// A tela montada para a rota do topo da pilha.
#[derive(Debug)]
pub enum ActiveScreen {
    Login(LoginScreen),
    Register(RegisterScreen),
    Dashboard(DashboardScreen),
    Doctors(DoctorsScreen),
    DoctorCreate(DoctorCreateScreen),
    DoctorDetail(DoctorDetailScreen),
    Hospitals(HospitalsScreen),
    HospitalCreate(HospitalCreateScreen),
    HospitalDetail(HospitalDetailScreen),
    Productions(ProductionsScreen),
    ProductionCreate(ProductionCreateScreen),
    Repasses(RepassesScreen),
    RepasseDetail(RepasseDetailScreen),
}

impl ActiveScreen {
    pub fn for_route(route: &Route, today: NaiveDate) -> Self {
        match route {
            Route::Login => Self::Login(LoginScreen::new()),
            Route::Register => Self::Register(RegisterScreen::new()),
            Route::Dashboard { user } => Self::Dashboard(DashboardScreen::new(user.clone())),
            Route::Doctors => Self::Doctors(DoctorsScreen::new()),
            Route::DoctorCreate => Self::DoctorCreate(DoctorCreateScreen::new()),
            Route::DoctorDetail { doctor_id } => Self::DoctorDetail(DoctorDetailScreen::new(*doctor_id)),
            Route::Hospitals => Self::Hospitals(HospitalsScreen::new()),
            Route::HospitalCreate => Self::HospitalCreate(HospitalCreateScreen::new()),
            Route::HospitalDetail { hospital_id } => {
                Self::HospitalDetail(HospitalDetailScreen::new(*hospital_id))
            }
            Route::Productions => Self::Productions(ProductionsScreen::new()),
            Route::ProductionCreate => Self::ProductionCreate(ProductionCreateScreen::new(today)),
            Route::Repasses => Self::Repasses(RepassesScreen::new()),
            Route::RepasseDetail { repasse_id } => {
                Self::RepasseDetail(RepasseDetailScreen::new(*repasse_id))
            }
        }
    }

    /// Busca inicial de cada tela. Toda vez que a tela aparece os dados são recarregados.
    pub async fn mount(&mut self, app: &AppState) -> Outcome {
        match self {
            Self::Doctors(s) => s.load(app).await,
            Self::DoctorDetail(s) => s.load(app).await,
            Self::Hospitals(s) => s.load(app).await,
            Self::HospitalDetail(s) => s.load(app).await,
            Self::Productions(s) => s.load(app).await,
            Self::ProductionCreate(s) => s.load(app).await,
            Self::Repasses(s) => s.load(app).await,
            Self::RepasseDetail(s) => s.load(app).await,
            Self::Login(_)
            | Self::Register(_)
            | Self::Dashboard(_)
            | Self::DoctorCreate(_)
            | Self::HospitalCreate(_) => Outcome::none(),
        }
    }
}

pub enum Flow {
    Continue,
    Quit,
}

/// Loop principal sobre stdin/stdout.
pub async fn run(app: AppState) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let mut console = Console::new(stdin, stdout);
    run_with(&app, &mut console).await
}

pub async fn run_with<R, W>(app: &AppState, console: &mut Console<R, W>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let today = Local::now().date_naive();
    let mut nav = Navigator::new();
    let mut screen = ActiveScreen::for_route(nav.current(), today);
    let mut outcome = screen.mount(app).await;

    loop {
        for notification in outcome.notifications.drain(..) {
            console.notify(&notification).await?;
        }
        if let Some(transition) = outcome.transition.take() {
            nav.apply(transition);
            tracing::debug!("Navegando para {}", nav.current().name());
            screen = ActiveScreen::for_route(nav.current(), today);
            outcome = screen.mount(app).await;
            continue;
        }

        console.write(&render::render(&screen)).await?;
        console.write("> ").await?;
        let Some(command) = console.read_line().await? else {
            break;
        };

        match handle(&mut screen, command.trim(), app, console).await? {
            (Flow::Quit, _) => break,
            (Flow::Continue, next) => outcome = next,
        }
    }

    console.line("Até logo!").await?;
    Ok(())
}

/// Executa o comando digitado na tela atual.
pub async fn handle<R, W>(
    screen: &mut ActiveScreen,
    command: &str,
    app: &AppState,
    console: &mut Console<R, W>,
) -> std::io::Result<(Flow, Outcome)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if command.eq_ignore_ascii_case("q") {
        return Ok((Flow::Quit, Outcome::none()));
    }
    if command.eq_ignore_ascii_case("b") && !matches!(screen, ActiveScreen::Login(_)) {
        return Ok((Flow::Continue, Outcome::back()));
    }
    let index = parse_index(command);

    let outcome = match screen {
        ActiveScreen::Login(s) => match command {
            "e" => {
                s.form.email = console.prompt("E-mail").await?;
                s.form.password = console.prompt("Senha").await?;
                s.submit(app).await
            }
            "r" => s.go_to_register(),
            _ => Outcome::none(),
        },

        ActiveScreen::Register(s) => match command {
            "f" => {
                s.form.name = console.prompt("Nome").await?;
                s.form.email = console.prompt("E-mail").await?;
                s.form.password = console.prompt("Senha").await?;
                s.form.confirm_password = console.prompt("Confirmar senha").await?;
                s.submit(app).await
            }
            _ => Outcome::none(),
        },

        ActiveScreen::Dashboard(s) => match (command, index) {
            ("s", _) => s.logout(app),
            (_, Some(i)) => s.open(i),
            _ => Outcome::none(),
        },

        ActiveScreen::Doctors(s) => match (command, index) {
            ("m", _) => s.load_more(app).await,
            ("n", _) => s.create(),
            (_, Some(i)) => s.open(i),
            _ => Outcome::none(),
        },

        ActiveScreen::DoctorCreate(s) => match (s.step, command, index) {
            (DoctorCreateStep::Create, "f", _) => {
                s.form.name = console.prompt("Nome").await?;
                s.form.crm = console.prompt("CRM").await?;
                s.form.specialty = console.prompt("Especialidade").await?;
                s.form.phone = console.prompt("Telefone (opcional)").await?;
                s.form.email = console.prompt("Email").await?;
                s.submit(app).await
            }
            (DoctorCreateStep::Assign, "c", _) => s.finish(app).await,
            (DoctorCreateStep::Assign, "p", _) => s.skip(),
            (DoctorCreateStep::Assign, _, Some(i)) => {
                if let Some(id) = s.hospitals.get(i).map(|h| h.id) {
                    s.toggle_hospital(id);
                }
                Outcome::none()
            }
            _ => Outcome::none(),
        },

        ActiveScreen::DoctorDetail(s) => match command {
            "e" => match s.doctor.clone() {
                Some(current) => {
                    let dto = UpdateDoctorDto {
                        name: Some(console.prompt_with_default("Nome", &current.name).await?),
                        crm: Some(console.prompt_with_default("CRM", &current.crm).await?),
                        specialty: Some(
                            console
                                .prompt_with_default("Especialidade", &current.specialty)
                                .await?,
                        ),
                        phone: Some(
                            console
                                .prompt_with_default("Telefone", current.phone.as_deref().unwrap_or_default())
                                .await?,
                        )
                        .filter(|p| !p.trim().is_empty()),
                        email: Some(console.prompt_with_default("Email", &current.email).await?),
                    };
                    s.update(app, &dto).await
                }
                None => Outcome::none(),
            },
            "x" => s.delete(app).await,
            _ => Outcome::none(),
        },

        ActiveScreen::Hospitals(s) => match (command, index) {
            ("m", _) => s.load_more(app).await,
            ("n", _) => s.create(),
            (_, Some(i)) => s.open(i),
            _ => Outcome::none(),
        },

        ActiveScreen::HospitalCreate(s) => match command {
            "f" => {
                s.form.name = console.prompt("Nome").await?;
                s.form.address = console.prompt("Endereço").await?;
                s.submit(app).await
            }
            _ => Outcome::none(),
        },

        ActiveScreen::HospitalDetail(s) => match (command, index) {
            ("x", _) => s.delete(app).await,
            (_, Some(i)) => s.open_doctor(i),
            _ => Outcome::none(),
        },

        ActiveScreen::Productions(s) => match command {
            "m" => s.load_more(app).await,
            "n" => s.create(),
            "x" => match console.prompt_index("Número da produção").await? {
                Some(i) => s.delete(app, i).await,
                None => Outcome::none(),
            },
            _ => Outcome::none(),
        },

        ActiveScreen::ProductionCreate(s) => match command {
            "f" => {
                for (i, d) in s.doctors.iter().enumerate() {
                    console.line(&format!("  {}. {}", i + 1, d.name)).await?;
                }
                if let Some(i) = console.prompt_index("Médico").await? {
                    s.select_doctor(i);
                }
                for (i, h) in s.hospitals.iter().enumerate() {
                    console.line(&format!("  {}. {}", i + 1, h.name)).await?;
                }
                if let Some(i) = console.prompt_index("Hospital").await? {
                    s.select_hospital(i);
                }
                console.line("  1. Plantão\n  2. Consulta").await?;
                if let Some(kind) = console
                    .prompt_index("Tipo")
                    .await?
                    .and_then(|i| ProductionType::choices().into_iter().nth(i))
                {
                    s.select_type(kind);
                }
                let date = s.form.date.clone();
                s.form.date = console.prompt_with_default("Data (AAAA-MM-DD)", &date).await?;
                s.form.description = console.prompt("Descrição (opcional)").await?;
                s.submit(app).await
            }
            _ => Outcome::none(),
        },

        ActiveScreen::Repasses(s) => match (command, index) {
            ("m", _) => s.load_more(app).await,
            ("n", _) => {
                for (i, p) in s.productions.iter().enumerate() {
                    let label = crate::screens::repasses::production_label(p);
                    console.line(&format!("  {}. {label}", i + 1)).await?;
                }
                let production = console.prompt_index("Produção").await?;
                let amount = console.prompt("Valor (R$)").await?;
                s.create(app, production, &amount).await
            }
            (_, Some(i)) => s.open(i),
            _ => Outcome::none(),
        },

        ActiveScreen::RepasseDetail(s) => match command {
            "c" => s.consolidate(app).await,
            "x" => s.delete(app).await,
            _ => Outcome::none(),
        },
    };

    Ok((Flow::Continue, outcome))
}
