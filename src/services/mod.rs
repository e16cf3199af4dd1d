pub mod auth;
pub mod doctor_service;
pub mod finance_service;
pub mod hospital_service;
pub mod production_service;
pub mod repasse_service;

pub use auth::AuthService;
pub use doctor_service::DoctorService;
pub use hospital_service::HospitalService;
pub use production_service::ProductionService;
pub use repasse_service::RepasseService;
