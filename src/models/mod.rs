pub mod auth;
pub mod doctor;
pub mod finance;
pub mod hospital;
pub mod pagination;
pub mod production;
pub mod repasse;
pub mod wire;
