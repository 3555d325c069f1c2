pub mod auth;
pub mod dashboard;
pub mod inscriptions;
pub mod offers;
