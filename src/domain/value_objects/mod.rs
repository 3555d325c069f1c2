pub mod admins;
pub mod dashboard;
pub mod enums;
pub mod inscriptions;
pub mod offers;
