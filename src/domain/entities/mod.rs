pub mod admins;
pub mod inscriptions;
pub mod offers;
