pub mod admin;
pub mod audit;
pub mod crm;
pub mod finance;
pub mod inventory;
pub mod pos;
pub mod purchasing;
pub mod reports;
pub mod settings;
