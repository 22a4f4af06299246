pub mod inventory;
pub mod pos;
pub mod crm;
pub mod finance;
pub mod purchasing;
pub mod admin;
pub mod audit;
pub mod reports;
