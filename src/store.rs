pub mod inventory_store;
pub use inventory_store::InventoryStore;
pub mod sales_store;
pub use sales_store::{CartStore, SalesStore};
pub mod crm_store;
pub use crm_store::CrmStore;
pub mod finance_store;
pub use finance_store::FinanceStore;
pub mod purchasing_store;
pub use purchasing_store::PurchasingStore;
pub mod admin_store;
pub use admin_store::AdminStore;
pub mod audit_store;
pub use audit_store::AuditStore;
