pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod pos_service;
pub use pos_service::PosService;
pub mod reporting_service;
pub use reporting_service::ReportingService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod finance_service;
pub use finance_service::FinanceService;
pub mod purchasing_service;
pub use purchasing_service::PurchasingService;
pub mod admin_service;
pub use admin_service::AdminService;
pub mod integration_service;
pub use integration_service::IntegrationService;
pub mod insight_service;
pub use insight_service::InsightService;
