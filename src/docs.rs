// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Inventário ---
        handlers::inventory::create_product,
        handlers::inventory::list_products,
        handlers::inventory::delete_product,
        handlers::inventory::restock,
        handlers::inventory::transfer,
        handlers::inventory::loss,
        handlers::inventory::list_movements,
        handlers::inventory::stock_alerts,
        handlers::inventory::scale_file,

        // --- PDV ---
        handlers::pos::open_cart,
        handlers::pos::add_unit_item,
        handlers::pos::add_weight_item,
        handlers::pos::checkout,
        handlers::pos::list_sales,

        // --- CRM ---
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::purchase_history,

        // --- Financeiro ---
        handlers::finance::create_transaction,
        handlers::finance::list_transactions,
        handlers::finance::summary,

        // --- Compras ---
        handlers::purchasing::create_supplier,
        handlers::purchasing::list_suppliers,
        handlers::purchasing::create_order,
        handlers::purchasing::list_orders,
        handlers::purchasing::receive_order,
        handlers::purchasing::cancel_order,

        // --- Relatórios ---
        handlers::reports::dashboard_summary,
        handlers::reports::sales_by_channel,
        handlers::reports::churn_risk,
        handlers::reports::insights,

        // --- Configurações ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- Auditoria ---
        handlers::audit::list_audit_logs,

        // --- Admin SaaS ---
        handlers::admin::create_company,
        handlers::admin::update_company_status,
        handlers::admin::backup_company,
        handlers::admin::create_plan,
        handlers::admin::create_user,
    ),
    components(
        schemas(
            models::inventory::Product,
            models::inventory::ProductUnit,
            models::inventory::StockMovement,
            models::inventory::MovementType,
            models::inventory::StockLocation,
            models::inventory::TransferDirection,
            models::inventory::LossSource,
            models::inventory::ExpirationStatus,
            models::inventory::StockAlert,
            models::pos::Cart,
            models::pos::CartView,
            models::pos::Sale,
            models::pos::SaleItem,
            models::pos::PaymentMethod,
            models::pos::DocumentType,
            models::crm::Customer,
            models::finance::FinancialTransaction,
            models::finance::TransactionKind,
            models::finance::FinanceSummary,
            models::purchasing::Supplier,
            models::purchasing::PurchaseOrder,
            models::purchasing::PurchaseOrderItem,
            models::purchasing::PurchaseOrderStatus,
            models::admin::Company,
            models::admin::CompanyStatus,
            models::admin::ActiveModules,
            models::admin::StoreSettings,
            models::admin::Plan,
            models::admin::User,
            models::admin::UserRole,
            models::admin::Integration,
            models::admin::IntegrationCategory,
            models::audit::AuditLog,
            models::reports::DashboardSummary,
            models::reports::ChannelSalesEntry,
            models::reports::ChurnRiskEntry,
        )
    ),
    tags(
        (name = "Inventário", description = "Catálogo e o razão de estoque de dois locais"),
        (name = "PDV", description = "Carrinhos e finalização de vendas"),
        (name = "CRM", description = "Clientes e fidelidade"),
        (name = "Financeiro", description = "Fluxo de caixa"),
        (name = "Compras", description = "Fornecedores e pedidos de compra"),
        (name = "Relatórios", description = "Painel, canais, churn e insights"),
        (name = "Configurações", description = "Configurações da loja"),
        (name = "Auditoria", description = "Trilha de ações"),
        (name = "Admin SaaS", description = "Console de empresas, planos e usuários")
    ),
    info(
        title = "NaturaScale API",
        description = "Gestão de lojas de produtos naturais e a granel: estoque em dois locais, PDV, financeiro, CRM e compras.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
