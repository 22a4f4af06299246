// src/services/pos_service.rs

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        admin::StoreSettings,
        audit::AuditLog,
        finance::{FinancialTransaction, TransactionKind},
        inventory::ProductUnit,
        pos::{Cart, CartView, DocumentType, PaymentMethod, Sale, SaleItem},
    },
    services::{IntegrationService, InventoryService},
    store::{AdminStore, AuditStore, CartStore, CrmStore, FinanceStore, SalesStore},
};

/// Frente de caixa: monta carrinhos e executa o pipeline de finalização.
///
/// A finalização é o único ponto do sistema que cria uma venda, e cada
/// venda é consumida pelo razão de estoque exatamente uma vez, antes de
/// qualquer efeito colateral (cobrança, fiscal, fidelidade).
#[derive(Clone)]
pub struct PosService {
    carts: CartStore,
    sales: SalesStore,
    inventory: InventoryService,
    crm: CrmStore,
    finance: FinanceStore,
    admin: AdminStore,
    audit: AuditStore,
    integrations: IntegrationService,
}

pub struct FinalizeSale {
    pub cart_id: Uuid,
    pub payment_method: PaymentMethod,
    pub document_type: DocumentType,
    pub customer_id: Option<Uuid>,
    pub nf_cpf: Option<String>,
    pub seller_id: Uuid,
    pub seller_name: String,
    pub origin: Option<String>,
}

impl PosService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carts: CartStore,
        sales: SalesStore,
        inventory: InventoryService,
        crm: CrmStore,
        finance: FinanceStore,
        admin: AdminStore,
        audit: AuditStore,
        integrations: IntegrationService,
    ) -> Self {
        Self { carts, sales, inventory, crm, finance, admin, audit, integrations }
    }

    // =========================================================================
    //  CARRINHO
    // =========================================================================

    pub async fn open_cart(&self, company_id: Uuid) -> Cart {
        self.carts.create(company_id).await
    }

    /// Bipe de produto unitário: cada chamada soma +1 na linha do produto
    /// (criada se não existir). O preço é congelado na primeira adição:
    /// mudanças de catálogo não afetam carrinhos abertos.
    pub async fn add_unit_item(
        &self,
        company_id: Uuid,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<CartView, AppError> {
        let product = self.inventory.get_product(company_id, product_id).await?;
        if product.unit != ProductUnit::Un {
            return Err(AppError::InvalidInput(
                "produto de peso exige pesagem, não bipe unitário",
            ));
        }

        let cart = self
            .carts
            .with_cart_mut(company_id, cart_id, |cart| {
                match cart.items.iter_mut().find(|i| i.product_id == product_id) {
                    Some(line) => {
                        line.quantity += Decimal::ONE;
                        line.total = line.quantity * line.price;
                    }
                    None => cart.items.push(SaleItem {
                        product_id,
                        name: product.name.clone(),
                        quantity: Decimal::ONE,
                        price: product.price_per_unit,
                        total: product.price_per_unit,
                        unit: ProductUnit::Un,
                    }),
                }
                Ok(cart.clone())
            })
            .await?;

        self.view_of(company_id, cart).await
    }

    /// Pesagem de produto a granel: cada pesagem vira uma linha própria,
    /// nunca fundida com pesagens anteriores do mesmo produto.
    pub async fn add_weight_item(
        &self,
        company_id: Uuid,
        cart_id: Uuid,
        product_id: Uuid,
        weight: Decimal,
    ) -> Result<CartView, AppError> {
        if weight <= Decimal::ZERO {
            return Err(AppError::InvalidInput("peso deve ser positivo"));
        }
        let product = self.inventory.get_product(company_id, product_id).await?;
        if product.unit != ProductUnit::Kg {
            return Err(AppError::InvalidInput(
                "produto unitário não vai na balança",
            ));
        }

        let cart = self
            .carts
            .with_cart_mut(company_id, cart_id, |cart| {
                cart.items.push(SaleItem {
                    product_id,
                    name: product.name.clone(),
                    quantity: weight,
                    price: product.price_per_unit,
                    total: product.price_per_unit * weight,
                    unit: ProductUnit::Kg,
                });
                Ok(cart.clone())
            })
            .await?;

        self.view_of(company_id, cart).await
    }

    /// Remove a linha na posição dada (linhas de pesagem são distintas
    /// entre si, então a remoção é posicional).
    pub async fn remove_item(
        &self,
        company_id: Uuid,
        cart_id: Uuid,
        index: usize,
    ) -> Result<CartView, AppError> {
        let cart = self
            .carts
            .with_cart_mut(company_id, cart_id, |cart| {
                if index >= cart.items.len() {
                    return Err(AppError::InvalidInput("linha inexistente no carrinho"));
                }
                cart.items.remove(index);
                Ok(cart.clone())
            })
            .await?;

        self.view_of(company_id, cart).await
    }

    pub async fn view_cart(&self, company_id: Uuid, cart_id: Uuid) -> Result<CartView, AppError> {
        let cart = self.carts.get(company_id, cart_id).await?;
        self.view_of(company_id, cart).await
    }

    pub async fn discard_cart(&self, company_id: Uuid, cart_id: Uuid) -> Result<(), AppError> {
        self.carts.get(company_id, cart_id).await?;
        self.carts.remove(cart_id).await;
        Ok(())
    }

    async fn view_of(&self, company_id: Uuid, cart: Cart) -> Result<CartView, AppError> {
        let settings = self.admin.get_company(company_id).await?.settings;
        let total = cart.total_amount();
        Ok(CartView {
            id: cart.id,
            items: cart.items,
            total_amount: total,
            points_to_earn: loyalty_points(&settings, total),
        })
    }

    // =========================================================================
    //  FINALIZAÇÃO
    // =========================================================================

    /// Pipeline de venda: valida o carrinho, grava a venda (imutável),
    /// consome gôndola, dispara as integrações, lança a receita, acumula
    /// pontos, audita e descarta o carrinho. Integrações nunca falham o
    /// pipeline.
    pub async fn finalize_sale(
        &self,
        company_id: Uuid,
        input: FinalizeSale,
    ) -> Result<Sale, AppError> {
        let cart = self.carts.get(company_id, input.cart_id).await?;
        if cart.items.is_empty() {
            return Err(AppError::InvalidInput("carrinho vazio"));
        }

        let company = self.admin.get_company(company_id).await?;
        let settings = &company.settings;

        let customer = match input.customer_id {
            Some(id) => Some(
                self.crm
                    .get(company_id, id)
                    .await
                    .ok_or(AppError::CustomerNotFound)?,
            ),
            None => None,
        };

        let now = Utc::now();
        let total_amount = cart.total_amount();
        let sale = Sale {
            id: Uuid::new_v4(),
            company_id,
            timestamp: now,
            items: cart.items.clone(),
            total_amount,
            payment_method: input.payment_method,
            document_type: input.document_type,
            customer_id: customer.as_ref().map(|c| c.id),
            nf_cpf: input.nf_cpf,
            seller_id: input.seller_id,
            origin: input.origin.unwrap_or_else(|| "Balcão".to_string()),
        };

        let sale = self.sales.append(sale).await;
        let report = self.inventory.consume_sale(&sale).await;
        if !report.oversold.is_empty() {
            self.audit
                .append(AuditLog {
                    id: Uuid::new_v4(),
                    company_id,
                    action: "ESTOQUE NEGATIVO".to_string(),
                    timestamp: now,
                    details: format!(
                        "Venda {} deixou {} produto(s) com gôndola negativa",
                        sale.id,
                        report.oversold.len()
                    ),
                    user_name: input.seller_name.clone(),
                })
                .await;
        }

        // Pontes externas, todas fire-and-forget
        self.integrations.create_asaas_charge(settings, &sale);
        self.integrations.emit_nfe_tiny(settings, &sale);
        self.integrations.send_whatsapp_receipt(
            settings,
            &sale,
            customer.as_ref().map(|c| c.phone.as_str()),
        );
        for item in &sale.items {
            if let Ok(product) = self.inventory.get_product(company_id, item.product_id).await {
                self.integrations.sync_stock(settings, &product);
            }
        }
        self.integrations.notify_webhook(
            settings,
            "sale.completed",
            json!({ "saleId": sale.id, "total": sale.total_amount }),
        );

        self.finance
            .append(FinancialTransaction {
                id: Uuid::new_v4(),
                company_id,
                kind: TransactionKind::Income,
                category: "Vendas".to_string(),
                description: format!("Venda PDV - {}", now.format("%d/%m")),
                amount: total_amount,
                timestamp: now,
            })
            .await;

        if let Some(customer) = &customer {
            let points = loyalty_points(settings, total_amount);
            if points > 0 {
                self.crm.add_points(company_id, customer.id, points).await?;
            }
        }

        self.audit
            .append(AuditLog {
                id: Uuid::new_v4(),
                company_id,
                action: "VENDA REALIZADA".to_string(),
                timestamp: now,
                details: format!(
                    "Venda {} ({} {}) via {}",
                    sale.id, settings.currency_symbol, sale.total_amount, sale.origin
                ),
                user_name: input.seller_name,
            })
            .await;

        self.carts.remove(input.cart_id).await;
        Ok(sale)
    }

    pub async fn list_sales(&self, company_id: Uuid) -> Vec<Sale> {
        let mut sales = self.sales.list(company_id).await;
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sales
    }
}

/// Pontos ganhos numa compra: a cada `loyalty_spend_threshold` gastos,
/// `loyalty_point_value` pontos. Sempre arredonda para baixo.
pub fn loyalty_points(settings: &StoreSettings, total: Decimal) -> i64 {
    if !settings.loyalty_enabled || settings.loyalty_spend_threshold <= Decimal::ZERO {
        return 0;
    }
    let multiples = (total / settings.loyalty_spend_threshold).floor();
    multiples.to_i64().unwrap_or(0) * settings.loyalty_point_value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::admin::{ActiveModules, Company, CompanyStatus};
    use crate::models::crm::Customer;
    use crate::models::inventory::ProductUnit;
    use crate::services::inventory_service::NewProduct;
    use crate::store::InventoryStore;
    use std::collections::HashMap;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct Fixture {
        pos: PosService,
        inventory: InventoryService,
        crm: CrmStore,
        finance: FinanceStore,
        audit: AuditStore,
        company_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let sales = SalesStore::new();
        let inventory = InventoryService::new(InventoryStore::new(), sales.clone());
        let crm = CrmStore::new();
        let finance = FinanceStore::new();
        let admin = AdminStore::new();
        let audit = AuditStore::new();

        let company_id = Uuid::new_v4();
        let mut settings = StoreSettings::default();
        settings.loyalty_enabled = true;
        settings.loyalty_spend_threshold = dec("10");
        settings.loyalty_point_value = 1;

        admin
            .insert_company(Company {
                id: company_id,
                subdomain: "matriz".into(),
                name: "Natura Loja Matriz".into(),
                cnpj: "12.345.678/0001-90".into(),
                main_email: "contato@natura.example".into(),
                plan_id: Uuid::new_v4(),
                status: CompanyStatus::Active,
                enabled_integrations: vec![],
                active_modules: ActiveModules {
                    inventory: true,
                    finance: true,
                    loyalty: true,
                    ai_insights: false,
                    multi_stock: true,
                    pos: true,
                    purchase_orders: true,
                },
                settings,
            })
            .await;

        let pos = PosService::new(
            CartStore::new(),
            sales,
            inventory.clone(),
            crm.clone(),
            finance.clone(),
            admin,
            audit.clone(),
            IntegrationService::new(),
        );

        Fixture { pos, inventory, crm, finance, audit, company_id }
    }

    async fn seed_product(f: &Fixture, unit: ProductUnit, store_stock: &str) -> Uuid {
        f.inventory
            .create_product(
                f.company_id,
                NewProduct {
                    name: "Granola Premium".into(),
                    category: "Cereais".into(),
                    unit,
                    price_per_unit: dec("30.00"),
                    channel_prices: HashMap::new(),
                    cost_price: None,
                    initial_warehouse_stock: dec("20"),
                    initial_store_stock: dec(store_stock),
                    min_stock_warehouse: dec("5"),
                    min_stock_store: dec("1"),
                    sku: "GR-001".into(),
                    scale_code: "102".into(),
                    barcode: None,
                    image_url: None,
                    next_expiration_date: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    fn finalize_input(cart_id: Uuid, customer_id: Option<Uuid>) -> FinalizeSale {
        FinalizeSale {
            cart_id,
            payment_method: PaymentMethod::Cash,
            document_type: DocumentType::Cupom,
            customer_id,
            nf_cpf: None,
            seller_id: Uuid::new_v4(),
            seller_name: "Carla Caixa".into(),
            origin: None,
        }
    }

    #[tokio::test]
    async fn unit_items_merge_into_one_line() {
        let f = fixture().await;
        let product_id = seed_product(&f, ProductUnit::Un, "10").await;
        let cart = f.pos.open_cart(f.company_id).await;

        f.pos.add_unit_item(f.company_id, cart.id, product_id).await.unwrap();
        let view = f.pos.add_unit_item(f.company_id, cart.id, product_id).await.unwrap();

        // Dois bipes, uma linha com quantidade 2
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, dec("2"));
        assert_eq!(view.total_amount, dec("60.00"));
        assert_eq!(view.points_to_earn, 6);
    }

    #[tokio::test]
    async fn weighings_stay_as_separate_lines() {
        let f = fixture().await;
        let product_id = seed_product(&f, ProductUnit::Kg, "10").await;
        let cart = f.pos.open_cart(f.company_id).await;

        f.pos.add_weight_item(f.company_id, cart.id, product_id, dec("0.350")).await.unwrap();
        let view = f
            .pos
            .add_weight_item(f.company_id, cart.id, product_id, dec("0.650"))
            .await
            .unwrap();

        assert_eq!(view.items.len(), 2);
        assert_eq!(view.total_amount, dec("30.0000"));
    }

    #[tokio::test]
    async fn add_paths_respect_product_unit() {
        let f = fixture().await;
        let bulk = seed_product(&f, ProductUnit::Kg, "10").await;
        let cart = f.pos.open_cart(f.company_id).await;

        let err = f.pos.add_unit_item(f.company_id, cart.id, bulk).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = f
            .pos
            .add_weight_item(f.company_id, cart.id, bulk, dec("0"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn remove_item_is_positional() {
        let f = fixture().await;
        let product_id = seed_product(&f, ProductUnit::Kg, "10").await;
        let cart = f.pos.open_cart(f.company_id).await;
        f.pos.add_weight_item(f.company_id, cart.id, product_id, dec("1")).await.unwrap();
        f.pos.add_weight_item(f.company_id, cart.id, product_id, dec("2")).await.unwrap();

        let view = f.pos.remove_item(f.company_id, cart.id, 0).await.unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, dec("2"));

        let err = f.pos.remove_item(f.company_id, cart.id, 5).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_cart_cannot_finalize() {
        let f = fixture().await;
        let cart = f.pos.open_cart(f.company_id).await;

        let err = f
            .pos
            .finalize_sale(f.company_id, finalize_input(cart.id, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn finalize_consumes_stock_records_income_and_accrues_points() {
        let f = fixture().await;
        let product_id = seed_product(&f, ProductUnit::Kg, "10").await;

        let customer = f
            .crm
            .insert(Customer {
                id: Uuid::new_v4(),
                company_id: f.company_id,
                name: "Maria Silva".into(),
                cpf: "123.456.789-00".into(),
                email: "maria@example.com".into(),
                phone: "(11) 98888-7777".into(),
                points: 0,
            })
            .await;

        let cart = f.pos.open_cart(f.company_id).await;
        f.pos.add_weight_item(f.company_id, cart.id, product_id, dec("2.5")).await.unwrap();

        let sale = f
            .pos
            .finalize_sale(f.company_id, finalize_input(cart.id, Some(customer.id)))
            .await
            .unwrap();
        assert_eq!(sale.total_amount, dec("75.00"));
        assert_eq!(sale.origin, "Balcão");

        // Gôndola baixada, depósito intocado
        let product = f.inventory.get_product(f.company_id, product_id).await.unwrap();
        assert_eq!(product.exposed_stock, dec("7.5"));
        assert_eq!(product.current_stock, dec("20"));

        // Receita lançada em "Vendas"
        let transactions = f.finance.list(f.company_id).await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, TransactionKind::Income);
        assert_eq!(transactions[0].category, "Vendas");
        assert_eq!(transactions[0].amount, dec("75.00"));

        // floor(75 / 10) * 1 = 7 pontos
        let customer = f.crm.get(f.company_id, customer.id).await.unwrap();
        assert_eq!(customer.points, 7);

        // Auditoria e carrinho descartado
        let logs = f.audit.list(f.company_id).await;
        assert!(logs.iter().any(|l| l.action == "VENDA REALIZADA"));
        assert!(matches!(
            f.pos.view_cart(f.company_id, cart.id).await,
            Err(AppError::CartNotFound)
        ));
    }

    #[tokio::test]
    async fn oversell_completes_sale_and_leaves_audit_trail() {
        let f = fixture().await;
        let product_id = seed_product(&f, ProductUnit::Kg, "1").await;

        let cart = f.pos.open_cart(f.company_id).await;
        f.pos.add_weight_item(f.company_id, cart.id, product_id, dec("3")).await.unwrap();

        // Gôndola só tem 1kg; a venda conclui mesmo assim
        f.pos
            .finalize_sale(f.company_id, finalize_input(cart.id, None))
            .await
            .unwrap();

        let product = f.inventory.get_product(f.company_id, product_id).await.unwrap();
        assert_eq!(product.exposed_stock, dec("-2"));

        let logs = f.audit.list(f.company_id).await;
        assert!(logs.iter().any(|l| l.action == "ESTOQUE NEGATIVO"));
    }

    #[test]
    fn loyalty_points_floor_and_gates() {
        let mut settings = StoreSettings::default();
        assert_eq!(loyalty_points(&settings, dec("100")), 0);

        settings.loyalty_enabled = true;
        settings.loyalty_spend_threshold = dec("10");
        settings.loyalty_point_value = 2;
        assert_eq!(loyalty_points(&settings, dec("99.90")), 18);
        assert_eq!(loyalty_points(&settings, dec("9.99")), 0);
        assert_eq!(loyalty_points(&settings, dec("10.00")), 2);
    }
}
