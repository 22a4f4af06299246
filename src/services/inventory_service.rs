// src/services/inventory_service.rs

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{
        ExpirationStatus, LossSource, MovementType, Product, ProductUnit, StockAlert,
        StockLocation, StockMovement, TransferDirection,
    },
    models::pos::Sale,
    store::{InventoryStore, SalesStore},
};

// Janela de alerta de validade, em dias.
const EXPIRATION_WARNING_DAYS: i64 = 15;

/// O razão de estoque: dono da invariante dos dois saldos por produto
/// (depósito e gôndola, ambos >= 0) e do histórico de movimentações.
///
/// Cada operação valida e muta dentro de um único escopo de escrita do
/// catálogo; operações concorrentes sobre o mesmo produto se serializam.
/// Uma operação que falha não altera nada: reexecutá-la contra o mesmo
/// estado falha de novo, do mesmo jeito.
#[derive(Clone)]
pub struct InventoryService {
    store: InventoryStore,
    sales: SalesStore,
}

/// Resultado do consumo de uma venda: produtos cuja gôndola ficou negativa.
#[derive(Debug, Default)]
pub struct ConsumptionReport {
    pub oversold: Vec<Uuid>,
}

pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub unit: ProductUnit,
    pub price_per_unit: Decimal,
    pub channel_prices: HashMap<String, Decimal>,
    pub cost_price: Option<Decimal>,
    pub initial_warehouse_stock: Decimal,
    pub initial_store_stock: Decimal,
    pub min_stock_warehouse: Decimal,
    pub min_stock_store: Decimal,
    pub sku: String,
    pub scale_code: String,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub next_expiration_date: Option<NaiveDate>,
}

/// Campos descritivos editáveis sem tocar nos saldos.
pub struct ProductEdit {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub channel_prices: Option<HashMap<String, Decimal>>,
    pub cost_price: Option<Decimal>,
    pub min_stock_warehouse: Option<Decimal>,
    pub min_stock_store: Option<Decimal>,
    pub next_expiration_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl InventoryService {
    pub fn new(store: InventoryStore, sales: SalesStore) -> Self {
        Self { store, sales }
    }

    // =========================================================================
    //  CATÁLOGO
    // =========================================================================

    pub async fn create_product(
        &self,
        company_id: Uuid,
        new: NewProduct,
    ) -> Result<Product, AppError> {
        if new.initial_warehouse_stock.is_sign_negative()
            || new.initial_store_stock.is_sign_negative()
        {
            return Err(AppError::InvalidInput("estoque inicial negativo"));
        }
        if !new.unit.accepts(new.initial_warehouse_stock) || !new.unit.accepts(new.initial_store_stock)
        {
            return Err(AppError::InvalidInput(
                "produto unitário exige quantidades inteiras",
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            company_id,
            name: new.name,
            category: new.category,
            unit: new.unit,
            price_per_unit: new.price_per_unit,
            channel_prices: new.channel_prices,
            cost_price: new.cost_price,
            current_stock: new.initial_warehouse_stock,
            exposed_stock: new.initial_store_stock,
            min_stock_warehouse: new.min_stock_warehouse,
            min_stock_store: new.min_stock_store,
            sku: new.sku,
            scale_code: new.scale_code,
            barcode: new.barcode,
            image_url: new.image_url,
            next_expiration_date: new.next_expiration_date,
            created_at: now,
            updated_at: now,
        };

        Ok(self.store.insert_product(product).await)
    }

    pub async fn get_product(&self, company_id: Uuid, product_id: Uuid) -> Result<Product, AppError> {
        self.store
            .get_product(company_id, product_id)
            .await
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn list_products(&self, company_id: Uuid) -> Vec<Product> {
        self.store.list_products(company_id).await
    }

    /// Edição descritiva: nunca toca current_stock/exposed_stock nem a
    /// unidade (fixa na criação).
    pub async fn update_product(
        &self,
        company_id: Uuid,
        product_id: Uuid,
        edit: ProductEdit,
    ) -> Result<Product, AppError> {
        self.store
            .with_product_mut(company_id, product_id, |p| {
                if let Some(name) = edit.name {
                    p.name = name;
                }
                if let Some(category) = edit.category {
                    p.category = category;
                }
                if let Some(price) = edit.price_per_unit {
                    if price.is_sign_negative() {
                        return Err(AppError::InvalidInput("preço negativo"));
                    }
                    p.price_per_unit = price;
                }
                if let Some(channel_prices) = edit.channel_prices {
                    p.channel_prices = channel_prices;
                }
                if let Some(cost) = edit.cost_price {
                    p.cost_price = Some(cost);
                }
                if let Some(min) = edit.min_stock_warehouse {
                    p.min_stock_warehouse = min;
                }
                if let Some(min) = edit.min_stock_store {
                    p.min_stock_store = min;
                }
                if let Some(date) = edit.next_expiration_date {
                    p.next_expiration_date = Some(date);
                }
                if let Some(url) = edit.image_url {
                    p.image_url = Some(url);
                }
                Ok(p.clone())
            })
            .await
    }

    /// Remoção é recusada enquanto vendas ou movimentações referenciarem o
    /// produto: o histórico é append-only e não pode ficar órfão.
    pub async fn delete_product(&self, company_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        // Confere existência antes dos guards para devolver 404 correto
        self.get_product(company_id, product_id).await?;

        if self.sales.product_has_sales(product_id).await
            || self.store.product_has_movements(product_id).await
        {
            return Err(AppError::ProductInUse);
        }

        self.store.remove_product(company_id, product_id).await
    }

    // =========================================================================
    //  RAZÃO DE ESTOQUE (as quatro operações)
    // =========================================================================

    /// Entrada de mercadoria: soma SEMPRE no depósito, nunca direto na
    /// gôndola. Sem limite superior.
    pub async fn restock(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        amount: Decimal,
        new_expiration: Option<NaiveDate>,
    ) -> Result<Product, AppError> {
        let product = self
            .store
            .with_product_mut(company_id, product_id, |p| {
                Self::check_amount(p.unit, amount)?;
                p.current_stock += amount;
                if let Some(date) = new_expiration {
                    p.next_expiration_date = Some(date);
                }
                Ok(p.clone())
            })
            .await?;

        self.store
            .record_movement(StockMovement {
                id: Uuid::new_v4(),
                company_id,
                product_id,
                movement_type: MovementType::Entry,
                from: StockLocation::Supplier,
                to: Some(StockLocation::Warehouse),
                quantity: amount,
                reason: "Entrada de Mercadoria / Compra".to_string(),
                timestamp: Utc::now(),
                user_id,
            })
            .await;

        Ok(product)
    }

    /// Transferência entre depósito e gôndola. A quantidade total
    /// (current + exposed) é invariante; origem insuficiente aborta sem
    /// mutar nada.
    pub async fn transfer(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        amount: Decimal,
        direction: TransferDirection,
    ) -> Result<Product, AppError> {
        let product = self
            .store
            .with_product_mut(company_id, product_id, |p| {
                Self::check_amount(p.unit, amount)?;
                match direction {
                    TransferDirection::ToStore => {
                        if p.current_stock < amount {
                            return Err(AppError::InsufficientStock);
                        }
                        p.current_stock -= amount;
                        p.exposed_stock += amount;
                    }
                    TransferDirection::ToWarehouse => {
                        if p.exposed_stock < amount {
                            return Err(AppError::InsufficientStock);
                        }
                        p.exposed_stock -= amount;
                        p.current_stock += amount;
                    }
                }
                Ok(p.clone())
            })
            .await?;

        let (from, to, reason) = match direction {
            TransferDirection::ToStore => (
                StockLocation::Warehouse,
                StockLocation::Storefront,
                "Reposição de Loja",
            ),
            TransferDirection::ToWarehouse => (
                StockLocation::Storefront,
                StockLocation::Warehouse,
                "Retorno ao Depósito",
            ),
        };

        self.store
            .record_movement(StockMovement {
                id: Uuid::new_v4(),
                company_id,
                product_id,
                movement_type: MovementType::Transfer,
                from,
                to: Some(to),
                quantity: amount,
                reason: reason.to_string(),
                timestamp: Utc::now(),
                user_id,
            })
            .await;

        Ok(product)
    }

    /// Baixa por perda: subtrai só do local escolhido; saldo insuficiente
    /// aborta sem mutar nada.
    pub async fn loss(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        amount: Decimal,
        source: LossSource,
        reason: Option<String>,
    ) -> Result<Product, AppError> {
        let product = self
            .store
            .with_product_mut(company_id, product_id, |p| {
                Self::check_amount(p.unit, amount)?;
                match source {
                    LossSource::Store => {
                        if p.exposed_stock < amount {
                            return Err(AppError::InsufficientStock);
                        }
                        p.exposed_stock -= amount;
                    }
                    LossSource::Warehouse => {
                        if p.current_stock < amount {
                            return Err(AppError::InsufficientStock);
                        }
                        p.current_stock -= amount;
                    }
                }
                Ok(p.clone())
            })
            .await?;

        self.store
            .record_movement(StockMovement {
                id: Uuid::new_v4(),
                company_id,
                product_id,
                movement_type: MovementType::Loss,
                from: match source {
                    LossSource::Store => StockLocation::Storefront,
                    LossSource::Warehouse => StockLocation::Warehouse,
                },
                to: None,
                quantity: amount,
                reason: reason.unwrap_or_else(|| "Vencimento".to_string()),
                timestamp: Utc::now(),
                user_id,
            })
            .await;

        Ok(product)
    }

    /// Consumo de venda: baixa a gôndola de cada item, TODOS dentro de um
    /// único escopo de lock (uma venda nunca aplica parcialmente).
    ///
    /// Política explícita de oversell: este caminho não valida saldo. Um
    /// carrinho montado contra dados velhos pode deixar a gôndola negativa;
    /// a venda conclui mesmo assim e o produto fica sinalizado para
    /// reconciliação. Não gera StockMovement: a própria venda é o registro.
    pub async fn consume_sale(&self, sale: &Sale) -> ConsumptionReport {
        let company_id = sale.company_id;
        let lines: Vec<(Uuid, Decimal)> =
            sale.items.iter().map(|i| (i.product_id, i.quantity)).collect();

        self.store
            .with_catalog_mut(move |products| {
                let mut report = ConsumptionReport::default();
                for (product_id, quantity) in lines {
                    let Some(p) = products
                        .get_mut(&product_id)
                        .filter(|p| p.company_id == company_id)
                    else {
                        tracing::warn!(%product_id, "venda referencia produto inexistente");
                        continue;
                    };
                    p.exposed_stock -= quantity;
                    p.updated_at = Utc::now();
                    if p.exposed_stock.is_sign_negative() {
                        tracing::warn!(
                            %product_id,
                            exposed = %p.exposed_stock,
                            "gôndola negativa após consumo de venda (oversell)"
                        );
                        report.oversold.push(product_id);
                    }
                }
                report
            })
            .await
    }

    // =========================================================================
    //  LEITURAS DERIVADAS (consultivas, nunca bloqueiam)
    // =========================================================================

    pub async fn list_movements(&self, company_id: Uuid) -> Vec<StockMovement> {
        self.store.list_movements(company_id).await
    }

    pub async fn stock_alerts(&self, company_id: Uuid) -> Vec<StockAlert> {
        let today = Utc::now().date_naive();
        self.store
            .list_products(company_id)
            .await
            .into_iter()
            .filter_map(|p| {
                let expiration = expiration_status(p.next_expiration_date, today);
                let reorder = p.needs_warehouse_reorder();
                let replenish = p.needs_shelf_replenishment();
                if reorder || replenish || expiration != ExpirationStatus::Ok {
                    Some(StockAlert {
                        product_id: p.id,
                        product_name: p.name,
                        reorder_from_supplier: reorder,
                        replenish_shelf: replenish,
                        expiration,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Subconjunto com algum limiar de estoque cruzado (entrada do gerador
    /// de insights e do contador do painel).
    pub async fn low_stock_products(&self, company_id: Uuid) -> Vec<Product> {
        self.store
            .list_products(company_id)
            .await
            .into_iter()
            .filter(|p| p.needs_warehouse_reorder() || p.needs_shelf_replenishment())
            .collect()
    }

    /// Arquivo de carga das balanças (Toledo, Filizola, Elgin): uma linha
    /// de largura fixa por produto do catálogo, pronta para o ITENS_BALANCA.txt.
    pub async fn scale_file(&self, company_id: Uuid) -> String {
        self.store
            .list_products(company_id)
            .await
            .iter()
            .map(scale_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn check_amount(unit: ProductUnit, amount: Decimal) -> Result<(), AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput("quantidade deve ser positiva"));
        }
        if !unit.accepts(amount) {
            return Err(AppError::InvalidInput(
                "produto unitário exige quantidades inteiras",
            ));
        }
        Ok(())
    }
}

/// Linha no formato lido pelos softwares de balança: código PLU com zeros à
/// esquerda (6), flag de item pesável, preço em centavos sem separador (6),
/// flag de validade, nome preenchido até 25 colunas.
fn scale_line(p: &Product) -> String {
    let cents = (p.price_per_unit.round_dp(2) * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or(0);
    format!("{:0>6} 1 {:06} 0 {:<25}", p.scale_code, cents, p.name)
}

/// Status de validade: vencido se a data já passou, alerta se vence dentro
/// de 15 dias, ok caso contrário (ou sem data).
pub fn expiration_status(date: Option<NaiveDate>, today: NaiveDate) -> ExpirationStatus {
    match date {
        None => ExpirationStatus::Ok,
        Some(date) => {
            let days = (date - today).num_days();
            if days < 0 {
                ExpirationStatus::Expired
            } else if days < EXPIRATION_WARNING_DAYS {
                ExpirationStatus::Warning
            } else {
                ExpirationStatus::Ok
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pos::{DocumentType, PaymentMethod, SaleItem};
    use chrono::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service() -> InventoryService {
        InventoryService::new(InventoryStore::new(), SalesStore::new())
    }

    async fn seed_product(
        svc: &InventoryService,
        company_id: Uuid,
        unit: ProductUnit,
        warehouse: &str,
        store: &str,
    ) -> Product {
        svc.create_product(
            company_id,
            NewProduct {
                name: "Castanha do Pará".into(),
                category: "Oleaginosas".into(),
                unit,
                price_per_unit: dec("85.00"),
                channel_prices: HashMap::new(),
                cost_price: None,
                initial_warehouse_stock: dec(warehouse),
                initial_store_stock: dec(store),
                min_stock_warehouse: dec("10"),
                min_stock_store: dec("2"),
                sku: "CP-001".into(),
                scale_code: "101".into(),
                barcode: None,
                image_url: None,
                next_expiration_date: None,
            },
        )
        .await
        .unwrap()
    }

    fn sale_of(company_id: Uuid, product: &Product, quantity: Decimal) -> Sale {
        let item = SaleItem {
            product_id: product.id,
            name: product.name.clone(),
            quantity,
            price: product.price_per_unit,
            total: product.price_per_unit * quantity,
            unit: product.unit,
        };
        Sale {
            id: Uuid::new_v4(),
            company_id,
            timestamp: Utc::now(),
            items: vec![item],
            total_amount: product.price_per_unit * quantity,
            payment_method: PaymentMethod::Cash,
            document_type: DocumentType::Cupom,
            customer_id: None,
            nf_cpf: None,
            seller_id: Uuid::new_v4(),
            origin: "Balcão".into(),
        }
    }

    #[tokio::test]
    async fn restock_adds_to_warehouse_only_and_records_movement() {
        let svc = service();
        let company = Uuid::new_v4();
        let user = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        let updated = svc.restock(company, user, p.id, dec("5"), None).await.unwrap();
        assert_eq!(updated.current_stock, dec("15"));
        assert_eq!(updated.exposed_stock, dec("2"));

        let movements = svc.list_movements(company).await;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].movement_type, MovementType::Entry);
        assert_eq!(movements[0].from, StockLocation::Supplier);
        assert_eq!(movements[0].to, Some(StockLocation::Warehouse));
        assert_eq!(movements[0].quantity, dec("5"));
    }

    #[tokio::test]
    async fn restock_rejects_non_positive_amount() {
        let svc = service();
        let company = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        let err = svc
            .restock(company, Uuid::new_v4(), p.id, dec("0"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        // Nada mudou e nenhum movimento foi gravado
        let p = svc.get_product(company, p.id).await.unwrap();
        assert_eq!(p.current_stock, dec("10"));
        assert!(svc.list_movements(company).await.is_empty());
    }

    #[tokio::test]
    async fn transfer_preserves_total_stock() {
        let svc = service();
        let company = Uuid::new_v4();
        let user = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        let updated = svc
            .transfer(company, user, p.id, dec("6"), TransferDirection::ToStore)
            .await
            .unwrap();
        assert_eq!(updated.current_stock, dec("4"));
        assert_eq!(updated.exposed_stock, dec("8"));
        assert_eq!(updated.total_stock(), dec("12"));

        let back = svc
            .transfer(company, user, p.id, dec("3"), TransferDirection::ToWarehouse)
            .await
            .unwrap();
        assert_eq!(back.current_stock, dec("7"));
        assert_eq!(back.exposed_stock, dec("5"));
        assert_eq!(back.total_stock(), dec("12"));
    }

    #[tokio::test]
    async fn insufficient_transfer_changes_nothing_and_fails_identically() {
        let svc = service();
        let company = Uuid::new_v4();
        let user = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        // Gôndola só tem 2; pedir 5 falha duas vezes do mesmo jeito
        for _ in 0..2 {
            let err = svc
                .transfer(company, user, p.id, dec("5"), TransferDirection::ToWarehouse)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InsufficientStock));

            let p = svc.get_product(company, p.id).await.unwrap();
            assert_eq!(p.current_stock, dec("10"));
            assert_eq!(p.exposed_stock, dec("2"));
        }
        assert!(svc.list_movements(company).await.is_empty());
    }

    #[tokio::test]
    async fn loss_decrements_only_the_chosen_location() {
        let svc = service();
        let company = Uuid::new_v4();
        let user = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "5").await;

        let updated = svc
            .loss(company, user, p.id, dec("3"), LossSource::Store, None)
            .await
            .unwrap();
        assert_eq!(updated.current_stock, dec("10"));
        assert_eq!(updated.exposed_stock, dec("2"));

        let movements = svc.list_movements(company).await;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].movement_type, MovementType::Loss);
        assert_eq!(movements[0].reason, "Vencimento");
        assert_eq!(movements[0].from, StockLocation::Storefront);
    }

    #[tokio::test]
    async fn insufficient_loss_changes_nothing() {
        let svc = service();
        let company = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "1", "5").await;

        let err = svc
            .loss(company, Uuid::new_v4(), p.id, dec("2"), LossSource::Warehouse, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));

        let p = svc.get_product(company, p.id).await.unwrap();
        assert_eq!(p.current_stock, dec("1"));
        assert_eq!(p.exposed_stock, dec("5"));
    }

    #[tokio::test]
    async fn unit_products_reject_fractional_quantities() {
        let svc = service();
        let company = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Un, "48", "12").await;

        let err = svc
            .restock(company, Uuid::new_v4(), p.id, dec("1.5"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn sale_consumption_allows_negative_exposed_and_flags_oversell() {
        let svc = service();
        let company = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "9", "5").await;

        // Consome exatamente o que tem: zera sem flag
        let report = svc.consume_sale(&sale_of(company, &p, dec("5"))).await;
        assert!(report.oversold.is_empty());
        let after = svc.get_product(company, p.id).await.unwrap();
        assert_eq!(after.exposed_stock, dec("0"));

        // Uma venda a mais contra dados velhos: gôndola vai a -1, sinalizada
        let report = svc.consume_sale(&sale_of(company, &p, dec("1"))).await;
        assert_eq!(report.oversold, vec![p.id]);
        let after = svc.get_product(company, p.id).await.unwrap();
        assert_eq!(after.exposed_stock, dec("-1"));
        assert_eq!(after.current_stock, dec("9"));
    }

    #[tokio::test]
    async fn full_reconciliation_scenario() {
        // {10, 2} -> entrada 5 -> {15, 2} -> transfer 6 -> {9, 8}
        // -> perda 3 (loja) -> {9, 5} -> venda 5 -> {9, 0} -> venda 1 -> {9, -1}
        let svc = service();
        let company = Uuid::new_v4();
        let user = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        let p1 = svc.restock(company, user, p.id, dec("5"), None).await.unwrap();
        assert_eq!((p1.current_stock, p1.exposed_stock), (dec("15"), dec("2")));

        let p2 = svc
            .transfer(company, user, p.id, dec("6"), TransferDirection::ToStore)
            .await
            .unwrap();
        assert_eq!((p2.current_stock, p2.exposed_stock), (dec("9"), dec("8")));

        let p3 = svc
            .loss(company, user, p.id, dec("3"), LossSource::Store, None)
            .await
            .unwrap();
        assert_eq!((p3.current_stock, p3.exposed_stock), (dec("9"), dec("5")));

        svc.consume_sale(&sale_of(company, &p, dec("5"))).await;
        let p4 = svc.get_product(company, p.id).await.unwrap();
        assert_eq!((p4.current_stock, p4.exposed_stock), (dec("9"), dec("0")));

        let report = svc.consume_sale(&sale_of(company, &p, dec("1"))).await;
        assert_eq!(report.oversold, vec![p.id]);
        let p5 = svc.get_product(company, p.id).await.unwrap();
        assert_eq!((p5.current_stock, p5.exposed_stock), (dec("9"), dec("-1")));

        // Três movimentações auditadas (entrada, transferência, perda);
        // vendas não geram movimento, a própria venda é o registro.
        assert_eq!(svc.list_movements(company).await.len(), 3);
    }

    #[tokio::test]
    async fn delete_is_rejected_while_referenced() {
        let svc = service();
        let company = Uuid::new_v4();
        let p = seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        svc.restock(company, Uuid::new_v4(), p.id, dec("1"), None)
            .await
            .unwrap();

        let err = svc.delete_product(company, p.id).await.unwrap_err();
        assert!(matches!(err, AppError::ProductInUse));

        // Produto sem histórico pode ser removido
        let fresh = seed_product(&svc, company, ProductUnit::Un, "3", "0").await;
        svc.delete_product(company, fresh.id).await.unwrap();
    }

    #[tokio::test]
    async fn scale_file_uses_fixed_width_lines() {
        let svc = service();
        let company = Uuid::new_v4();
        seed_product(&svc, company, ProductUnit::Kg, "10", "2").await;

        // PLU com zeros à esquerda, R$ 85,00 vira 008500, nome em 25 colunas
        let file = svc.scale_file(company).await;
        assert_eq!(file, format!("000101 1 008500 0 {:<25}", "Castanha do Pará"));

        svc.create_product(
            company,
            NewProduct {
                name: "Hibisco".into(),
                category: "Chás".into(),
                unit: ProductUnit::Kg,
                price_per_unit: dec("7.9"),
                channel_prices: HashMap::new(),
                cost_price: None,
                initial_warehouse_stock: dec("4"),
                initial_store_stock: dec("1"),
                min_stock_warehouse: dec("1"),
                min_stock_store: dec("1"),
                sku: "CH-001".into(),
                scale_code: "103".into(),
                barcode: None,
                image_url: None,
                next_expiration_date: None,
            },
        )
        .await
        .unwrap();

        let file = svc.scale_file(company).await;
        let lines: Vec<&str> = file.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l.starts_with("000103 1 000790 0 Hibisco")));
    }

    #[test]
    fn expiration_windows() {
        let today = Utc::now().date_naive();
        assert_eq!(
            expiration_status(Some(today - Duration::days(1)), today),
            ExpirationStatus::Expired
        );
        assert_eq!(
            expiration_status(Some(today + Duration::days(10)), today),
            ExpirationStatus::Warning
        );
        assert_eq!(
            expiration_status(Some(today + Duration::days(20)), today),
            ExpirationStatus::Ok
        );
        assert_eq!(expiration_status(None, today), ExpirationStatus::Ok);
    }
}
