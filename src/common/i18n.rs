// src/common/i18n.rs

// Catálogo estático de mensagens de erro (pt/en). O idioma vem do extrator
// Locale (Accept-Language); qualquer idioma desconhecido cai no inglês.

#[derive(Debug, Clone, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, lang: &str, code: &str) -> &'static str {
        match lang {
            "pt" => Self::pt(code),
            _ => Self::en(code),
        }
    }

    fn pt(code: &str) -> &'static str {
        match code {
            "validation" => "Um ou mais campos são inválidos.",
            "insufficient_stock" => "Estoque insuficiente no local de origem.",
            "invalid_input" => "Entrada inválida.",
            "product_not_found" => "Produto não encontrado.",
            "customer_not_found" => "Cliente não encontrado.",
            "company_not_found" => "Empresa não encontrada.",
            "plan_not_found" => "Plano não encontrado.",
            "supplier_not_found" => "Fornecedor não encontrado.",
            "purchase_order_not_found" => "Pedido de compra não encontrado.",
            "cart_not_found" => "Carrinho não encontrado.",
            "product_in_use" => "Produto possui vendas ou movimentações e não pode ser removido.",
            "subdomain_taken" => "Este subdomínio já está em uso.",
            "order_not_pending" => "Apenas pedidos pendentes podem ser recebidos ou cancelados.",
            _ => "Ocorreu um erro inesperado.",
        }
    }

    fn en(code: &str) -> &'static str {
        match code {
            "validation" => "One or more fields are invalid.",
            "insufficient_stock" => "Insufficient stock at the source location.",
            "invalid_input" => "Invalid input.",
            "product_not_found" => "Product not found.",
            "customer_not_found" => "Customer not found.",
            "company_not_found" => "Company not found.",
            "plan_not_found" => "Plan not found.",
            "supplier_not_found" => "Supplier not found.",
            "purchase_order_not_found" => "Purchase order not found.",
            "cart_not_found" => "Cart not found.",
            "product_in_use" => "Product has sales or stock movements and cannot be deleted.",
            "subdomain_taken" => "This subdomain is already in use.",
            "order_not_pending" => "Only pending orders can be received or cancelled.",
            _ => "An unexpected error occurred.",
        }
    }
}
