// src/services/integration_service.rs

use rust_decimal::Decimal;
use serde_json::json;

use crate::models::{
    admin::StoreSettings,
    inventory::Product,
    pos::{DocumentType, PaymentMethod, Sale},
};

/// Pontes com os serviços externos (Asaas, WhatsApp, Tiny ERP, canais de
/// venda). Sem credencial configurada a chamada é silenciosamente pulada;
/// com credencial, o payload que SERIA enviado é montado e registrado no
/// log. Nenhum erro aqui jamais interrompe o fluxo de venda.
#[derive(Clone, Default)]
pub struct IntegrationService;

impl IntegrationService {
    pub fn new() -> Self {
        Self
    }

    /// Cobrança no Asaas: PIX gera QR Code, cartão processa na hora.
    /// Dinheiro nunca passa por aqui.
    pub fn create_asaas_charge(&self, settings: &StoreSettings, sale: &Sale) {
        let Some(api_key) = settings.asaas_api_key.as_deref() else {
            return;
        };

        match sale.payment_method {
            PaymentMethod::Cash => {}
            PaymentMethod::Pix => {
                let payload = json!({
                    "billingType": "PIX",
                    "value": sale.total_amount,
                    "externalReference": sale.id,
                });
                tracing::info!(
                    target: "integrations::asaas",
                    key_suffix = %mask(api_key),
                    %payload,
                    "cobrança PIX gerada"
                );
            }
            PaymentMethod::Card => {
                let payload = json!({
                    "billingType": "CREDIT_CARD",
                    "value": sale.total_amount,
                    "externalReference": sale.id,
                });
                tracing::info!(
                    target: "integrations::asaas",
                    key_suffix = %mask(api_key),
                    %payload,
                    "cobrança de cartão processada"
                );
            }
        }
    }

    /// Comprovante por WhatsApp (Cloud API). Exige token + phoneNumberId e
    /// um telefone de cliente na venda.
    pub fn send_whatsapp_receipt(
        &self,
        settings: &StoreSettings,
        sale: &Sale,
        customer_phone: Option<&str>,
    ) {
        let (Some(_token), Some(phone_number_id)) = (
            settings.whatsapp_token.as_deref(),
            settings.whatsapp_phone_number_id.as_deref(),
        ) else {
            return;
        };
        let Some(phone) = customer_phone else {
            return;
        };

        let to = normalize_br_phone(phone);
        let lines: Vec<String> = sale
            .items
            .iter()
            .map(|i| format!("{} x{} = {} {}", i.name, i.quantity, settings.currency_symbol, i.total))
            .collect();
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": {
                "body": format!(
                    "Obrigado pela compra!\n{}\nTotal: {} {}",
                    lines.join("\n"),
                    settings.currency_symbol,
                    sale.total_amount
                )
            }
        });
        tracing::info!(
            target: "integrations::whatsapp",
            phone_number_id,
            %payload,
            "comprovante enviado"
        );
    }

    /// Emissão de NF-e via Tiny ERP, só para vendas com documento NFE.
    pub fn emit_nfe_tiny(&self, settings: &StoreSettings, sale: &Sale) {
        if sale.document_type != DocumentType::Nfe {
            return;
        }
        let Some(token) = settings.tiny_erp_token.as_deref() else {
            return;
        };

        let payload = json!({
            "nota": {
                "cliente": { "cpf_cnpj": sale.nf_cpf },
                "itens": sale.items.iter().map(|i| json!({
                    "descricao": i.name,
                    "quantidade": i.quantity,
                    "valor_unitario": i.price,
                })).collect::<Vec<_>>(),
                "valor_total": sale.total_amount,
            }
        });
        tracing::info!(
            target: "integrations::tiny",
            token_suffix = %mask(token),
            %payload,
            "NF-e enviada para emissão"
        );
    }

    /// Propaga estoque e preço de um produto para os canais externos.
    /// Quantidade anunciada é o estoque TOTAL (depósito + gôndola); o preço
    /// respeita a sobrescrita por canal quando existir.
    pub fn sync_stock(&self, settings: &StoreSettings, product: &Product) {
        let quantity = announced_quantity(product);

        if let Some(token) = settings.mercadolivre_token.as_deref() {
            let payload = json!({
                "available_quantity": quantity,
                "price": product.price_for_channel("mercadolivre"),
                "sku": product.sku,
            });
            tracing::info!(
                target: "integrations::mercadolivre",
                token_suffix = %mask(token),
                %payload,
                "estoque sincronizado"
            );
        }

        if let (Some(_token), Some(user_id)) = (
            settings.nuvemshop_token.as_deref(),
            settings.nuvemshop_user_id.as_deref(),
        ) {
            let payload = json!({
                "stock": quantity,
                "price": product.price_for_channel("nuvemshop"),
                "sku": product.sku,
            });
            tracing::info!(
                target: "integrations::nuvemshop",
                user_id,
                %payload,
                "estoque sincronizado"
            );
        }
    }

    /// Webhook genérico de eventos (venda finalizada, estoque baixo...).
    pub fn notify_webhook(&self, settings: &StoreSettings, event: &str, body: serde_json::Value) {
        let Some(url) = settings.webhook_url.as_deref() else {
            return;
        };
        tracing::info!(target: "integrations::webhook", url, event, payload = %body, "evento publicado");
    }
}

// Quantidade negativa (oversell pendente de acerto) é anunciada como zero.
fn announced_quantity(product: &Product) -> Decimal {
    let total = product.total_stock();
    if total.is_sign_negative() { Decimal::ZERO } else { total }
}

/// Normaliza telefone brasileiro para E.164: só dígitos, DDI 55 na frente.
pub fn normalize_br_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with("55") && digits.len() > 11 {
        format!("+{digits}")
    } else {
        format!("+55{digits}")
    }
}

// Nunca logar credencial inteira.
fn mask(secret: &str) -> String {
    let tail: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization_adds_country_code() {
        assert_eq!(normalize_br_phone("(11) 98888-7777"), "+5511988887777");
        assert_eq!(normalize_br_phone("5511988887777"), "+5511988887777");
        assert_eq!(normalize_br_phone("11 2222-3333"), "+551122223333");
    }

    #[test]
    fn credentials_are_masked() {
        assert_eq!(mask("sk_live_abcdef1234"), "...1234");
        assert_eq!(mask("ab"), "...ab");
    }
}
