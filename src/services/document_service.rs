// src/services/document_service.rs

use std::sync::Arc;

use genpdf::{elements, style, Element};
use rust_decimal::Decimal;

use crate::{
    common::{
        display::{format_ksh_whole, format_short_date, parse_api_date},
        error::AppError,
    },
    models::order::Order,
};

/// "order-{orderId}.json"
pub fn order_export_file_name(order: &Order) -> String {
    format!("order-{}.json", order.order_id)
}

pub fn order_print_file_name(order: &Order) -> String {
    format!("order-{}.pdf", order.order_id)
}

#[derive(Clone)]
pub struct DocumentService {
    fonts_dir: Arc<str>,
}

impl DocumentService {
    pub fn new(fonts_dir: &str) -> Self {
        Self { fonts_dir: Arc::from(fonts_dir) }
    }

    /// O pedido como a API devolveu, indentado com dois espaços.
    pub fn export_order_json(&self, order: &Order) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec_pretty(order).map_err(|e| AppError::Export(e.to_string()))
    }

    pub fn generate_order_pdf(&self, order: &Order) -> Result<Vec<u8>, AppError> {
        // Carrega a fonte da pasta configurada
        let font_family = genpdf::fonts::from_files(self.fonts_dir.as_ref(), "Roboto", None)
            .map_err(|_| AppError::FontNotFound(format!("Fonte Roboto não encontrada em {}", self.fonts_dir)))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Order #{}", order.order_id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new("MURANGA SEAL STORE").styled(style::Style::new().bold().with_font_size(18)));
        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new(format!("ORDER #{}", order.order_id))
                .styled(style::Style::new().bold().with_font_size(14)),
        );

        let date = order
            .created_at
            .as_deref()
            .and_then(parse_api_date)
            .map(format_short_date)
            .unwrap_or_else(|| "N/A".to_string());
        doc.push(elements::Paragraph::new(format!("Date: {}", date)));
        doc.push(elements::Paragraph::new(format!("Customer: {}", order.customer_name())));
        doc.push(elements::Paragraph::new(format!(
            "Contact: {} / {}",
            order.user_info.phone_number, order.user_info.email
        )));
        doc.push(elements::Paragraph::new(format!("Delivery: {}", order.delivery_line())));
        doc.push(elements::Paragraph::new(format!(
            "Status: {} | Payment: {}",
            order.display_status(),
            order.payment_label()
        )));
        doc.push(elements::Break::new(2));

        // --- TABELA DE ITENS ---
        // Pesos das colunas: Produto (4), Qtd (1), Preço (2), Total (2)
        let mut table = elements::TableLayout::new(vec![4, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Product").styled(style_bold))
            .element(elements::Paragraph::new("Qty").styled(style_bold))
            .element(elements::Paragraph::new("Unit").styled(style_bold))
            .element(elements::Paragraph::new("Total").styled(style_bold))
            .push()
            .map_err(|e| AppError::Export(e.to_string()))?;

        for line in &order.items {
            let subtotal = line.price * Decimal::from(line.quantity);
            table
                .row()
                .element(elements::Paragraph::new(line.product_id.clone()))
                .element(elements::Paragraph::new(line.quantity.to_string()))
                .element(elements::Paragraph::new(format_ksh_whole(line.price)))
                .element(elements::Paragraph::new(format_ksh_whole(subtotal)))
                .push()
                .map_err(|e| AppError::Export(e.to_string()))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAIS ---
        let mut total_paragraph = elements::Paragraph::new(format!(
            "TOTAL ({} items): {}",
            order.item_count(),
            format_ksh_whole(order.total_amount)
        ));
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::Export(e.to_string()))?;

        tracing::debug!(order = %order.order_id, size = buffer.len(), "PDF do pedido gerado");
        Ok(buffer)
    }
}
