//! Pay command - render the page-pay form for an order

use alipay_lib::{AlipayClient, Amount, PagePayOrder};
use anyhow::{Context, Result};
use std::path::Path;

use crate::ui;

/// Order details as given on the command line
#[derive(Debug, Clone)]
pub struct PayRequest {
    pub out_trade_no: String,
    pub subject: String,
    pub amount: String,
    pub body: String,
    pub product_code: String,
}

impl PayRequest {
    pub fn to_order(&self) -> Result<PagePayOrder> {
        let amount = Amount::from_str_checked(&self.amount)
            .with_context(|| format!("Invalid amount '{}'", self.amount))?;
        if !amount.is_valid_trade_amount() {
            tracing::warn!(%amount, "amount is outside the range the gateway accepts");
        }
        Ok(
            PagePayOrder::new(&self.out_trade_no, &self.subject, amount)
                .with_body(&self.body)
                .with_product_code(&self.product_code),
        )
    }
}

/// Render the payment form HTML
pub fn render(client: &AlipayClient, request: &PayRequest) -> Result<String> {
    let order = request.to_order()?;
    let html = client
        .pay(&order)
        .context("Failed to build the payment form")?;
    Ok(html)
}

pub fn run(config_path: &Path, request: &PayRequest, output: Option<&Path>, verbose: bool) -> Result<()> {
    let client = super::load_client(config_path)?;
    if !client.keys_loaded() {
        ui::warning("Key material did not parse; the form will carry sign=false");
    }

    let html = render(&client, request)?;

    if verbose {
        ui::header("Page Pay Request");
        ui::key_value("Gateway", &client.config().gateway_url);
        ui::key_value("Order", &request.out_trade_no);
        ui::key_value("Amount", &request.amount);
        ui::separator();
    }

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::success(&format!("Payment form written to {}", path.display()));
        }
        None => println!("{}", html),
    }
    Ok(())
}
