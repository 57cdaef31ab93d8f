//! Verify command - check a notification body's signature

use alipay_lib::{AlipayClient, CallbackBody};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::io::Read;
use std::path::Path;

use crate::ui;

/// Outcome of checking one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub verified: bool,
    /// Why verification failed
    pub reason: Option<String>,
    pub sign_string: String,
    pub out_trade_no: Option<String>,
    pub trade_status: Option<String>,
    pub total_amount: Option<String>,
}

/// Decode and verify a raw form-encoded body
pub fn inspect(client: &AlipayClient, raw: &str) -> Result<VerifyReport> {
    let body = CallbackBody::from_form_encoded(raw.trim()).context("Malformed notification body")?;
    let check = client.check_callback(&body);
    Ok(VerifyReport {
        verified: check.is_ok(),
        reason: check.err().map(|e| e.to_string()),
        sign_string: body.sign_string(),
        out_trade_no: body.out_trade_no().map(str::to_string),
        trade_status: body.trade_status().map(|s| s.to_string()),
        total_amount: body.get("total_amount").map(str::to_string),
    })
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok(raw)
        }
    }
}

pub fn run(config_path: &Path, input: Option<&Path>, verbose: bool) -> Result<()> {
    let client = super::load_client(config_path)?;
    let raw = read_input(input)?;
    let report = inspect(&client, &raw)?;

    ui::header("Notification");
    if let Some(order) = &report.out_trade_no {
        ui::key_value("Order", order);
    }
    if let Some(status) = &report.trade_status {
        ui::key_value("Status", status);
    }
    if let Some(amount) = &report.total_amount {
        ui::key_value("Amount", amount);
    }
    if verbose {
        ui::key_value("Sign string", &report.sign_string.dimmed().to_string());
    }
    ui::separator();

    if !report.verified {
        ui::error("Signature rejected");
        bail!(
            "notification signature rejected: {}",
            report.reason.as_deref().unwrap_or("unknown reason")
        );
    }
    ui::success("Signature verified");
    Ok(())
}
