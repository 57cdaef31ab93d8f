//! Init-config command - write a configuration template

use alipay_lib::{ClientConfig, NotifyUri};
use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::ui;

const PUBLIC_KEY_PLACEHOLDER: &str = "<gateway public key, PEM or bare base64>";
const PRIVATE_KEY_PLACEHOLDER: &str = "<merchant private key, PEM or bare base64>";

/// Template configuration as pretty JSON
pub fn template(sandbox: bool) -> Result<String> {
    let gateway = if sandbox {
        ClientConfig::SANDBOX_GATEWAY
    } else {
        ClientConfig::PRODUCTION_GATEWAY
    };
    let config = ClientConfig::new(
        "<app id>",
        gateway,
        PUBLIC_KEY_PLACEHOLDER,
        PRIVATE_KEY_PLACEHOLDER,
    )
    .with_notify_uri(NotifyUri::new(
        "https://example.com/alipay/return",
        "https://example.com/alipay/notify",
    ));
    Ok(serde_json::to_string_pretty(&config)?)
}

pub fn run(path: &Path, sandbox: bool, force: bool, verbose: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let json = template(sandbox)?;
    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ui::success(&format!("Wrote configuration template to {}", path.display()));
    ui::info("Fill in app_id, public_key and private_key before running 'pay'");
    if verbose {
        ui::separator();
        println!("{}", json);
    }
    Ok(())
}
