//! CLI command implementations

pub mod init_config;
pub mod pay;
pub mod verify;

use alipay_lib::{AlipayClient, ClientConfig};
use anyhow::{Context, Result};
use std::path::Path;

/// Load the merchant configuration and build a client from it
pub fn load_client(config_path: &Path) -> Result<AlipayClient> {
    let config = ClientConfig::from_json_file(config_path).with_context(|| {
        format!(
            "Failed to load config from {}. Run 'alipay-demo init-config' first.",
            config_path.display()
        )
    })?;
    tracing::debug!(app_id = %config.app_id, gateway = %config.gateway_url, "loaded configuration");
    Ok(AlipayClient::new(config))
}

#[cfg(test)]
pub(crate) mod test_support {
    use alipay_lib::test_utils::TestFixtures;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write the fixture configuration into a temp dir
    pub fn write_fixture_config(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("alipay.json");
        let json = serde_json::to_string_pretty(&TestFixtures::config()).unwrap();
        std::fs::write(&path, json).unwrap();
        path
    }
}
