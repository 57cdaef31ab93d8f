//! Client configuration.
//!
//! A [`ClientConfig`] is built once and read-only afterwards. It can be
//! assembled in code with the builder methods or loaded from JSON:
//!
//! ```json
//! {
//!   "app_id": "2014072300007148",
//!   "uri": "https://openapi.alipay.com/gateway.do",
//!   "public_key": "MIIBIjANBg...",
//!   "private_key": "MIIEogIBAAK...",
//!   "notify_uri": { "sync": "https://shop.example/return", "async": "https://shop.example/notify" }
//! }
//! ```

use crate::form::EscapePolicy;
use crate::{AlipayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Signature algorithm tag sent as `sign_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignType {
    /// RSA with SHA-256, PKCS#1 v1.5 padding.
    #[default]
    #[serde(rename = "RSA2")]
    Rsa2,
}

impl SignType {
    /// The tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rsa2 => "RSA2",
        }
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignType {
    type Err = AlipayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RSA2" => Ok(Self::Rsa2),
            other => Err(AlipayError::UnsupportedSignType(other.to_string())),
        }
    }
}

/// Return and notification URLs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyUri {
    /// Browser return URL after payment (`return_url`).
    #[serde(default)]
    pub sync: String,

    /// Server-to-server notification URL (`notify_url`).
    #[serde(default, rename = "async")]
    pub asynchronous: String,
}

impl NotifyUri {
    pub fn new(sync: impl Into<String>, asynchronous: impl Into<String>) -> Self {
        Self {
            sync: sync.into(),
            asynchronous: asynchronous.into(),
        }
    }
}

/// Static client configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application id issued by the open platform.
    pub app_id: String,

    /// Gateway endpoint the form posts to.
    #[serde(alias = "uri")]
    pub gateway_url: String,

    /// Gateway public key (PEM or bare base64), used for verification.
    pub public_key: String,

    /// Merchant private key (PEM or bare base64), used for signing.
    pub private_key: String,

    /// Return and notification URLs.
    #[serde(default)]
    pub notify_uri: NotifyUri,

    /// Signature algorithm.
    #[serde(default)]
    pub sign_type: SignType,

    /// Request character set.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// How the business content is written into the HTML form.
    #[serde(default)]
    pub form_escape: EscapePolicy,
}

fn default_charset() -> String {
    "utf-8".to_string()
}

impl ClientConfig {
    /// Fixed SDK identifier.
    pub const SDK_TAG: &'static str = "alipay-rwson";

    /// Open-platform protocol version sent as `version`.
    pub const VERSION: &'static str = "1.0";

    /// Production gateway.
    pub const PRODUCTION_GATEWAY: &'static str = "https://openapi.alipay.com/gateway.do";

    /// Sandbox gateway.
    pub const SANDBOX_GATEWAY: &'static str = "https://openapi.alipaydev.com/gateway.do";

    /// Create a configuration with default notify URLs, sign type and charset.
    pub fn new(
        app_id: impl Into<String>,
        gateway_url: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            gateway_url: gateway_url.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            notify_uri: NotifyUri::default(),
            sign_type: SignType::default(),
            charset: default_charset(),
            form_escape: EscapePolicy::default(),
        }
    }

    /// Set the return and notification URLs.
    pub fn with_notify_uri(mut self, notify_uri: NotifyUri) -> Self {
        self.notify_uri = notify_uri;
        self
    }

    /// Set the signature algorithm.
    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Set the request character set.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the HTML escaping policy for the payment form.
    pub fn with_form_escape(mut self, policy: EscapePolicy) -> Self {
        self.form_escape = policy;
        self
    }

    /// Load a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AlipayError::Config(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AlipayError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_id", &self.app_id)
            .field("gateway_url", &self.gateway_url)
            .field("public_key", &format_args!("<{} bytes>", self.public_key.len()))
            .field("private_key", &"<redacted>")
            .field("notify_uri", &self.notify_uri)
            .field("sign_type", &self.sign_type)
            .field("charset", &self.charset)
            .field("form_escape", &self.form_escape)
            .finish()
    }
}
