//! The Alipay client.
//!
//! [`AlipayClient`] owns an immutable [`ClientConfig`] and the parsed keys.
//! Keys are normalized and parsed once at construction. A key that fails to
//! parse does not fail construction: requests then carry the signing
//! failure marker and every notification fails verification.

use crate::config::ClientConfig;
use crate::form::{build_request_data, build_request_form};
use crate::keys::{normalize_private_key, normalize_public_key, parse_private_key, parse_public_key};
use crate::notify::CallbackBody;
use crate::order::{PagePayOrder, PAGE_PAY_METHOD};
use crate::params::Params;
use crate::signing::{check_signature, sign_params, SignedRequest};
use crate::{AlipayError, Result};
use chrono::{Local, NaiveDateTime};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Wire format of the `timestamp` parameter.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Client for the Alipay open-platform gateway.
///
/// # Examples
///
/// ```rust,no_run
/// use alipay_lib::{AlipayClient, Amount, ClientConfig, PagePayOrder};
///
/// # fn keys() -> (String, String) { unimplemented!() }
/// let (public_key, private_key) = keys();
/// let client = AlipayClient::new(ClientConfig::new(
///     "2014072300007148",
///     ClientConfig::PRODUCTION_GATEWAY,
///     public_key,
///     private_key,
/// ));
///
/// let html = client.pay(&PagePayOrder::new("ORDER123", "Test", Amount::from_yuan(1)))?;
/// assert!(html.starts_with("<form id='pay'"));
/// # Ok::<(), alipay_lib::AlipayError>(())
/// ```
pub struct AlipayClient {
    config: ClientConfig,
    private_key: std::result::Result<RsaPrivateKey, AlipayError>,
    public_key: std::result::Result<RsaPublicKey, AlipayError>,
}

impl AlipayClient {
    /// Build a client. Key material is normalized in the stored config.
    pub fn new(mut config: ClientConfig) -> Self {
        config.private_key = normalize_private_key(&config.private_key);
        config.public_key = normalize_public_key(&config.public_key);

        let private_key = parse_private_key(&config.private_key);
        if let Err(err) = &private_key {
            tracing::warn!(app_id = %config.app_id, "{}; requests will not be signed", err);
        }
        let public_key = parse_public_key(&config.public_key);
        if let Err(err) = &public_key {
            tracing::warn!(app_id = %config.app_id, "{}; notifications will not verify", err);
        }

        Self {
            config,
            private_key,
            public_key,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns true if both keys parsed.
    pub fn keys_loaded(&self) -> bool {
        self.private_key.is_ok() && self.public_key.is_ok()
    }

    /// Common request parameters followed by `extra`; `extra` wins on conflict.
    pub fn build_params(&self, extra: Params) -> Params {
        let mut params = Params::new()
            .with("app_id", self.config.app_id.as_str())
            .with("charset", self.config.charset.as_str())
            .with("sign_type", self.config.sign_type.as_str())
            .with("version", ClientConfig::VERSION);
        params.merge(extra);
        params
    }

    /// Canonicalize and sign. Never fails; inspect the returned outcome.
    pub fn sign(&self, params: &Params) -> SignedRequest {
        match &self.private_key {
            Ok(key) => sign_params(params, key),
            Err(err) => {
                tracing::warn!("request signing skipped: {}", err);
                SignedRequest::failed(params, err)
            }
        }
    }

    /// Signed parameters for a page-pay request at `timestamp`.
    pub fn page_pay_request(
        &self,
        order: &PagePayOrder,
        timestamp: NaiveDateTime,
    ) -> Result<SignedRequest> {
        let mut extra = Params::new();
        if !self.config.notify_uri.sync.is_empty() {
            extra.insert("return_url", self.config.notify_uri.sync.as_str());
        }
        if !self.config.notify_uri.asynchronous.is_empty() {
            extra.insert("notify_url", self.config.notify_uri.asynchronous.as_str());
        }
        extra.insert("biz_content", order.biz_content_json()?);
        extra.insert("timestamp", timestamp.format(TIMESTAMP_FORMAT).to_string());
        extra.insert("method", PAGE_PAY_METHOD);

        Ok(self.sign(&self.build_params(extra)))
    }

    /// Page-pay HTML form for `order`, timestamped now (local time).
    ///
    /// Only business-content serialization can fail; a signing failure still
    /// yields a form, whose `sign` is `false`.
    #[tracing::instrument(skip(self, order), fields(out_trade_no = %order.out_trade_no))]
    pub fn pay(&self, order: &PagePayOrder) -> Result<String> {
        self.pay_at(order, Local::now().naive_local())
    }

    /// Page-pay HTML form for `order` at a fixed `timestamp`.
    pub fn pay_at(&self, order: &PagePayOrder, timestamp: NaiveDateTime) -> Result<String> {
        let signed = self.page_pay_request(order, timestamp)?;
        let data = build_request_data(&signed.to_params());
        Ok(build_request_form(
            &self.config.gateway_url,
            &data,
            self.config.form_escape,
        ))
    }

    /// Check a notification's signature, reporting why it failed.
    pub fn check_callback(&self, body: &CallbackBody) -> Result<()> {
        match &self.public_key {
            Ok(key) => check_signature(body.params(), key),
            Err(err) => Err(err.clone()),
        }
    }

    /// Verify a notification's signature. Any failure is `false`.
    #[tracing::instrument(skip(self, body), fields(out_trade_no = body.out_trade_no().unwrap_or("")))]
    pub fn verify_sign(&self, body: &CallbackBody) -> bool {
        match self.check_callback(body) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("notification rejected: {}", err);
                false
            }
        }
    }

    /// Decode a raw form-encoded notification body and verify it.
    pub fn verify_form_body(&self, raw: &str) -> bool {
        match CallbackBody::from_form_encoded(raw) {
            Ok(body) => self.verify_sign(&body),
            Err(err) => {
                tracing::warn!("notification body undecodable: {}", err);
                false
            }
        }
    }
}

impl std::fmt::Debug for AlipayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlipayClient")
            .field("config", &self.config)
            .field("private_key_loaded", &self.private_key.is_ok())
            .field("public_key_loaded", &self.public_key.is_ok())
            .finish()
    }
}
