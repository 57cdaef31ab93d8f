//! Test fixtures: fixed RSA-2048 keypairs and a known signature vector.
//!
//! The keypairs were generated with OpenSSL and the signature vector was
//! produced by `openssl dgst -sha256 -sign` over [`SIGN_VECTOR_MESSAGE`], so it
//! cross-checks this crate against an independent RSA-SHA256 implementation.

use crate::config::ClientConfig;
use crate::form::encode_query;
use crate::keys::parse_private_key;
use crate::order::PAGE_PAY_METHOD;
use crate::params::Params;
use crate::signing::{sign_params, SignedRequest, SIGN_TYPE_FIELD};
use crate::AlipayClient;
use chrono::{NaiveDate, NaiveDateTime};

/// Merchant private key (PKCS#1).
pub const PRIVATE_KEY_PEM: &str = include_str!("../../tests/data/merchant_private_key.pem");

/// The same private key in PKCS#8 form.
pub const PKCS8_PRIVATE_KEY_PEM: &str =
    include_str!("../../tests/data/merchant_private_key_pkcs8.pem");

/// Public half of [`PRIVATE_KEY_PEM`] (SubjectPublicKeyInfo).
pub const PUBLIC_KEY_PEM: &str = include_str!("../../tests/data/merchant_public_key.pem");

/// An unrelated keypair, for wrong-key checks.
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../../tests/data/other_private_key.pem");

/// Public half of [`OTHER_PRIVATE_KEY_PEM`].
pub const OTHER_PUBLIC_KEY_PEM: &str = include_str!("../../tests/data/other_public_key.pem");

/// Canonical sign-string of [`TestFixtures::common_params`].
pub const SIGN_VECTOR_MESSAGE: &str = include_str!("../../tests/data/sign_vector.txt");

/// RSA-SHA256 signature of [`SIGN_VECTOR_MESSAGE`] under [`PRIVATE_KEY_PEM`].
pub const SIGN_VECTOR_SIGNATURE: &str = include_str!("../../tests/data/sign_vector.sig");

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Sample application id from the open-platform documentation.
    pub const APP_ID: &'static str = "2014072300007148";

    /// Parameters whose sign-string is [`SIGN_VECTOR_MESSAGE`].
    pub fn common_params() -> Params {
        Params::new()
            .with("app_id", Self::APP_ID)
            .with("charset", "utf-8")
            .with("sign_type", "RSA2")
            .with("version", ClientConfig::VERSION)
            .with("method", PAGE_PAY_METHOD)
    }

    /// Notification-shaped parameters, without `sign` or `sign_type`.
    pub fn notification_params() -> Params {
        Params::new()
            .with("app_id", Self::APP_ID)
            .with("charset", "utf-8")
            .with("gmt_create", "2024-05-01 12:31:07")
            .with("notify_id", "ac05099524730693a8b330c5ecf72da9786")
            .with("out_trade_no", "ORDER123")
            .with("subject", "Test")
            .with("total_amount", "1.00")
            .with("trade_no", "2024050122001490591000012345")
            .with("trade_status", "TRADE_SUCCESS")
    }

    /// A fixed request timestamp (2024-05-01 12:30:00).
    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .expect("valid fixture timestamp")
    }

    /// Configuration using the fixture keypair and production gateway.
    pub fn config() -> ClientConfig {
        ClientConfig::new(
            Self::APP_ID,
            ClientConfig::PRODUCTION_GATEWAY,
            PUBLIC_KEY_PEM,
            PRIVATE_KEY_PEM,
        )
    }

    pub fn client() -> AlipayClient {
        AlipayClient::new(Self::config())
    }

    /// A client configured with bare base64 key bodies.
    pub fn bare_key_client() -> AlipayClient {
        AlipayClient::new(ClientConfig::new(
            Self::APP_ID,
            ClientConfig::PRODUCTION_GATEWAY,
            pem_body(PUBLIC_KEY_PEM),
            pem_body(PRIVATE_KEY_PEM),
        ))
    }

    /// A form-encoded notification body signed the way the gateway signs one:
    /// `sign_type` is attached but not covered by the signature.
    pub fn signed_notification(fields: &[(&str, &str)]) -> String {
        let mut params = Self::notification_params();
        for (key, value) in fields {
            params.insert(*key, *value);
        }
        let signed = match parse_private_key(PRIVATE_KEY_PEM) {
            Ok(key) => sign_params(&params, &key),
            Err(err) => SignedRequest::failed(&params, &err),
        };
        let mut body = signed.to_params();
        body.insert(SIGN_TYPE_FIELD, "RSA2");
        encode_query(&body, &[])
    }
}

/// The base64 body of a PEM block, on one line.
pub fn pem_body(pem: &str) -> String {
    pem.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("-----"))
        .collect()
}
