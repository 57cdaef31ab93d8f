//! Common test utilities for alipay-lib integration tests

use alipay_lib::form::encode_query;
use alipay_lib::keys::parse_private_key;
use alipay_lib::signing::{sign_params, SIGN_TYPE_FIELD};
use alipay_lib::{AlipayClient, ClientConfig, Params};
use chrono::{NaiveDate, NaiveDateTime};

#[allow(unused_imports)]
pub use alipay_lib::test_utils::{OTHER_PRIVATE_KEY_PEM, PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};

pub const APP_ID: &str = "2014072300007148";
pub const GATEWAY: &str = "https://openapi.alipay.com/gateway.do";

/// Test context with a client built from the fixture keypair
#[allow(dead_code)]
pub struct TestContext {
    pub client: AlipayClient,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        Self {
            client: AlipayClient::new(Self::config()),
        }
    }

    pub fn config() -> ClientConfig {
        ClientConfig::new(APP_ID, GATEWAY, PUBLIC_KEY_PEM, PRIVATE_KEY_PEM)
    }

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap()
    }
}

/// Build a form-encoded notification body signed with `private_key_pem`.
#[allow(dead_code)]
pub fn signed_notification_with(private_key_pem: &str, fields: &[(&str, &str)]) -> String {
    let mut params = Params::new()
        .with("app_id", APP_ID)
        .with("charset", "utf-8")
        .with("notify_time", "2024-05-01 12:31:10")
        .with("notify_type", "trade_status_sync");
    for (key, value) in fields {
        params.insert(*key, *value);
    }
    let key = parse_private_key(private_key_pem).unwrap();
    let mut body = sign_params(&params, &key).to_params();
    body.insert(SIGN_TYPE_FIELD, "RSA2");
    encode_query(&body, &[])
}

#[allow(dead_code)]
pub fn signed_notification(fields: &[(&str, &str)]) -> String {
    signed_notification_with(PRIVATE_KEY_PEM, fields)
}
