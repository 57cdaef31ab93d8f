//! Alipay open-platform client.
//!
//! This crate builds signed gateway requests, renders the auto-submitting
//! page-pay form, and verifies asynchronous payment notifications. It does
//! no I/O: the caller serves the returned HTML and hands over received
//! notification bodies.
//!
//! # Features
//!
//! - **Key normalization**: bare base64 keys are wrapped in the PEM envelope for their role
//! - **Canonical signing**: sorted `key=value&...` sign-strings signed with RSA2 (RSA-SHA256)
//! - **Page pay**: an HTML form posting the signed request to the gateway
//! - **Notifications**: form-encoded callback decoding and signature verification
//!
//! Signing and verification never return errors to the caller: a failed
//! signature is carried as [`SignOutcome::Failed`] and rendered as
//! `sign=false`, and a failed verification is `false`.
//!
//! # Example
//!
//! ```ignore
//! use alipay_lib::{AlipayClient, Amount, CallbackBody, ClientConfig, NotifyUri, PagePayOrder};
//!
//! let config = ClientConfig::new("2014072300007148", ClientConfig::PRODUCTION_GATEWAY, public_key, private_key)
//!     .with_notify_uri(NotifyUri::new("https://shop.example/return", "https://shop.example/notify"));
//! let client = AlipayClient::new(config);
//!
//! // Render to the browser
//! let html = client.pay(&PagePayOrder::new("ORDER123", "Test", Amount::from_yuan(1)))?;
//!
//! // Later, in the notify_url handler
//! let body = CallbackBody::from_form_encoded(&raw_post_body)?;
//! if client.verify_sign(&body) {
//!     // trust body.trade_status(), body.out_trade_no(), ...
//! }
//! ```

pub mod amount;
pub mod client;
pub mod config;
pub mod errors;
pub mod form;
pub mod keys;
pub mod notify;
pub mod order;
pub mod params;
pub mod prelude;
pub mod signing;

/// Test utilities: fixed RSA fixtures and form assertions.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use amount::Amount;
pub use client::AlipayClient;
pub use config::{ClientConfig, NotifyUri, SignType};
pub use errors::{AlipayError, AlipayErrorCode, KeyRole};
pub use form::EscapePolicy;
pub use notify::{CallbackBody, TradeStatus};
pub use order::PagePayOrder;
pub use params::Params;
pub use signing::{SignOutcome, SignedRequest};

/// Common result alias for Alipay client operations.
pub type Result<T> = std::result::Result<T, AlipayError>;
