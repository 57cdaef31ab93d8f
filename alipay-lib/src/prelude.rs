//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use alipay_lib::prelude::*;
//! ```

// Client and configuration
pub use crate::client::AlipayClient;
pub use crate::config::{ClientConfig, NotifyUri, SignType};
pub use crate::form::EscapePolicy;

// Error handling
pub use crate::errors::{AlipayError, AlipayErrorCode};
pub use crate::Result;

// Requests
pub use crate::amount::Amount;
pub use crate::order::PagePayOrder;
pub use crate::params::Params;
pub use crate::signing::{SignOutcome, SignedRequest};

// Notifications
pub use crate::notify::{CallbackBody, TradeStatus};
