//! Asynchronous payment notifications.
//!
//! The gateway POSTs a form-encoded body to the merchant's `notify_url`.
//! [`CallbackBody`] wraps the decoded pairs and exposes the fields a
//! merchant usually acts on. Verify the signature with
//! [`crate::AlipayClient::verify_sign`] before trusting any of them.

use crate::amount::Amount;
use crate::params::Params;
use crate::signing::{verification_sign_string, SIGN_FIELD, SIGN_TYPE_FIELD};
use crate::Result;
use std::fmt;
use std::str::FromStr;

/// Trade state reported in `trade_status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TradeStatus {
    WaitBuyerPay,
    TradeClosed,
    TradeSuccess,
    TradeFinished,
    /// A status this client does not know about.
    Other(String),
}

impl TradeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::WaitBuyerPay => "WAIT_BUYER_PAY",
            Self::TradeClosed => "TRADE_CLOSED",
            Self::TradeSuccess => "TRADE_SUCCESS",
            Self::TradeFinished => "TRADE_FINISHED",
            Self::Other(s) => s,
        }
    }

    /// Funds were received.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::TradeSuccess | Self::TradeFinished)
    }

    /// No further notifications will change this trade.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::TradeClosed | Self::TradeFinished)
    }
}

impl FromStr for TradeStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "WAIT_BUYER_PAY" => Self::WaitBuyerPay,
            "TRADE_CLOSED" => Self::TradeClosed,
            "TRADE_SUCCESS" => Self::TradeSuccess,
            "TRADE_FINISHED" => Self::TradeFinished,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A received notification body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackBody {
    params: Params,
}

impl CallbackBody {
    /// Decode a raw `application/x-www-form-urlencoded` POST body.
    pub fn from_form_encoded(body: &str) -> Result<Self> {
        Ok(Self {
            params: Params::from_form_encoded(body)?,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get_str(key)
    }

    /// The base64 `sign` value.
    pub fn signature(&self) -> Option<&str> {
        self.get(SIGN_FIELD)
    }

    pub fn sign_type(&self) -> Option<&str> {
        self.get(SIGN_TYPE_FIELD)
    }

    /// The string the gateway signed: everything but `sign` and `sign_type`.
    pub fn sign_string(&self) -> String {
        verification_sign_string(&self.params)
    }

    pub fn app_id(&self) -> Option<&str> {
        self.get("app_id")
    }

    /// Merchant order id.
    pub fn out_trade_no(&self) -> Option<&str> {
        self.get("out_trade_no")
    }

    /// Gateway trade id.
    pub fn trade_no(&self) -> Option<&str> {
        self.get("trade_no")
    }

    pub fn trade_status(&self) -> Option<TradeStatus> {
        self.get("trade_status")
            .and_then(|s| TradeStatus::from_str(s).ok())
    }

    /// `total_amount`, if present. A present but unparsable value is an error.
    pub fn total_amount(&self) -> Result<Option<Amount>> {
        self.get("total_amount")
            .map(Amount::from_str_checked)
            .transpose()
    }
}

impl From<Params> for CallbackBody {
    fn from(params: Params) -> Self {
        Self { params }
    }
}
