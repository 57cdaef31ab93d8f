//! Page-pay orders and their business content.

use crate::amount::Amount;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Gateway method for desktop web checkout.
pub const PAGE_PAY_METHOD: &str = "alipay.trade.page.pay";

/// Default product code for page pay.
pub const FAST_INSTANT_TRADE_PAY: &str = "FAST_INSTANT_TRADE_PAY";

fn default_product_code() -> String {
    FAST_INSTANT_TRADE_PAY.to_string()
}

/// Order details for a page-pay request.
///
/// # Examples
///
/// ```rust
/// use alipay_lib::{Amount, PagePayOrder};
///
/// let order = PagePayOrder::new("ORDER123", "Test", Amount::from_yuan(1))
///     .with_body("two coffees");
/// assert_eq!(
///     order.biz_content_json().unwrap(),
///     r#"{"out_trade_no":"ORDER123","product_code":"FAST_INSTANT_TRADE_PAY","total_amount":"1","subject":"Test","body":"two coffees"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePayOrder {
    /// Merchant-side order id.
    pub out_trade_no: String,
    /// Order title shown to the payer.
    pub subject: String,
    /// Free-text description.
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_product_code")]
    pub product_code: String,
    /// Total in yuan.
    pub total_amount: Amount,
}

/// Wire form of the business content. Field order is the serialized order.
#[derive(Serialize)]
struct BizContent<'a> {
    out_trade_no: &'a str,
    product_code: &'a str,
    total_amount: &'a Amount,
    subject: &'a str,
    body: &'a str,
}

impl PagePayOrder {
    pub fn new(
        out_trade_no: impl Into<String>,
        subject: impl Into<String>,
        total_amount: Amount,
    ) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            subject: subject.into(),
            body: String::new(),
            product_code: default_product_code(),
            total_amount,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = product_code.into();
        self
    }

    /// Compact JSON for the `biz_content` parameter.
    pub fn biz_content_json(&self) -> Result<String> {
        let biz = BizContent {
            out_trade_no: &self.out_trade_no,
            product_code: &self.product_code,
            total_amount: &self.total_amount,
            subject: &self.subject,
            body: &self.body,
        };
        Ok(serde_json::to_string(&biz)?)
    }
}
