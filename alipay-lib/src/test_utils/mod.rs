//! Test utilities for the Alipay client.
//!
//! Fixed RSA fixtures, notification builders and form assertions shared by
//! unit tests and, through the `test-utils` feature, by integration tests of
//! dependent crates.
//!
//! ```rust,ignore
//! use alipay_lib::test_utils::{assert_payment_form, TestFixtures};
//!
//! let client = TestFixtures::client();
//! let html = client.pay_at(&order, TestFixtures::timestamp())?;
//! assert_payment_form(&html, client.config().gateway_url.as_str());
//! ```

mod assertions;
pub mod fixtures;

pub use assertions::{assert_payment_form, query_param, FormAssertion};
pub use fixtures::{
    pem_body, TestFixtures, OTHER_PRIVATE_KEY_PEM, OTHER_PUBLIC_KEY_PEM, PKCS8_PRIVATE_KEY_PEM,
    PRIVATE_KEY_PEM, PUBLIC_KEY_PEM, SIGN_VECTOR_MESSAGE, SIGN_VECTOR_SIGNATURE,
};
