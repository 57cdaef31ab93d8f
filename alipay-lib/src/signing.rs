//! RSA2 request signing and notification verification.
//!
//! ## Contract
//!
//! - The signed bytes are the UTF-8 encoding of [`Params::sign_string`].
//! - RSA2 is RSA with a SHA-256 digest and PKCS#1 v1.5 padding; the
//!   signature travels base64 encoded in the `sign` field.
//! - [`sign_params`] never fails: a signing error becomes
//!   [`SignOutcome::Failed`] and the request is still returned, so the
//!   gateway rejects it at the far end.
//! - [`verify_params`] never fails either: any error (missing field, bad
//!   base64, wrong key, tampered data) is `false`. [`check_signature`] keeps
//!   the reason for callers that want it.
//! - Verification works on a copy with `sign` and `sign_type` removed; the
//!   caller's mapping is never modified and a signature never covers itself.

use crate::params::Params;
use crate::{AlipayError, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::Value;
use sha2::Sha256;

/// Parameter carrying the base64 signature.
pub const SIGN_FIELD: &str = "sign";

/// Parameter carrying the algorithm tag.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Result of signing a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutcome {
    /// Base64 RSA2 signature.
    Signed(String),
    /// Signing failed; carries the reason. Rendered as `sign=false`.
    Failed(String),
}

impl SignOutcome {
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    /// The base64 signature, if signing succeeded.
    pub fn signature(&self) -> Option<&str> {
        match self {
            Self::Signed(sig) => Some(sig),
            Self::Failed(_) => None,
        }
    }

    /// The value placed in the `sign` field.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Signed(sig) => Value::String(sig.clone()),
            Self::Failed(_) => Value::Bool(false),
        }
    }
}

/// A canonicalized parameter mapping plus its signing outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    params: Params,
    outcome: SignOutcome,
}

impl SignedRequest {
    /// A request whose signing failed before reaching RSA (e.g. no usable key).
    pub fn failed(params: &Params, err: &AlipayError) -> Self {
        Self {
            params: params.canonicalize(),
            outcome: SignOutcome::Failed(err.to_string()),
        }
    }

    /// The canonical (key-sorted) parameters, without `sign`.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn outcome(&self) -> &SignOutcome {
        &self.outcome
    }

    pub fn is_signed(&self) -> bool {
        self.outcome.is_signed()
    }

    pub fn signature(&self) -> Option<&str> {
        self.outcome.signature()
    }

    /// The full parameter set with `sign` appended last.
    pub fn to_params(&self) -> Params {
        let mut params = self.params.clone();
        params.insert(SIGN_FIELD, self.outcome.to_value());
        params
    }
}

/// Sign a UTF-8 message with RSA2, returning base64.
pub fn rsa2_sign(message: &str, key: &RsaPrivateKey) -> Result<String> {
    let signing_key = SigningKey::<Sha256>::new(key.clone());
    let signature = signing_key
        .try_sign(message.as_bytes())
        .map_err(|e| AlipayError::Signing(e.to_string()))?;
    Ok(B64.encode(signature.to_bytes()))
}

/// Verify a base64 RSA2 signature over a UTF-8 message.
pub fn rsa2_verify(message: &str, signature_b64: &str, key: &RsaPublicKey) -> Result<()> {
    let raw = B64
        .decode(signature_b64.trim())
        .map_err(|e| AlipayError::invalid_encoding(SIGN_FIELD, e))?;
    let signature = Signature::try_from(raw.as_slice())
        .map_err(|e| AlipayError::invalid_encoding(SIGN_FIELD, e))?;
    VerifyingKey::<Sha256>::new(key.clone())
        .verify(message.as_bytes(), &signature)
        .map_err(|e| AlipayError::Verification(e.to_string()))
}

/// Canonicalize and sign `params`. Never fails; see [`SignOutcome`].
pub fn sign_params(params: &Params, key: &RsaPrivateKey) -> SignedRequest {
    let params = params.canonicalize();
    let message = params.sign_string();
    tracing::debug!(
        param_count = params.len(),
        sign_string_len = message.len(),
        "signing request parameters"
    );

    let outcome = match rsa2_sign(&message, key) {
        Ok(sig) => SignOutcome::Signed(sig),
        Err(err) => {
            tracing::warn!("request signing failed: {}", err);
            SignOutcome::Failed(err.to_string())
        }
    };
    SignedRequest { params, outcome }
}

/// The sign-string of a received body: `sign` and `sign_type` removed.
pub fn verification_sign_string(body: &Params) -> String {
    body.without(&[SIGN_FIELD, SIGN_TYPE_FIELD]).sign_string()
}

/// Verify the `sign` field of `body`, reporting why it failed.
pub fn check_signature(body: &Params, key: &RsaPublicKey) -> Result<()> {
    let signature = match body.get(SIGN_FIELD) {
        Some(Value::String(sig)) => sig,
        Some(_) => {
            return Err(AlipayError::invalid_encoding(
                SIGN_FIELD,
                "signature is not a string",
            ))
        }
        None => return Err(AlipayError::MissingSignature),
    };
    rsa2_verify(&verification_sign_string(body), signature, key)
}

/// Verify the `sign` field of `body`. Any failure is `false`.
pub fn verify_params(body: &Params, key: &RsaPublicKey) -> bool {
    match check_signature(body, key) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!("signature rejected: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{parse_private_key, parse_public_key};
    use crate::test_utils::fixtures::{
        TestFixtures, OTHER_PUBLIC_KEY_PEM, PRIVATE_KEY_PEM, PUBLIC_KEY_PEM,
        SIGN_VECTOR_MESSAGE, SIGN_VECTOR_SIGNATURE,
    };

    fn private_key() -> RsaPrivateKey {
        parse_private_key(PRIVATE_KEY_PEM).unwrap()
    }

    fn public_key() -> RsaPublicKey {
        parse_public_key(PUBLIC_KEY_PEM).unwrap()
    }

    #[test]
    fn test_matches_openssl_vector() {
        let params = TestFixtures::common_params();
        assert_eq!(params.sign_string(), SIGN_VECTOR_MESSAGE);

        let signed = sign_params(&params, &private_key());
        assert_eq!(signed.signature(), Some(SIGN_VECTOR_SIGNATURE));
    }

    #[test]
    fn test_openssl_signature_verifies() {
        assert!(rsa2_verify(SIGN_VECTOR_MESSAGE, SIGN_VECTOR_SIGNATURE, &public_key()).is_ok());
    }

    #[test]
    fn test_signed_request_is_canonical_with_sign_last() {
        let params = Params::new().with("z", "1").with("a", "2");
        let signed = sign_params(&params, &private_key());
        assert!(signed.params().is_canonical());

        let full = signed.to_params();
        assert_eq!(full.keys().collect::<Vec<_>>(), vec!["a", "z", "sign"]);
        // input untouched
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn test_round_trip() {
        let body = sign_params(&TestFixtures::notification_params(), &private_key()).to_params();
        assert!(verify_params(&body, &public_key()));
    }

    #[test]
    fn test_request_signature_covers_sign_type() {
        // requests sign over sign_type; notifications never do
        let body = sign_params(&TestFixtures::common_params(), &private_key()).to_params();
        assert!(!verify_params(&body, &public_key()));
    }

    #[test]
    fn test_empty_mapping_signs() {
        let signed = sign_params(&Params::new(), &private_key());
        assert!(signed.is_signed());
        assert!(verify_params(&signed.to_params(), &public_key()));
    }

    #[test]
    fn test_tampered_value_fails() {
        let mut body = sign_params(&TestFixtures::notification_params(), &private_key()).to_params();
        assert!(verify_params(&body, &public_key()));
        body.insert("total_amount", "88.89");
        assert!(!verify_params(&body, &public_key()));
        assert!(matches!(
            check_signature(&body, &public_key()),
            Err(AlipayError::Verification(_))
        ));
    }

    #[test]
    fn test_renamed_key_fails() {
        let body = sign_params(&TestFixtures::notification_params(), &private_key()).to_params();
        let renamed: Params = body
            .into_iter()
            .map(|(k, v)| if k == "trade_no" { ("trade_No".to_string(), v) } else { (k, v) })
            .collect();
        assert!(!verify_params(&renamed, &public_key()));
    }

    #[test]
    fn test_wrong_public_key_fails() {
        let other = parse_public_key(OTHER_PUBLIC_KEY_PEM).unwrap();
        let body = sign_params(&TestFixtures::notification_params(), &private_key()).to_params();
        assert!(verify_params(&body, &public_key()));
        assert!(!verify_params(&body, &other));
    }

    #[test]
    fn test_sign_type_is_not_signed_over() {
        let body = Params::new().with("foo", "bar").with("sign", "x");
        assert_eq!(verification_sign_string(&body), "foo=bar");

        let body = body.with("sign_type", "RSA2");
        assert_eq!(verification_sign_string(&body), "foo=bar");
    }

    #[test]
    fn test_malformed_signatures_are_false() {
        let key = public_key();
        let missing = Params::new().with("foo", "bar");
        assert_eq!(check_signature(&missing, &key), Err(AlipayError::MissingSignature));
        assert!(!verify_params(&missing, &key));

        let not_base64 = Params::new().with("foo", "bar").with("sign", "***");
        assert!(matches!(
            check_signature(&not_base64, &key),
            Err(AlipayError::InvalidEncoding { .. })
        ));

        let failure_marker = Params::new().with("foo", "bar").with("sign", false);
        assert!(!verify_params(&failure_marker, &key));
    }

    #[test]
    fn test_well_formed_wrong_signature_fails() {
        // valid base64 and length, but a signature over different data
        let mut body = sign_params(&TestFixtures::notification_params(), &private_key()).to_params();
        body.insert(SIGN_FIELD, SIGN_VECTOR_SIGNATURE);
        assert!(!verify_params(&body, &public_key()));
        assert!(matches!(
            check_signature(&body, &public_key()),
            Err(AlipayError::Verification(_))
        ));
    }

    #[test]
    fn test_failed_outcome_renders_false() {
        let err = AlipayError::Signing("no key".into());
        let signed = SignedRequest::failed(&TestFixtures::common_params(), &err);
        assert!(!signed.is_signed());
        assert_eq!(signed.to_params().get(SIGN_FIELD), Some(&Value::Bool(false)));
        assert_eq!(
            signed.outcome(),
            &SignOutcome::Failed("signing failed: no key".to_string())
        );
    }
}
