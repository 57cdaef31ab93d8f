//! Property-based tests for alipay-lib
//!
//! These tests use proptest to verify canonicalization and signing invariants
//! across a wide range of inputs. RSA signing is slow in debug builds, so the
//! signing properties run with a reduced case count.

mod common;

#[cfg(test)]
mod canonicalization_properties {
    use alipay_lib::Params;
    use proptest::prelude::*;

    fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-z_]{1,12}", "[ -~]{0,24}"), 0..12)
    }

    proptest! {
        /// Canonicalizing twice is the same as once
        #[test]
        fn canonicalize_idempotent(pairs in entries()) {
            let params: Params = pairs.into_iter().collect();
            let once = params.canonicalize();
            prop_assert!(once.is_canonical());
            prop_assert_eq!(once.canonicalize(), once);
        }

        /// Insertion order never changes the sign-string
        #[test]
        fn sign_string_ignores_insertion_order(
            map in prop::collection::btree_map("[a-z_]{1,12}", "[ -~]{0,24}", 0..12)
        ) {
            let forward: Params = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            let backward: Params = map.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
            prop_assert_eq!(forward.sign_string(), backward.sign_string());
            prop_assert_eq!(forward.canonicalize(), backward.canonicalize());
        }

        /// Stripping keys keeps the survivors in their original order
        #[test]
        fn without_keeps_order(pairs in entries(), drop in "[a-z_]{1,12}") {
            let params: Params = pairs.into_iter().collect();
            let stripped = params.without(&[drop.as_str()]);
            prop_assert!(!stripped.contains_key(&drop));
            let expected: Vec<&str> = params.keys().filter(|k| *k != drop).collect();
            prop_assert_eq!(stripped.keys().collect::<Vec<_>>(), expected);
        }
    }
}

#[cfg(test)]
mod signing_properties {
    use super::common::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};
    use alipay_lib::keys::{parse_private_key, parse_public_key};
    use alipay_lib::signing::{sign_params, verify_params};
    use alipay_lib::Params;
    use proptest::prelude::*;

    fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
        // sign and sign_type are never signed over, so keep them out
        prop::collection::vec(("[a-r]{1,8}", "\\PC{0,16}"), 1..8)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        /// sign then verify with the matching keypair always succeeds
        #[test]
        fn sign_verify_round_trip(pairs in entries()) {
            let private_key = parse_private_key(PRIVATE_KEY_PEM).unwrap();
            let public_key = parse_public_key(PUBLIC_KEY_PEM).unwrap();
            let params: Params = pairs.into_iter().collect();

            let signed = sign_params(&params, &private_key);
            prop_assert!(signed.is_signed());
            prop_assert!(verify_params(&signed.to_params(), &public_key));
        }

        /// Changing any single value after signing breaks verification
        #[test]
        fn tampering_breaks_verification(pairs in entries(), index in any::<prop::sample::Index>()) {
            let private_key = parse_private_key(PRIVATE_KEY_PEM).unwrap();
            let public_key = parse_public_key(PUBLIC_KEY_PEM).unwrap();
            let params: Params = pairs.into_iter().collect();

            let mut body = signed_body(&params, &private_key);
            let keys: Vec<String> = params.keys().map(str::to_string).collect();
            let key = &keys[index.index(keys.len())];
            let original = body.get_str(key).unwrap().to_string();
            body.insert(key.as_str(), format!("{}x", original));

            prop_assert!(!verify_params(&body, &public_key));
        }
    }

    fn signed_body(params: &Params, key: &rsa::RsaPrivateKey) -> Params {
        sign_params(params, key).to_params()
    }
}

#[cfg(test)]
mod key_properties {
    use super::common::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};
    use alipay_lib::keys::{
        is_private_key_pem, is_public_key_pem, normalize_private_key, normalize_public_key,
        parse_private_key, parse_public_key,
    };
    use proptest::prelude::*;

    fn body(pem: &str) -> String {
        pem.lines()
            .filter(|line| !line.starts_with("-----"))
            .collect()
    }

    /// Re-break a base64 body at arbitrary widths
    fn reflow(body: &str, width: usize) -> String {
        body.as_bytes()
            .chunks(width)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// A bare body in any line layout normalizes to the same key
        #[test]
        fn bare_private_body_any_width(width in 1usize..200) {
            let bare = reflow(&body(PRIVATE_KEY_PEM), width);
            let normalized = normalize_private_key(&bare);
            prop_assert!(is_private_key_pem(&normalized));
            prop_assert_eq!(
                parse_private_key(&normalized).unwrap(),
                parse_private_key(PRIVATE_KEY_PEM).unwrap()
            );
        }

        #[test]
        fn bare_public_body_any_width(width in 1usize..200) {
            let bare = reflow(&body(PUBLIC_KEY_PEM), width);
            let normalized = normalize_public_key(&bare);
            prop_assert!(is_public_key_pem(&normalized));
            prop_assert_eq!(
                parse_public_key(&normalized).unwrap(),
                parse_public_key(PUBLIC_KEY_PEM).unwrap()
            );
        }

        /// Wrapped keys pass through untouched
        #[test]
        fn normalize_is_idempotent(trailing in "[ \n]{0,3}") {
            let wrapped = format!("{}{}", PRIVATE_KEY_PEM.trim(), trailing);
            prop_assert_eq!(normalize_private_key(&wrapped), wrapped.clone());
            let normalized = normalize_private_key(&body(PRIVATE_KEY_PEM));
            prop_assert_eq!(normalize_private_key(&normalized), normalized);
        }
    }
}
