use std::collections::BTreeMap;

use md5::{Digest, Md5};

use crate::domain::{PrivateKey, RequestParams};

/// Name under which the API version enters the control sum.
pub const VERSION_FIELD: &str = "version";
/// Name under which the method name enters the control sum.
pub const ACTION_FIELD: &str = "action";

/// Compute the `sum` field for a request.
///
/// The values of `params` plus `version` and `action` are concatenated in byte order of
/// their names, the private key is appended and the result is MD5-hashed. `params` itself
/// is left untouched; `version` and `action` only exist inside this computation.
pub fn control_sum(
    method: &str,
    params: &RequestParams,
    private_key: &PrivateKey,
    api_version: &str,
) -> String {
    let mut snapshot = params
        .iter()
        .filter_map(|(name, value)| value.render().map(|rendered| (name, rendered)))
        .collect::<BTreeMap<&str, String>>();
    snapshot.insert(VERSION_FIELD, api_version.to_owned());
    snapshot.insert(ACTION_FIELD, method.to_owned());

    let mut hasher = Md5::new();
    for value in snapshot.values() {
        hasher.update(value.as_bytes());
    }
    hasher.update(private_key.expose().as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use crate::domain::ParamValue;

    use super::*;

    fn key() -> PrivateKey {
        PrivateKey::new("secret").unwrap()
    }

    #[test]
    fn known_vector() {
        // md5("getUserBalanceUSD3.0secret")
        let params = RequestParams::new().with("currency", "USD");
        assert_eq!(
            control_sum("getUserBalance", &params, &key(), "3.0"),
            "6ab2dadcae4828693407084d04709e33"
        );
    }

    #[test]
    fn key_and_test_fields_are_signed_like_any_other() {
        // md5("getUserBalanceUSDpub113.0secret")
        let params = RequestParams::new()
            .with("currency", "USD")
            .with("key", "pub1")
            .with("test", 1_i64);
        assert_eq!(
            control_sum("getUserBalance", &params, &key(), "3.0"),
            "8b75ad76596675a95d1515ba6d059faa"
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let p1: RequestParams = [("phone", "380632345678"), ("sender", "Shop"), ("text", "hi")]
            .into_iter()
            .collect();
        let p2: RequestParams = [("text", "hi"), ("phone", "380632345678"), ("sender", "Shop")]
            .into_iter()
            .collect();
        assert_eq!(
            control_sum("sendSMS", &p1, &key(), "3.0"),
            control_sum("sendSMS", &p2, &key(), "3.0")
        );
    }

    #[test]
    fn any_value_change_changes_the_sum() {
        let base = RequestParams::new()
            .with("sender", "Shop")
            .with("text", "hi")
            .with("phone", "380632345678");
        let original = control_sum("sendSMS", &base, &key(), "3.0");

        for (name, replacement) in [("sender", "Shop2"), ("text", "ho"), ("phone", "380632345679")]
        {
            let changed = base.clone().with(name, replacement);
            assert_ne!(
                control_sum("sendSMS", &changed, &key(), "3.0"),
                original,
                "changing {name} did not change the sum"
            );
        }

        assert_ne!(control_sum("sendSMS", &base, &key(), "3.1"), original);
        assert_ne!(control_sum("sendSMSx", &base, &key(), "3.0"), original);
        assert_ne!(
            control_sum("sendSMS", &base, &PrivateKey::new("other").unwrap(), "3.0"),
            original
        );
    }

    #[test]
    fn caller_params_are_not_mutated() {
        let params = RequestParams::new().with("currency", "USD");
        let before = params.clone();
        let _ = control_sum("getUserBalance", &params, &key(), "3.0");
        assert_eq!(params, before);
        assert!(!params.contains(VERSION_FIELD));
        assert!(!params.contains(ACTION_FIELD));
    }

    #[test]
    fn null_values_contribute_nothing() {
        let plain = RequestParams::new().with("currency", "USD");
        let with_null = plain.clone().with("from", ParamValue::Null);
        assert_eq!(
            control_sum("getUserBalance", &plain, &key(), "3.0"),
            control_sum("getUserBalance", &with_null, &key(), "3.0")
        );
    }

    #[test]
    fn keys_sort_by_byte_value() {
        // Uppercase sorts first: Zeta, action, alpha, version.
        let params = RequestParams::new().with("alpha", "2").with("Zeta", "1");
        let expected = {
            let mut hasher = Md5::new();
            hasher.update(b"1getUserBalance23.0secret");
            format!("{:x}", hasher.finalize())
        };
        assert_eq!(
            control_sum("getUserBalance", &params, &key(), "3.0"),
            expected
        );
    }
}
