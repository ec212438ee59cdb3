//! Payment-proof header codec.
//!
//! The proof travels as `base64(JSON{payer, transaction?})`. Decoding is
//! pure and syntactic: no signature or ledger checks happen here.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde_json::{Map, Value};

use crate::error::MalformedProofError;
use crate::types::PaymentProof;

const FIELD_PAYER: &str = "payer";
const FIELD_TRANSACTION: &str = "transaction";

/// Standard alphabet, accepting headers with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a proof from a header value.
///
/// `transaction` is optional; a missing, empty or non-string value yields a
/// proof without a transaction reference.
pub fn decode(header_value: &str) -> Result<PaymentProof, MalformedProofError> {
    let bytes = LENIENT
        .decode(header_value.trim())
        .map_err(|e| MalformedProofError::Base64(e.to_string()))?;

    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| MalformedProofError::Json(e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(MalformedProofError::NotAnObject);
    };

    let payer = match fields.get(FIELD_PAYER) {
        Some(Value::String(payer)) => payer.clone(),
        _ => return Err(MalformedProofError::MissingPayer),
    };

    let transaction = match fields.get(FIELD_TRANSACTION) {
        Some(Value::String(tx)) if !tx.is_empty() => Some(tx.clone()),
        _ => None,
    };

    Ok(PaymentProof::new(payer, transaction))
}

/// Encode a proof header value (client side). An empty reference is omitted.
pub fn encode(payer_identity: &str, transaction_reference: Option<&str>) -> String {
    let mut fields = Map::new();
    fields.insert(FIELD_PAYER.to_string(), Value::from(payer_identity));
    if let Some(tx) = transaction_reference.filter(|tx| !tx.is_empty()) {
        fields.insert(FIELD_TRANSACTION.to_string(), Value::from(tx));
    }
    let json = Value::Object(fields).to_string();
    STANDARD.encode(json)
}

impl PaymentProof {
    /// Decode a proof from a base64-encoded header value.
    pub fn from_header(header_value: &str) -> Result<Self, MalformedProofError> {
        decode(header_value)
    }

    /// Encode this proof to a base64 string for the header.
    pub fn to_header(&self) -> String {
        encode(self.payer_identity(), self.transaction_reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(raw: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(raw)
    }

    #[test]
    fn test_decode_payer_and_transaction() {
        let header = b64(r#"{"payer":"7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU","transaction":"sig1"}"#);
        let proof = decode(&header).unwrap();
        assert_eq!(
            proof.payer_identity(),
            "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
        );
        assert_eq!(proof.transaction_reference(), Some("sig1"));
    }

    #[test]
    fn test_decode_without_transaction() {
        let proof = decode(&b64(r#"{"payer":"abc"}"#)).unwrap();
        assert_eq!(proof.payer_identity(), "abc");
        assert_eq!(proof.transaction_reference(), None);
    }

    #[test]
    fn test_decode_non_string_transaction_is_dropped() {
        let proof = decode(&b64(r#"{"payer":"abc","transaction":42}"#)).unwrap();
        assert_eq!(proof.transaction_reference(), None);

        let proof = decode(&b64(r#"{"payer":"abc","transaction":null}"#)).unwrap();
        assert_eq!(proof.transaction_reference(), None);

        let proof = decode(&b64(r#"{"payer":"abc","transaction":""}"#)).unwrap();
        assert_eq!(proof.transaction_reference(), None);
    }

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        let header = format!("  {}\t", b64(r#"{"payer":"abc"}"#));
        assert_eq!(decode(&header).unwrap().payer_identity(), "abc");
    }

    #[test]
    fn test_decode_accepts_missing_padding() {
        let unpadded = base64::engine::general_purpose::STANDARD_NO_PAD.encode(r#"{"payer":"ab"}"#);
        assert!(!unpadded.ends_with('='));

        let proof = decode(&unpadded).unwrap();
        assert_eq!(proof.payer_identity(), "ab");
        assert!(encode("ab", None).ends_with('='));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = decode("invalid-base64-!!!");
        assert!(matches!(result, Err(MalformedProofError::Base64(_))));
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode(&b64("not json at all"));
        assert!(matches!(result, Err(MalformedProofError::Json(_))));
    }

    #[test]
    fn test_decode_not_an_object() {
        let result = decode(&b64(r#"["payer"]"#));
        assert_eq!(result, Err(MalformedProofError::NotAnObject));
    }

    #[test]
    fn test_decode_missing_or_mistyped_payer() {
        let result = decode(&b64(r#"{"transaction":"sig"}"#));
        assert_eq!(result, Err(MalformedProofError::MissingPayer));

        let result = decode(&b64(r#"{"payer":12345}"#));
        assert_eq!(result, Err(MalformedProofError::MissingPayer));
    }

    #[test]
    fn test_encode_omits_absent_transaction() {
        assert_eq!(encode("abc", Some("")), encode("abc", None));

        let header = encode("abc", None);
        let raw = base64::engine::general_purpose::STANDARD
            .decode(header)
            .unwrap();
        let value: Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "payer": "abc" }));
    }

    #[test]
    fn test_roundtrip() {
        let cases = [
            ("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", Some("sig1")),
            ("0.0.12345", None),
            ("payer with \"quotes\" and ünïcode", Some("sig2")),
        ];

        for (payer, tx) in cases {
            let proof = decode(&encode(payer, tx)).unwrap();
            assert_eq!(proof.payer_identity(), payer);
            assert_eq!(proof.transaction_reference(), tx);
            assert_eq!(PaymentProof::from_header(&proof.to_header()).unwrap(), proof);
        }
    }
}
