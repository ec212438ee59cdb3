//! Proof header commands.

use tipjar_x402::{PaymentProof, HEADER_PAYMENT_RESPONSE};

use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, ProofDecodeOutput, ProofEncodeOutput, Render};

/// Execute the `proof encode` command.
pub fn proof_encode(
    format: OutputFormat,
    payer: &str,
    transaction: Option<&str>,
) -> CliResult<String> {
    if payer.trim().is_empty() {
        return Err(CliError::user("Payer address must not be empty"));
    }

    let output = ProofEncodeOutput {
        header: HEADER_PAYMENT_RESPONSE.to_string(),
        header_value: tipjar_x402::codec::encode(payer, transaction),
    };
    Ok(output.render(format))
}

/// Execute the `proof decode` command.
pub fn proof_decode(format: OutputFormat, header: &str) -> CliResult<String> {
    let proof = PaymentProof::from_header(header).map_err(tipjar_x402::X402Error::from)?;

    let output = ProofDecodeOutput {
        payer: proof.payer_identity().to_string(),
        transaction: proof.transaction_reference().map(str::to_string),
    };
    Ok(output.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[test]
    fn test_encode_then_decode() {
        let json = proof_encode(OutputFormat::Json, PAYER, Some("sig1")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let header = value["header_value"].as_str().unwrap();

        let decoded = proof_decode(OutputFormat::Json, header).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["payer"], PAYER);
        assert_eq!(value["transaction"], "sig1");
    }

    #[test]
    fn test_encode_human() {
        let output = proof_encode(OutputFormat::Human, PAYER, None).unwrap();
        assert!(output.contains("X-PAYMENT-RESPONSE"));
    }

    #[test]
    fn test_encode_rejects_empty_payer() {
        assert!(proof_encode(OutputFormat::Human, "  ", None).is_err());
    }

    #[test]
    fn test_decode_invalid() {
        let err = proof_decode(OutputFormat::Human, "invalid-base64-!!!").unwrap_err();
        assert!(matches!(err, CliError::Payment(_)));
        assert_eq!(err.exit_code(), 4);
    }
}
