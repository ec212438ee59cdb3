//! Donate command.

use tipjar_ops::{DonationAck, HttpReply};
use tipjar_x402::discovery::DONATION_TIERS_USD;
use tracing::info;

use crate::context::TipjarContext;
use crate::error::{CliError, CliResult};
use crate::output::{DonateOutput, OutputFormat, Render};

/// Arguments of the donate command.
#[derive(Debug, Clone, Default)]
pub struct DonateArgs {
    pub amount: f64,
    pub name: Option<String>,
    pub message: Option<String>,
    /// Raw proof header value.
    pub proof: Option<String>,
    /// Payer to build a proof for when no raw proof is given.
    pub payer: Option<String>,
    pub transaction: Option<String>,
    /// Use the fixed-tier endpoint.
    pub fixed: bool,
}

impl DonateArgs {
    /// Proof header value to present to the gate.
    fn proof_header(&self) -> CliResult<String> {
        match (&self.proof, &self.payer) {
            (Some(proof), _) => Ok(proof.clone()),
            (None, Some(payer)) => Ok(tipjar_x402::codec::encode(
                payer,
                self.transaction.as_deref(),
            )),
            (None, None) => Err(CliError::user("Provide --proof or --payer")),
        }
    }

    fn body(&self) -> CliResult<Vec<u8>> {
        let mut body = serde_json::json!({ "amount": self.amount });
        if let Some(name) = &self.name {
            body["name"] = name.as_str().into();
        }
        if let Some(message) = &self.message {
            body["message"] = message.as_str().into();
        }
        Ok(serde_json::to_vec(&body)?)
    }
}

/// Execute the donate command.
pub async fn donate(ctx: &TipjarContext, format: OutputFormat, args: DonateArgs) -> CliResult<String> {
    let header = args.proof_header()?;

    let reply = if args.fixed {
        if !DONATION_TIERS_USD.iter().any(|&tier| tier as f64 == args.amount) {
            return Err(CliError::user(format!(
                "Fixed donations must be one of {:?} USD",
                DONATION_TIERS_USD
            )));
        }
        ctx.endpoint.donate_fixed(Some(&header), args.amount).await
    } else {
        ctx.endpoint.write_message(Some(&header), &args.body()?).await
    };

    let output = into_output(reply)?;
    info!(
        donator = %output.data.donator,
        amount_usd = output.data.amount_usd,
        "Donation submitted"
    );
    Ok(output.render(format))
}

fn into_output(reply: HttpReply) -> CliResult<DonateOutput> {
    if !reply.is_success() {
        return Err(CliError::Rejected {
            status: reply.status,
            message: reply.error_message().unwrap_or("unknown error").to_string(),
        });
    }

    let message = reply.body["message"].as_str().unwrap_or_default().to_string();
    let data: DonationAck = serde_json::from_value(reply.body["data"].clone())?;
    Ok(DonateOutput { message, data })
}
