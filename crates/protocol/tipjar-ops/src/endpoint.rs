//! Framework-agnostic donation endpoints.
//!
//! [`DonationEndpoint`] composes the price gate with a [`DonationAction`] and
//! maps every outcome to an [`HttpReply`]. The gate always runs first, so a
//! request without a proof is answered 402 before its body is looked at.

use serde_json::Value;
use tipjar_x402::{PriceGate, PricedRequest};
use tracing::{debug, info, warn};

use crate::dispatcher::{ActionDispatcher, DonationAck, DonationAction, DonationParams};
use crate::error::{OpsError, OpsResult};
use crate::response::HttpReply;

/// Path of the custom-amount endpoint.
pub const WRITE_MESSAGE_PATH: &str = "/write-message";

/// Prefix of the fixed-amount endpoints (`/donate/{amount}`).
pub const DONATE_PATH_PREFIX: &str = "/donate";

/// Fields accepted in the write-message body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteMessageBody {
    pub amount: Option<f64>,
    pub name: Option<String>,
    pub message: Option<String>,
}

impl WriteMessageBody {
    /// Parse a raw JSON body.
    ///
    /// The body must be a JSON object. Fields of the wrong type are treated
    /// as absent, so a non-numeric `amount` fails amount validation later.
    pub fn parse(body: &[u8]) -> OpsResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| OpsError::InvalidRequest(e.to_string()))?;
        let fields = value
            .as_object()
            .ok_or_else(|| OpsError::InvalidRequest("body is not a JSON object".to_string()))?;

        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Ok(Self {
            amount: fields.get("amount").and_then(Value::as_f64),
            name: text("name"),
            message: text("message"),
        })
    }
}

/// Donation endpoints behind a price gate.
#[derive(Debug, Clone)]
pub struct DonationEndpoint {
    gate: PriceGate,
    action: DonationAction,
}

impl DonationEndpoint {
    /// Compose the endpoint from its gate and action.
    pub fn new(gate: PriceGate, action: DonationAction) -> Self {
        Self { gate, action }
    }

    /// The gate guarding the endpoints.
    pub fn gate(&self) -> &PriceGate {
        &self.gate
    }

    /// Handle a custom-amount donation with optional name and message.
    pub async fn write_message(&self, proof_header: Option<&str>, body: &[u8]) -> HttpReply {
        match self.try_write_message(proof_header, body).await {
            Ok(ack) => Self::acknowledge(ack),
            Err(e) => Self::fail(WRITE_MESSAGE_PATH, e),
        }
    }

    /// Handle a fixed-tier donation of `amount_usd`.
    ///
    /// The amount comes from the route, not the client, but is still checked
    /// against the configured minimum.
    pub async fn donate_fixed(&self, proof_header: Option<&str>, amount_usd: f64) -> HttpReply {
        let path = format!("{}/{}", DONATE_PATH_PREFIX, amount_usd);
        let result = async {
            let request = self.authorize(proof_header).await?;
            self.action
                .handle(
                    request.with_declared_amount(Some(amount_usd)),
                    DonationParams::default(),
                )
                .await
        }
        .await;

        match result {
            Ok(ack) => Self::acknowledge(ack),
            Err(e) => Self::fail(&path, e),
        }
    }

    async fn try_write_message(
        &self,
        proof_header: Option<&str>,
        body: &[u8],
    ) -> OpsResult<DonationAck> {
        let request = self.authorize(proof_header).await?;
        let body = WriteMessageBody::parse(body)?;
        debug!(amount = ?body.amount, has_name = body.name.is_some(), "Parsed write-message body");

        let params = DonationParams {
            name: body.name,
            message: body.message,
        };
        self.action
            .handle(request.with_declared_amount(body.amount), params)
            .await
    }

    async fn authorize(&self, proof_header: Option<&str>) -> OpsResult<PricedRequest> {
        Ok(self.gate.authorize(proof_header).await?)
    }

    fn acknowledge(ack: DonationAck) -> HttpReply {
        info!(donator = %ack.donator, amount_usd = ack.amount_usd, "Donation acknowledged");
        HttpReply::ok(ack.confirmation.clone(), ack)
    }

    fn fail(path: &str, error: OpsError) -> HttpReply {
        let reply = HttpReply::from_error(&error);
        warn!(
            path,
            status = reply.status,
            error = %error,
            suggestion = error.suggestion(),
            "Donation request failed"
        );
        reply
    }
}
