use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use tracing::{info, Instrument, Span};

use crate::{
    web::{
        types::{SubscribeRequest, SubscribeResponse, SubscriptionRecord, ValidEmail},
        Result,
    },
    AppState,
};

/// Puts the email on the waitlist, keyed by the email with the signup time as the value.
///
/// The body is parsed by hand instead of through the `Json` extractor, a missing
/// `Content-Type` or a malformed body must end up as the same `400` as an invalid email.
#[tracing::instrument(
    name = "Adding subscriber to the waitlist",
    skip(app_state, body),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubscribeResponse>)> {
    let request: SubscribeRequest = serde_json::from_slice(&body)?;
    let email = ValidEmail::try_from(request)?;
    Span::current().record("subscriber_email", email.as_ref());

    let record = SubscriptionRecord::new(email);
    let store_span = tracing::info_span!("Writing subscription to the store");
    app_state
        .store
        .put(record.key(), &record.timestamp())
        .instrument(store_span)
        .await?;

    info!("New subscriber succesfully added to the waitlist.");

    Ok((StatusCode::OK, Json(SubscribeResponse::in_the_loop())))
}
