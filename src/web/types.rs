//! Request and response bodies of the `web` module, the types they get validated into,
//! and tests for that validation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ###################################
// ->   STRUCTS
// ###################################
/// The body of `POST /api/subscribe` as sent by the client, nothing is validated yet.
/// Unknown fields are ignored and a `null` email is treated as a missing one.
/// Goes through a JSON object first so a repeated `email` key keeps its last value.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

impl TryFrom<Map<String, Value>> for SubscribeRequest {
    type Error = DataParsingError;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        let email = match body.remove("email") {
            None | Some(Value::Null) => None,
            Some(Value::String(email)) => Some(email),
            Some(_) => return Err(DataParsingError::EmailNotAString),
        };

        Ok(Self { email })
    }
}

/// The body of a successful subscription.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeResponse {
    pub status: String,
}

impl SubscribeResponse {
    pub const IN_THE_LOOP: &'static str = "In the Loop";

    pub fn in_the_loop() -> Self {
        Self {
            status: Self::IN_THE_LOOP.to_string(),
        }
    }
}

/// An email that passed the (intentionally weak) check: present, non-empty and containing an `@`.
/// The value is kept verbatim, it is neither trimmed nor lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }
        if !value.contains('@') {
            return Err(DataParsingError::EmailMissingAt);
        }

        Ok(ValidEmail(value.to_owned()))
    }
}

impl TryFrom<SubscribeRequest> for ValidEmail {
    type Error = DataParsingError;

    fn try_from(request: SubscribeRequest) -> Result<Self, Self::Error> {
        let email = request.email.ok_or(DataParsingError::EmailMissing)?;
        ValidEmail::parse(email)
    }
}

/// One signup: the email is the store key, the time it was recorded is the value.
#[derive(Debug, Clone)]
pub struct SubscriptionRecord {
    pub email: ValidEmail,
    pub subscribed_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    pub fn new(email: ValidEmail) -> Self {
        Self::at(email, Utc::now())
    }

    pub fn at(email: ValidEmail, subscribed_at: DateTime<Utc>) -> Self {
        Self {
            email,
            subscribed_at,
        }
    }

    pub fn key(&self) -> &str {
        self.email.as_ref()
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-05-01T09:30:00.123Z`.
    pub fn timestamp(&self) -> String {
        self.subscribed_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email missing")]
    EmailMissing,
    #[error("email empty")]
    EmailEmpty,
    #[error("email does not contain an '@'")]
    EmailMissingAt,
    #[error("email is not a string")]
    EmailNotAString,
}
