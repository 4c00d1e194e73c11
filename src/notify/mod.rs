use std::env;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

static API_BASE: &str = "https://api.twilio.com";

/// Twilio credentials, read from the environment at send time. Nothing is
/// checked at startup; a missing variable surfaces on the first send.
#[derive(Debug)]
struct Credentials {
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl Credentials {
    fn from_env() -> Result<Self> {
        Ok(Self {
            account_sid: required("TWILIO_ACCOUNT_SID")?,
            auth_token: required("TWILIO_AUTH_TOKEN")?,
            from_number: required("TWILIO_FROM_NUMBER")?,
        })
    }
}

fn required(name: &'static str) -> Result<String> {
    env::var(name).map_err(|_| Error::Credentials(name))
}

/// Send response; everything but the message sid is ignored.
#[derive(Debug, Deserialize)]
struct MessageReceipt {
    sid: String,
}

/// Error document Twilio returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ApiFault {
    code: Option<i64>,
    message: String,
}

/// Texts `body` to `to` through the Twilio messages endpoint. Returns the
/// sid of the queued message. A failure here is the caller's to log; no
/// retrying or queueing.
pub async fn send_sms(client: &Client, to: &str, body: &str) -> Result<String> {
    let credentials = Credentials::from_env()?;
    send_message(client, API_BASE, &credentials, to, body).await
}

async fn send_message(
    client: &Client,
    api_base: &str,
    credentials: &Credentials,
    to: &str,
    body: &str,
) -> Result<String> {
    let url = format!(
        "{api_base}/2010-04-01/Accounts/{}/Messages.json",
        credentials.account_sid
    );
    let response = client
        .post(&url)
        .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
        .header(ACCEPT, "application/json")
        .form(&[
            ("To", to),
            ("From", credentials.from_number.as_str()),
            ("Body", body),
        ])
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        let receipt: MessageReceipt = serde_json::from_str(&text)?;
        log::debug!("queued message {}", receipt.sid);
        Ok(receipt.sid)
    } else {
        Err(match serde_json::from_str::<ApiFault>(&text) {
            Ok(ApiFault {
                code: Some(code),
                message,
            }) => Error::Sms(format!("{message} (code {code})")),
            Ok(ApiFault { message, .. }) => Error::Sms(message),
            Err(_) => Error::Sms(format!("unexpected {status} response: {text}")),
        })
    }
}
