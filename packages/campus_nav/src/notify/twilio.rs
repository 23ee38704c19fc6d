use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::config::service::SmsCredentials;
use crate::notify::TextSender;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01/Accounts";

/// Sends text messages through the Twilio REST API. This blocks while the
/// request is in flight, so should not be called directly from async code
#[derive(Debug, Clone)]
pub struct TwilioSender {
    credentials: SmsCredentials,
    api_base: String,
}

impl TwilioSender {
    pub fn new(credentials: SmsCredentials) -> Self {
        TwilioSender {
            credentials,
            api_base: TWILIO_API_BASE.to_string(),
        }
    }

    /// Point the sender at a different API host
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/Messages.json",
            self.api_base, self.credentials.account_sid
        )
    }
}

impl TextSender for TwilioSender {
    fn send_text(&self, recipient: &str, body: &str) -> bool {
        let form = [
            ("To", recipient),
            ("From", self.credentials.phone_number.as_str()),
            ("Body", body),
        ];

        // The client is created here rather than stored, as blocking clients
        // can't be created or dropped inside the async runtime
        let client = match Client::builder().build() {
            Ok(client) => client,
            Err(e) => {
                warn!(recipient, error = %e, "failed to create http client");
                return false;
            }
        };

        let response = client
            .post(self.messages_url())
            .basic_auth(
                &self.credentials.account_sid,
                Some(&self.credentials.auth_token),
            )
            .form(&form)
            .send();

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!(recipient, "text message sent");
                true
            }
            Ok(resp) => {
                let status = resp.status();
                warn!(recipient, %status, "text message rejected");
                false
            }
            Err(e) => {
                warn!(recipient, error = %e, "failed to send text message");
                false
            }
        }
    }
}
