//! Service level configuration, read from the environment at startup.

use std::env;
use std::path::PathBuf;

use crate::common::logging::LoggingConfig;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Credentials needed to send text messages through Twilio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_number: String,
}

impl SmsCredentials {
    /// Create a new set of credentials based on the environment. If any of
    /// the arguments is None or empty, this will also return None
    pub fn new(
        account_sid: Option<String>,
        auth_token: Option<String>,
        phone_number: Option<String>,
    ) -> Option<SmsCredentials> {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        match (
            present(account_sid),
            present(auth_token),
            present(phone_number),
        ) {
            (Some(account_sid), Some(auth_token), Some(phone_number)) => {
                Some(SmsCredentials {
                    account_sid,
                    auth_token,
                    phone_number,
                })
            }
            _ => None,
        }
    }
}

/// Stores the configuration of the running service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub addr: String,
    /// Catalog to load in place of the bundled one
    pub graph_path: Option<PathBuf>,
    /// Text messages are only available if these are set
    pub sms: Option<SmsCredentials>,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Read the configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration using the provided variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let addr = lookup("CAMPUS_NAV_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let graph_path = lookup("CAMPUS_NAV_GRAPH")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let sms = SmsCredentials::new(
            lookup("TWILIO_ACCOUNT_SID"),
            lookup("TWILIO_AUTH_TOKEN"),
            lookup("TWILIO_PHONE_NUMBER"),
        );

        ServiceConfig {
            addr,
            graph_path,
            sms,
            logging: LoggingConfig::from_lookup(&lookup),
        }
    }
}
