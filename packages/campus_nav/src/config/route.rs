//! Defines the requests which users can make of the API, and the
//! conversions from the loosely typed JSON bodies which users send into the
//! strictly typed requests which the service acts on.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields which must be present when requesting a route
pub const ROUTE_FIELDS: [&str; 2] = ["start", "end"];

/// Fields which must be present when requesting a text message
pub const SMS_FIELDS: [&str; 2] = ["phone", "path"];

/// Problems with the body of a user request
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("No JSON data provided")]
    NoData,

    #[error("Missing required fields")]
    MissingFields {
        required: Vec<&'static str>,
        received: Vec<String>,
    },

    #[error("Node IDs must be integers")]
    InvalidIds { start: Value, end: Value },

    #[error("Invalid phone number format")]
    InvalidPhone,
}

/// Check that a request body is a non-empty JSON object with all of the
/// required fields, returning the object if so
pub fn check_fields(
    body: Value,
    required: &[&'static str],
) -> Result<Map<String, Value>, RequestError> {
    let fields = match body {
        Value::Object(fields) if !fields.is_empty() => fields,
        _ => return Err(RequestError::NoData),
    };

    if required.iter().all(|field| fields.contains_key(*field)) {
        Ok(fields)
    } else {
        Err(RequestError::MissingFields {
            required: required.to_vec(),
            received: fields.keys().cloned().collect(),
        })
    }
}

/// Interpret a user provided location id. Integers are accepted as they
/// are, strings are accepted if they hold an integer
pub fn parse_location_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Parse both ends of a route, failing if either can't be read
fn parse_ids(start: Value, end: Value) -> Result<(i64, i64), RequestError> {
    match (parse_location_id(&start), parse_location_id(&end)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(RequestError::InvalidIds { start, end }),
    }
}

/// A route request, as provided by the user
#[derive(Deserialize, Debug, Clone)]
pub struct UserRouteRequest {
    pub start: Value,
    pub end: Value,
}

impl UserRouteRequest {
    /// Read the request from the body of an API call
    pub fn from_body(body: Value) -> Result<Self, RequestError> {
        let fields = check_fields(body, &ROUTE_FIELDS)?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|_| RequestError::NoData)
    }
}

/// A validated route request. Ids are not yet checked against the campus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: i64,
    pub end: i64,
}

impl TryFrom<UserRouteRequest> for RouteRequest {
    type Error = RequestError;

    fn try_from(user: UserRouteRequest) -> Result<Self, Self::Error> {
        let (start, end) = parse_ids(user.start, user.end)?;
        Ok(RouteRequest { start, end })
    }
}

/// Either end of the route in a text message request. The front end sends
/// back the location records it was given, but bare ids are also accepted
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum UserLocationRef {
    Tagged { node_id: Value },
    Direct(Value),
}

impl UserLocationRef {
    fn into_value(self) -> Value {
        match self {
            UserLocationRef::Tagged { node_id } => node_id,
            UserLocationRef::Direct(value) => value,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserSmsPath {
    pub start: Option<UserLocationRef>,
    pub end: Option<UserLocationRef>,
}

/// A text message request, as provided by the user
#[derive(Deserialize, Debug, Clone)]
pub struct UserSmsRequest {
    pub phone: Value,
    pub path: Value,
}

impl UserSmsRequest {
    /// Read the request from the body of an API call
    pub fn from_body(body: Value) -> Result<Self, RequestError> {
        let fields = check_fields(body, &SMS_FIELDS)?;
        serde_json::from_value(Value::Object(fields))
            .map_err(|_| RequestError::NoData)
    }
}

/// A validated text message request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsRequest {
    pub phone: String,
    pub route: RouteRequest,
}

impl TryFrom<UserSmsRequest> for SmsRequest {
    type Error = RequestError;

    fn try_from(user: UserSmsRequest) -> Result<Self, Self::Error> {
        // Numbers must carry a country code
        let phone = match user.phone {
            Value::String(phone) if phone.starts_with('+') => phone,
            _ => return Err(RequestError::InvalidPhone),
        };

        let received: Vec<String> = match &user.path {
            Value::Object(fields) => fields.keys().cloned().collect(),
            _ => Vec::new(),
        };
        let missing = || RequestError::MissingFields {
            required: ROUTE_FIELDS.to_vec(),
            received: received.clone(),
        };

        let path: UserSmsPath =
            serde_json::from_value(user.path).map_err(|_| missing())?;
        let (start, end) = match (path.start, path.end) {
            (Some(start), Some(end)) => (start.into_value(), end.into_value()),
            _ => return Err(missing()),
        };

        let (start, end) = parse_ids(start, end)?;

        Ok(SmsRequest {
            phone,
            route: RouteRequest { start, end },
        })
    }
}
