use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendered outcome of a single condition. `condition` is the display form,
/// which may carry resolved values in parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub condition: String,
    pub success: bool,
}

/// Everything a probe observed about an endpoint, plus the outcome of
/// evaluating the endpoint's conditions against it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProbeResult {
    /// Only set for suite steps.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "status")]
    pub http_status: u16,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub ip: String,

    /// NOERROR, FORMERR, SERVFAIL, NXDOMAIN, NOTIMP, REFUSED
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dns_rcode: String,

    pub connected: bool,

    #[serde(with = "millis")]
    pub duration: Duration,

    #[serde(with = "millis")]
    pub certificate_expiration: Duration,

    #[serde(with = "millis")]
    pub domain_expiration: Duration,

    #[serde(with = "text", skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<u8>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub condition_results: Vec<ConditionResult>,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ProbeResult {
    /// Records an error unless the exact same message is already present.
    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        let error = error.into();
        if !self.errors.iter().any(|existing| *existing == error) {
            self.errors.push(error);
        }
    }

    pub(crate) fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::convert::TryFrom;
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

mod text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(String::deserialize(deserializer)?.into_bytes())
    }
}
