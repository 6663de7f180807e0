//! JSON payloads exactly as the screening service sends them.
//!
//! Every field is optional here; shape decisions happen in `normalize`.

use serde::{Deserialize, Deserializer};

use crate::types::Geometry;

/// Reply body of `POST /screen` and `GET /screen_status/{job_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerReply {
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_id: Option<String>,
    pub message: Option<String>,
    pub threats: Option<Vec<WireThreat>>,
    pub decision: Option<String>,
    pub screening_stats: Option<WireStats>,
    pub error: Option<String>,
    /// Session-level risk of legacy single-event replies.
    pub risk_level: Option<String>,
    pub profile: Option<String>,
    pub maneuver: Option<serde_json::Value>,
    /// RIC offsets at TCA for legacy single-event replies.
    pub geometry: Option<Geometry>,
}

impl ServerReply {
    /// Lower-cased, trimmed `status` discriminator, if any.
    pub fn status_tag(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
    }

    pub fn has_threats(&self) -> bool {
        self.threats.as_ref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireThreat {
    pub asset: String,
    pub intruder: String,
    pub risk_level: Option<String>,
    pub priority: Option<String>,
    pub priority_reason: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub min_km: f64,
    #[serde(default)]
    pub tca: String,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub relative_velocity_kms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub pc: Option<f64>,
    pub pdf_url: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WireStats {
    pub manned_checked: u64,
    pub high_risk_checked: u64,
    pub catalog_checked: u64,
    pub total_time_sec: f64,
}

/// Reply body of `GET /summary_pdf/{job_id}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryReply {
    pub pdf_url: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrInteger {
    Text(String),
    Integer(u64),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrInteger>::deserialize(deserializer)?.map(|value| match value {
            StringOrInteger::Text(text) => text,
            StringOrInteger::Integer(n) => n.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pc_accepts_scientific_notation_strings() {
        let threat: WireThreat = serde_json::from_str(
            r#"{"asset":"ISS","intruder":"DEB","min_km":"0.412","pc":"1.23e-05","tca":"t"}"#,
        )
        .unwrap();
        assert_eq!(threat.min_km, 0.412);
        assert_eq!(threat.pc, Some(1.23e-05));
        assert_eq!(threat.relative_velocity_kms, None);
    }

    #[test]
    fn numeric_job_id_is_stringified() {
        let reply: ServerReply =
            serde_json::from_str(r#"{"status":"queued","job_id":42}"#).unwrap();
        assert_eq!(reply.job_id.as_deref(), Some("42"));
        assert_eq!(reply.status_tag().as_deref(), Some("queued"));
    }

    #[test]
    fn unparsable_pc_is_rejected() {
        let err = serde_json::from_str::<WireThreat>(
            r#"{"asset":"A","intruder":"B","min_km":1.0,"pc":"high"}"#,
        );
        assert!(err.is_err());
    }
}
