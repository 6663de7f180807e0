use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a deferred screening job.
pub type JobId = String;

/// Non-terminal job status reported by `/screen_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Running,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
        }
    }
}

/// A deferred job as tracked by the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningJob {
    pub id: JobId,
    pub status: JobStatus,
    pub attempt: u32,
}

impl ScreeningJob {
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            attempt: 0,
        }
    }
}

/// Screening thresholds the server applies to the primary object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalProfile {
    IssClass,
    Commercial,
    Constellation,
}

impl OperationalProfile {
    /// Value sent in the multipart `profile` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalProfile::IssClass => "ISS_CLASS",
            OperationalProfile::Commercial => "COMMERCIAL",
            OperationalProfile::Constellation => "CONSTELLATION",
        }
    }
}

impl std::str::FromStr for OperationalProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ISS_CLASS" => Ok(OperationalProfile::IssClass),
            "COMMERCIAL" => Ok(OperationalProfile::Commercial),
            "CONSTELLATION" => Ok(OperationalProfile::Constellation),
            other => Err(format!("unknown operational profile {other}")),
        }
    }
}

/// The artifact to screen plus per-submission options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningRequest {
    pub file_name: String,
    pub content: Vec<u8>,
    /// Upper bound on the number of catalog objects screened.
    pub catalog_limit: Option<u32>,
    pub profile: Option<OperationalProfile>,
}

impl ScreeningRequest {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            catalog_limit: None,
            profile: None,
        }
    }

    pub fn with_catalog_limit(mut self, limit: u32) -> Self {
        self.catalog_limit = Some(limit);
        self
    }

    pub fn with_profile(mut self, profile: OperationalProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Red => write!(f, "RED"),
            RiskLevel::Yellow => write!(f, "YELLOW"),
            RiskLevel::Green => write!(f, "GREEN"),
        }
    }
}

/// Server-assigned rendering priority of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Manned,
    HighRisk,
    Catalog,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Manned => write!(f, "MANNED"),
            Priority::HighRisk => write!(f, "HIGH-RISK"),
            Priority::Catalog => write!(f, "CATALOG"),
        }
    }
}

/// Radial / in-track / cross-track separation at TCA, in km.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub radial: f64,
    pub in_track: f64,
    pub cross_track: f64,
}

/// One detected conjunction. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatEvent {
    pub asset: String,
    pub intruder: String,
    pub risk_level: RiskLevel,
    pub priority: Priority,
    pub priority_reason: Option<String>,
    pub miss_distance_km: f64,
    pub tca: String,
    pub relative_velocity_kms: Option<f64>,
    pub pc: Option<f64>,
    pub report_url: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreeningStats {
    pub manned_checked: u64,
    pub high_risk_checked: u64,
    pub catalog_checked: u64,
    pub total_time_sec: f64,
}

/// Terminal outcome of one submission, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreeningResult {
    AllClear {
        message: String,
        stats: Option<ScreeningStats>,
    },
    Threats {
        events: Vec<ThreatEvent>,
        stats: Option<ScreeningStats>,
        /// Advisory rationale, kept verbatim including line breaks.
        decision: String,
        profile: Option<String>,
        maneuver: Option<serde_json::Value>,
    },
    Failed {
        reason: String,
    },
    Error {
        reason: String,
    },
}

impl ScreeningResult {
    pub fn kind(&self) -> &'static str {
        match self {
            ScreeningResult::AllClear { .. } => "all_clear",
            ScreeningResult::Threats { .. } => "threats",
            ScreeningResult::Failed { .. } => "failed",
            ScreeningResult::Error { .. } => "error",
        }
    }

    pub fn stats(&self) -> Option<&ScreeningStats> {
        match self {
            ScreeningResult::AllClear { stats, .. } | ScreeningResult::Threats { stats, .. } => {
                stats.as_ref()
            }
            ScreeningResult::Failed { .. } | ScreeningResult::Error { .. } => None,
        }
    }
}
