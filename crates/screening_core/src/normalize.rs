//! Maps every reply shape the service has produced into one `ScreeningResult`.

use crate::error::ScreeningError;
use crate::types::{
    Geometry, JobId, JobStatus, Priority, RiskLevel, ScreeningResult, ScreeningStats, ThreatEvent,
};
use crate::wire::{ServerReply, WireStats, WireThreat};

pub const DEFAULT_ALL_CLEAR_MESSAGE: &str = "No conjunctions above threshold";
pub const DEFAULT_FAILED_MESSAGE: &str = "Screening failed";
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "unexpected response from server";

/// What `POST /screen` told us.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Immediate(ScreeningResult),
    Deferred(JobId),
}

/// What one `GET /screen_status` reply means for the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    Pending(JobStatus),
    Terminal(ScreeningResult),
}

/// Classifies a successful `/screen` reply.
///
/// Replies matching no known shape are treated as all-clear, the documented
/// fallback for legacy servers.
pub fn normalize_submission(reply: ServerReply) -> Result<SubmissionOutcome, ScreeningError> {
    match reply.status_tag().as_deref() {
        Some("queued") => match reply.job_id.filter(|id| !id.trim().is_empty()) {
            Some(job_id) => Ok(SubmissionOutcome::Deferred(job_id)),
            None => Err(ScreeningError::Protocol(
                "queued reply without a job_id".to_string(),
            )),
        },
        Some("all_clear") => Ok(SubmissionOutcome::Immediate(all_clear(reply))),
        Some("failed") => Ok(SubmissionOutcome::Immediate(failed(reply))),
        _ if reply.has_threats() => Ok(SubmissionOutcome::Immediate(threats(reply))),
        _ => Ok(SubmissionOutcome::Immediate(ScreeningResult::AllClear {
            message: DEFAULT_ALL_CLEAR_MESSAGE.to_string(),
            stats: reply.screening_stats.map(stats),
        })),
    }
}

/// Classifies a `/screen_status` reply. Unknown shapes become `Error`.
pub fn normalize_status(reply: ServerReply) -> StatusUpdate {
    match reply.status_tag().as_deref() {
        Some("queued") => StatusUpdate::Pending(JobStatus::Queued),
        Some("running") => StatusUpdate::Pending(JobStatus::Running),
        Some("all_clear") => StatusUpdate::Terminal(all_clear(reply)),
        Some("failed") => StatusUpdate::Terminal(failed(reply)),
        Some("success") if !reply.has_threats() => {
            StatusUpdate::Terminal(ScreeningResult::AllClear {
                message: DEFAULT_ALL_CLEAR_MESSAGE.to_string(),
                stats: reply.screening_stats.map(stats),
            })
        }
        _ if reply.has_threats() => StatusUpdate::Terminal(threats(reply)),
        _ => StatusUpdate::Terminal(ScreeningResult::Error {
            reason: UNEXPECTED_RESPONSE_MESSAGE.to_string(),
        }),
    }
}

fn all_clear(reply: ServerReply) -> ScreeningResult {
    ScreeningResult::AllClear {
        message: reply
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALL_CLEAR_MESSAGE.to_string()),
        stats: reply.screening_stats.map(stats),
    }
}

fn failed(reply: ServerReply) -> ScreeningResult {
    ScreeningResult::Failed {
        reason: reply
            .error
            .or(reply.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILED_MESSAGE.to_string()),
    }
}

fn threats(reply: ServerReply) -> ScreeningResult {
    let fallback_risk = reply.risk_level.as_deref().and_then(parse_risk);
    let fallback_geometry = reply.geometry;
    let events = reply
        .threats
        .unwrap_or_default()
        .into_iter()
        .map(|threat| event(threat, fallback_risk, fallback_geometry))
        .collect();
    ScreeningResult::Threats {
        events,
        stats: reply.screening_stats.map(stats),
        decision: reply.decision.unwrap_or_default(),
        profile: reply.profile,
        maneuver: reply.maneuver.filter(|m| !m.is_null()),
    }
}

fn event(
    threat: WireThreat,
    fallback_risk: Option<RiskLevel>,
    fallback_geometry: Option<Geometry>,
) -> ThreatEvent {
    let risk_level = threat
        .risk_level
        .as_deref()
        .and_then(parse_risk)
        .or(fallback_risk)
        .unwrap_or(RiskLevel::Yellow);
    let priority = threat
        .priority
        .as_deref()
        .and_then(parse_priority)
        .unwrap_or(Priority::Catalog);
    ThreatEvent {
        asset: threat.asset,
        intruder: threat.intruder,
        risk_level,
        priority,
        priority_reason: threat.priority_reason,
        miss_distance_km: threat.min_km,
        tca: threat.tca,
        relative_velocity_kms: threat.relative_velocity_kms,
        pc: threat.pc,
        report_url: threat.pdf_url.filter(|u| !u.is_empty()),
        geometry: threat.geometry.or(fallback_geometry),
    }
}

fn stats(wire: WireStats) -> ScreeningStats {
    ScreeningStats {
        manned_checked: wire.manned_checked,
        high_risk_checked: wire.high_risk_checked,
        catalog_checked: wire.catalog_checked,
        total_time_sec: wire.total_time_sec,
    }
}

fn parse_risk(raw: &str) -> Option<RiskLevel> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "RED" => Some(RiskLevel::Red),
        "YELLOW" => Some(RiskLevel::Yellow),
        "GREEN" => Some(RiskLevel::Green),
        _ => None,
    }
}

fn parse_priority(raw: &str) -> Option<Priority> {
    match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
        "MANNED" => Some(Priority::Manned),
        "HIGH_RISK" => Some(Priority::HighRisk),
        "CATALOG" => Some(Priority::Catalog),
        _ => None,
    }
}
