use crate::{Priority, RiskLevel, ScreeningResult, ThreatEvent};

pub const MANNED_LABEL: &str = "MANNED ASSET CONJUNCTION";
pub const CRITICAL_LABEL: &str = "CRITICAL CONJUNCTION(S)";
pub const YELLOW_LABEL: &str = "YELLOW ALERT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Elevated,
}

/// Session-level badge shown above a threats result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBadge {
    pub severity: Severity,
    pub label: &'static str,
}

/// Derives the session badge for a set of events; `None` when there are none.
///
/// Severity follows risk alone while the label prefers the manned tag, so a
/// manned YELLOW event yields an `Elevated` badge with the manned label.
pub fn classify_threats(events: &[ThreatEvent]) -> Option<SessionBadge> {
    if events.is_empty() {
        return None;
    }
    let has_red = events.iter().any(|e| e.risk_level == RiskLevel::Red);
    let has_manned = events.iter().any(|e| e.priority == Priority::Manned);

    let severity = if has_red {
        Severity::Critical
    } else {
        Severity::Elevated
    };
    let label = if has_manned {
        MANNED_LABEL
    } else if has_red {
        CRITICAL_LABEL
    } else {
        YELLOW_LABEL
    };
    Some(SessionBadge { severity, label })
}

impl ScreeningResult {
    pub fn badge(&self) -> Option<SessionBadge> {
        match self {
            ScreeningResult::Threats { events, .. } => classify_threats(events),
            _ => None,
        }
    }
}
