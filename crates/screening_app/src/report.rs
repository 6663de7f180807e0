use std::fmt::Write;

use screening_core::{ScreeningResult, ScreeningStats, Severity, ThreatEvent};

/// Renders a terminal result as plain text for the operator.
pub fn render(result: &ScreeningResult, generated_utc: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Screening report ({generated_utc})");

    match result {
        ScreeningResult::AllClear { message, .. } => {
            let _ = writeln!(out, "ALL CLEAR: {message}");
            render_stats(&mut out, result.stats());
        }
        ScreeningResult::Threats {
            events,
            decision,
            profile,
            ..
        } => {
            if let Some(badge) = result.badge() {
                let marker = match badge.severity {
                    Severity::Critical => "!!",
                    Severity::Elevated => "!",
                };
                let _ = writeln!(out, "[{marker}] {}", badge.label);
            }
            if let Some(profile) = profile {
                let _ = writeln!(out, "Profile: {profile}");
            }
            for (index, event) in events.iter().enumerate() {
                render_event(&mut out, index + 1, event);
            }
            render_stats(&mut out, result.stats());
            if !decision.is_empty() {
                let _ = writeln!(out, "Decision:\n{decision}");
            }
        }
        ScreeningResult::Failed { reason } => {
            let _ = writeln!(out, "SCREENING FAILED: {reason}");
        }
        ScreeningResult::Error { reason } => {
            let _ = writeln!(out, "ERROR: {reason}");
        }
    }
    out
}

fn render_event(out: &mut String, index: usize, event: &ThreatEvent) {
    let _ = writeln!(
        out,
        "{index}. [{}] {} {} vs {}",
        event.risk_level, event.priority, event.asset, event.intruder
    );
    if let Some(reason) = &event.priority_reason {
        let _ = writeln!(out, "   reason: {reason}");
    }
    let _ = write!(
        out,
        "   miss {:.3} km at {}",
        event.miss_distance_km, event.tca
    );
    if let Some(velocity) = event.relative_velocity_kms {
        let _ = write!(out, ", v_rel {velocity:.2} km/s");
    }
    if let Some(pc) = event.pc {
        let _ = write!(out, ", Pc {pc:.2e}");
    }
    out.push('\n');
    if let Some(geometry) = &event.geometry {
        let _ = writeln!(
            out,
            "   RIC {:.3} / {:.3} / {:.3} km",
            geometry.radial, geometry.in_track, geometry.cross_track
        );
    }
    if let Some(url) = &event.report_url {
        let _ = writeln!(out, "   report: {url}");
    }
}

fn render_stats(out: &mut String, stats: Option<&ScreeningStats>) {
    if let Some(stats) = stats {
        let _ = writeln!(
            out,
            "Checked {} manned, {} high-risk, {} catalog objects in {:.1}s",
            stats.manned_checked,
            stats.high_risk_checked,
            stats.catalog_checked,
            stats.total_time_sec
        );
    }
}
