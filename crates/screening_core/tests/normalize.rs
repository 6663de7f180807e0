use pretty_assertions::assert_eq;
use screening_core::{
    normalize_status, normalize_submission, Geometry, JobStatus, Priority, RiskLevel,
    ScreeningError, ScreeningResult, ScreeningStats, ServerReply, StatusUpdate,
    SubmissionOutcome, DEFAULT_ALL_CLEAR_MESSAGE, DEFAULT_FAILED_MESSAGE,
    UNEXPECTED_RESPONSE_MESSAGE,
};

fn reply(json: &str) -> ServerReply {
    serde_json::from_str(json).unwrap()
}

fn terminal(json: &str) -> ScreeningResult {
    match normalize_status(reply(json)) {
        StatusUpdate::Terminal(result) => result,
        other => panic!("expected terminal, got {other:?}"),
    }
}

#[test]
fn queued_submission_is_deferred() {
    let outcome = normalize_submission(reply(r#"{"status":"queued","job_id":"J1"}"#)).unwrap();
    assert_eq!(outcome, SubmissionOutcome::Deferred("J1".to_string()));
}

#[test]
fn queued_submission_without_job_id_is_a_protocol_error() {
    let err = normalize_submission(reply(r#"{"status":"queued"}"#)).unwrap_err();
    assert!(matches!(err, ScreeningError::Protocol(_)));
}

#[test]
fn submission_without_known_shape_falls_back_to_all_clear() {
    let outcome = normalize_submission(reply(r#"{"threats":[]}"#)).unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Immediate(ScreeningResult::AllClear {
            message: DEFAULT_ALL_CLEAR_MESSAGE.to_string(),
            stats: None,
        })
    );
}

#[test]
fn legacy_submission_with_threats_inherits_session_risk() {
    let outcome = normalize_submission(reply(
        r#"{
            "status": "success",
            "risk_level": "RED",
            "threats": [{
                "asset": "ISS (ZARYA)",
                "intruder": "CSS (TIANHE)",
                "min_km": 0.412,
                "pc": "1.23e-05",
                "tca": "2026-10-20T04:12:00Z",
                "pdf_url": "STX_Report_1.pdf"
            }],
            "decision": "MANEUVER RECOMMENDED",
            "profile": "Manned Asset - High Caution",
            "maneuver": {"delta_v_ms": 0.35}
        }"#,
    ))
    .unwrap();

    let SubmissionOutcome::Immediate(ScreeningResult::Threats {
        events,
        profile,
        maneuver,
        ..
    }) = outcome
    else {
        panic!("expected threats");
    };
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].risk_level, RiskLevel::Red);
    assert_eq!(events[0].priority, Priority::Catalog);
    assert_eq!(events[0].pc, Some(1.23e-05));
    assert_eq!(events[0].report_url.as_deref(), Some("STX_Report_1.pdf"));
    assert_eq!(profile.as_deref(), Some("Manned Asset - High Caution"));
    assert_eq!(maneuver, Some(serde_json::json!({"delta_v_ms": 0.35})));
}

#[test]
fn legacy_reply_geometry_attaches_to_events() {
    let outcome = normalize_submission(reply(
        r#"{
            "status": "success",
            "risk_level": "YELLOW",
            "threats": [{
                "asset": "ISS (ZARYA)",
                "intruder": "CSS (TIANHE)",
                "min_km": 4.871,
                "pc": "3.10e-07",
                "tca": "2026-10-20T04:12:00Z",
                "pdf_url": "STX_Report_2.pdf",
                "risk_level": "YELLOW"
            }],
            "decision": "MONITOR",
            "profile": "Commercial - Standard",
            "geometry": {"radial": 0.1, "in_track": 4.2, "cross_track": -2.4}
        }"#,
    ))
    .unwrap();

    let SubmissionOutcome::Immediate(ScreeningResult::Threats { events, .. }) = outcome else {
        panic!("expected threats");
    };
    assert_eq!(
        events[0].geometry,
        Some(Geometry {
            radial: 0.1,
            in_track: 4.2,
            cross_track: -2.4
        })
    );
}

#[test]
fn event_geometry_wins_over_reply_geometry() {
    let result = terminal(
        r#"{
            "status": "success",
            "geometry": {"radial": 9.0, "in_track": 9.0, "cross_track": 9.0},
            "threats": [{
                "asset": "SAT-A",
                "intruder": "DEB-B",
                "min_km": 1.0,
                "geometry": {"radial": 0.5, "in_track": 0.6, "cross_track": 0.7}
            }]
        }"#,
    );
    let ScreeningResult::Threats { events, .. } = result else {
        panic!("expected threats");
    };
    assert_eq!(
        events[0].geometry,
        Some(Geometry {
            radial: 0.5,
            in_track: 0.6,
            cross_track: 0.7
        })
    );
}

#[test]
fn failed_submission_is_not_masked_as_all_clear() {
    let outcome = normalize_submission(reply(r#"{"status":"failed"}"#)).unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Immediate(ScreeningResult::Failed {
            reason: DEFAULT_FAILED_MESSAGE.to_string()
        })
    );
}

#[test]
fn pending_statuses_are_not_terminal() {
    assert_eq!(
        normalize_status(reply(r#"{"status":"queued"}"#)),
        StatusUpdate::Pending(JobStatus::Queued)
    );
    assert_eq!(
        normalize_status(reply(r#"{"status":"RUNNING"}"#)),
        StatusUpdate::Pending(JobStatus::Running)
    );
}

#[test]
fn all_clear_keeps_message_and_stats() {
    let result = terminal(
        r#"{"status":"all_clear","message":"clear","screening_stats":{"manned_checked":5,"high_risk_checked":10,"catalog_checked":100,"total_time_sec":12.3}}"#,
    );
    assert_eq!(
        result,
        ScreeningResult::AllClear {
            message: "clear".to_string(),
            stats: Some(ScreeningStats {
                manned_checked: 5,
                high_risk_checked: 10,
                catalog_checked: 100,
                total_time_sec: 12.3,
            }),
        }
    );
}

#[test]
fn all_clear_without_message_uses_default() {
    let result = terminal(r#"{"status":"all_clear"}"#);
    assert_eq!(
        result,
        ScreeningResult::AllClear {
            message: DEFAULT_ALL_CLEAR_MESSAGE.to_string(),
            stats: None,
        }
    );
}

#[test]
fn decision_line_breaks_survive_normalization() {
    let decision = "MANEUVER RECOMMENDED\nBurn +0.3 m/s in-track\r\n\nReassess at TCA-6h";
    let body = serde_json::json!({
        "status": "success",
        "decision": decision,
        "threats": [{
            "asset": "SAT-A",
            "intruder": "DEB-B",
            "risk_level": "YELLOW",
            "priority": "HIGH_RISK",
            "priority_reason": "Known debris field",
            "min_km": 3.2,
            "tca": "2026-10-21T00:00:00Z",
            "relative_velocity_kms": 11.4,
            "pc": 2.0e-6,
            "geometry": {"radial": 0.1, "in_track": 3.1, "cross_track": 0.7}
        }]
    });
    let result = terminal(&body.to_string());

    let ScreeningResult::Threats {
        events,
        decision: normalized,
        stats,
        ..
    } = result
    else {
        panic!("expected threats");
    };
    assert_eq!(normalized, decision);
    assert_eq!(stats, None);
    assert_eq!(events[0].priority, Priority::HighRisk);
    assert_eq!(
        events[0].priority_reason.as_deref(),
        Some("Known debris field")
    );
    assert_eq!(events[0].relative_velocity_kms, Some(11.4));
    assert_eq!(
        events[0].geometry,
        Some(Geometry {
            radial: 0.1,
            in_track: 3.1,
            cross_track: 0.7
        })
    );
}

#[test]
fn success_without_threats_is_all_clear() {
    assert_eq!(
        terminal(r#"{"status":"success","threats":[]}"#),
        ScreeningResult::AllClear {
            message: DEFAULT_ALL_CLEAR_MESSAGE.to_string(),
            stats: None,
        }
    );
}

#[test]
fn failed_status_carries_server_reason() {
    assert_eq!(
        terminal(r#"{"status":"failed","error":"catalog unreachable"}"#),
        ScreeningResult::Failed {
            reason: "catalog unreachable".to_string()
        }
    );
    assert_eq!(
        terminal(r#"{"status":"failed"}"#),
        ScreeningResult::Failed {
            reason: DEFAULT_FAILED_MESSAGE.to_string()
        }
    );
}

#[test]
fn unknown_shapes_become_errors() {
    for body in [r#"{}"#, r#"{"status":"paused"}"#, r#"{"message":"hello"}"#] {
        assert_eq!(
            terminal(body),
            ScreeningResult::Error {
                reason: UNEXPECTED_RESPONSE_MESSAGE.to_string()
            },
            "body {body}"
        );
    }
}
