#[cfg(test)]
mod tests {
    use crate::error::{CalendarError, ChainsyncError};
    use crate::logic::*;
    use crate::test_support::{
        authority_request, test_state, with_calendar, MockCalendar, MEET_LINK,
    };
    use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
    use slotify_common::models::{
        AlertConfig, AlertDetails, AlertPolicy, AttendeeStatus, Location, MeetingStatus, Severity,
    };
    use slotify_common::services::{BoxedError, CalendarService};
    use slotify_db::{AlertMeetingRepository, MeetingFilter};
    use std::sync::Arc;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, m, s).unwrap()
    }

    fn alert(alert_id: &str, alert_type: &str, severity: &str) -> ScheduleMeetingRequest {
        ScheduleMeetingRequest {
            alert_id: Some(alert_id.to_string()),
            alert_type: Some(alert_type.to_string()),
            severity: Some(severity.to_string()),
            ..Default::default()
        }
    }

    fn details(severity: Severity) -> AlertDetails {
        AlertDetails {
            alert_type: "fire".to_string(),
            severity,
            location: Some(Location {
                region: Some("north".to_string()),
                address: Some("1 Harbor Rd".to_string()),
                latitude: None,
                longitude: None,
            }),
            description: Some("Warehouse fire".to_string()),
            affected_area: Some("Dock 4".to_string()),
            timestamp: at(10, 0, 0),
            source: "sensor-net".to_string(),
        }
    }

    // --- Slot computation ---

    #[test]
    fn emergency_slot_rounds_up_to_five_minutes() {
        let policy = AlertPolicy::default().critical;
        let window = compute_meeting_slot(at(10, 7, 30), &policy);

        assert_eq!(window.start_time, at(10, 10, 0));
        assert_eq!(window.end_time, at(11, 40, 0));
        assert_eq!(window.duration_minutes, 90);
    }

    #[test]
    fn regular_slot_rounds_up_to_fifteen_minutes() {
        let policy = AlertPolicy::default().high;
        let window = compute_meeting_slot(at(10, 7, 30), &policy);

        assert_eq!(window.start_time, at(10, 15, 0));
        assert_eq!(window.end_time, at(11, 15, 0));
    }

    #[test]
    fn slot_on_boundary_is_kept() {
        let policy = AlertPolicy::default().high;
        assert_eq!(compute_meeting_slot(at(10, 30, 0), &policy).start_time, at(10, 30, 0));

        let just_after = at(10, 30, 0) + Duration::nanoseconds(1);
        assert_eq!(compute_meeting_slot(just_after, &policy).start_time, at(10, 45, 0));
    }

    #[test]
    fn slot_rolls_over_the_hour() {
        let policy = AlertPolicy::default().medium;
        let window = compute_meeting_slot(at(23, 50, 1), &policy);
        assert_eq!(window.start_time, at(23, 0, 0) + Duration::hours(1));
        assert_eq!(window.start_time.minute(), 0);
    }

    // --- Policy ---

    #[test]
    fn stored_policy_overrides_default_only_when_active() {
        let mut policy = AlertPolicy::default();
        policy.low.auto_schedule = true;
        policy.low.meeting_duration = 20;
        let mut stored = AlertConfig {
            alert_type: "flood".to_string(),
            description: None,
            policy,
            is_active: true,
            created_at: at(9, 0, 0),
            updated_at: at(9, 0, 0),
        };
        let default = AlertPolicy::default();

        let tier = resolve_severity_policy(Some(&stored), &default, Severity::Low);
        assert!(tier.auto_schedule);
        assert_eq!(tier.meeting_duration, 20);

        stored.is_active = false;
        let tier = resolve_severity_policy(Some(&stored), &default, Severity::Low);
        assert_eq!(tier, default.low);

        assert_eq!(
            resolve_severity_policy(None, &default, Severity::Critical),
            default.critical
        );
    }

    #[test]
    fn partial_policy_keeps_default_tiers() {
        let mut low = AlertPolicy::default().low;
        low.auto_schedule = true;
        let merged = PartialAlertPolicy {
            low: Some(low.clone()),
            ..Default::default()
        }
        .merge_onto(AlertPolicy::default());

        assert_eq!(merged.low, low);
        assert_eq!(merged.critical, AlertPolicy::default().critical);
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let mut policy = AlertPolicy::default();
        policy.high.meeting_duration = 0;
        let err = validate_policy(&policy).unwrap_err();
        assert!(err.to_string().contains("high"));
        assert!(validate_policy(&AlertPolicy::default()).is_ok());
    }

    // --- Validation ---

    #[test]
    fn missing_fields_are_listed() {
        let request = ScheduleMeetingRequest {
            alert_type: Some("fire".to_string()),
            severity: Some("  ".to_string()),
            ..Default::default()
        };
        let err = request.validate(at(10, 0, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: alertId, severity"
        );
    }

    #[test]
    fn unknown_severity_is_a_validation_error() {
        let err = alert("A1", "fire", "apocalyptic")
            .validate(at(10, 0, 0))
            .unwrap_err();
        assert!(matches!(err, ChainsyncError::Validation(ref msg) if msg.contains("apocalyptic")));
    }

    #[test]
    fn severity_must_be_exact_lowercase() {
        for raw in ["CRITICAL", "Critical", " critical "] {
            let err = alert("A1", "fire", raw).validate(at(10, 0, 0)).unwrap_err();
            assert!(
                matches!(err, ChainsyncError::Validation(ref msg) if msg.contains("unknown severity")),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn validated_alert_gets_defaults() {
        let (alert_id, details) = alert(" A1 ", "fire", "critical")
            .validate(at(10, 0, 0))
            .unwrap();
        assert_eq!(alert_id, "A1");
        assert_eq!(details.severity, Severity::Critical);
        assert_eq!(details.timestamp, at(10, 0, 0));
        assert_eq!(details.source, "external");
    }

    // --- Calendar event ---

    #[test]
    fn event_text_describes_the_alert() {
        let alert = details(Severity::Critical);
        assert_eq!(event_summary(&alert), "[CRITICAL] fire alert response");

        let description = event_description("A1", &alert);
        assert!(description.starts_with("Emergency meeting for alert A1"));
        assert!(description.contains("Affected area: Dock 4"));
        assert!(description.contains("Location: 1 Harbor Rd, north"));
        assert!(description.ends_with("Source: sensor-net"));
    }

    #[tokio::test]
    async fn provisioning_needs_a_connected_organizer() {
        let calendar = MockCalendar::default();
        let alert = details(Severity::High);
        let window = compute_meeting_slot(at(10, 0, 0), &AlertPolicy::default().high);
        let no_calendar = authority_request("Ana", "ana@city.gov", "operations")
            .into_authority(at(9, 0, 0))
            .unwrap();

        let result = provision_calendar_event(
            Some(&calendar as &dyn CalendarService<Error = BoxedError>),
            &[no_calendar],
            "A1",
            &alert,
            &window,
        )
        .await;
        assert!(matches!(result, Err(CalendarError::NoOrganizer)));
        assert_eq!(calendar.call_count(), 0);
    }

    #[tokio::test]
    async fn provisioning_without_provider_is_skipped() {
        let alert = details(Severity::High);
        let window = compute_meeting_slot(at(10, 0, 0), &AlertPolicy::default().high);
        let organizer = with_calendar(authority_request("Ana", "ana@city.gov", "operations"), "t")
            .into_authority(at(9, 0, 0))
            .unwrap();

        let result = provision_calendar_event(None, &[organizer], "A1", &alert, &window).await;
        assert!(matches!(result, Err(CalendarError::ProviderDisabled)));
    }

    #[tokio::test]
    async fn provisioning_uses_first_connected_authority_and_invites_all() {
        let calendar = MockCalendar::default();
        let alert = details(Severity::Critical);
        let window = compute_meeting_slot(at(10, 0, 0), &AlertPolicy::default().critical);
        let authorities = vec![
            authority_request("Ana", "ana@city.gov", "operations")
                .into_authority(at(9, 0, 0))
                .unwrap(),
            with_calendar(authority_request("Ben", "ben@city.gov", "executive"), "ben-token")
                .into_authority(at(9, 0, 0))
                .unwrap(),
            with_calendar(authority_request("Cy", "cy@city.gov", "executive"), "cy-token")
                .into_authority(at(9, 0, 0))
                .unwrap(),
        ];

        let result = provision_calendar_event(
            Some(&calendar as &dyn CalendarService<Error = BoxedError>),
            &authorities,
            "A1",
            &alert,
            &window,
        )
        .await
        .unwrap();
        assert_eq!(result.meet_link.as_deref(), Some(MEET_LINK));

        let calls = calendar.calls.lock().unwrap();
        let (credentials, event) = &calls[0];
        assert_eq!(credentials.access_token.as_deref(), Some("ben-token"));
        assert_eq!(event.attendees.len(), 3);
        assert!(event.with_conference);
        assert_eq!(event.start_time, window.start_time);
    }

    // --- Pipeline ---

    #[tokio::test]
    async fn critical_alert_without_calendars_still_schedules() {
        let state = test_state(None).await;
        upsert_authority(
            &state,
            authority_request("Ana", "ana@city.gov", "operations"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let outcome = schedule_alert_meeting(&state, alert("A1", "fire", "critical"), at(10, 7, 30))
            .await
            .unwrap();

        let ScheduleOutcome::MeetingScheduled { meeting } = outcome else {
            panic!("expected a scheduled meeting");
        };
        assert_eq!(meeting.meeting.duration_minutes, 90);
        assert!(meeting.emergency_override);
        assert_eq!(meeting.meeting.start_time, at(10, 10, 0));
        assert!(meeting.google_meet_link.is_none());
        assert!(meeting.calendar_error.is_some());
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(meeting.scheduled_by, "system");
    }

    #[tokio::test]
    async fn low_severity_is_notification_only() {
        let state = test_state(None).await;
        upsert_authority(
            &state,
            authority_request("Ana", "ana@city.gov", "operations"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let outcome = schedule_alert_meeting(&state, alert("A2", "fire", "low"), at(10, 0, 0))
            .await
            .unwrap();
        assert!(matches!(
            outcome,
            ScheduleOutcome::NotificationOnly { ref alert_id, severity: Severity::Low } if alert_id == "A2"
        ));
        assert!(state
            .meetings
            .list(&MeetingFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn stored_policy_can_enable_low_severity_meetings() {
        let state = test_state(None).await;
        upsert_authority(
            &state,
            authority_request("Ana", "ana@city.gov", "operations"),
            at(9, 0, 0),
        )
        .await
        .unwrap();
        let mut low = AlertPolicy::default().low;
        low.auto_schedule = true;
        upsert_alert_config(
            &state,
            AlertConfigRequest {
                alert_type: Some("fire".to_string()),
                policy: Some(PartialAlertPolicy {
                    low: Some(low),
                    ..Default::default()
                }),
                ..Default::default()
            },
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let outcome = schedule_alert_meeting(&state, alert("A3", "fire", "low"), at(10, 0, 0))
            .await
            .unwrap();
        assert!(matches!(outcome, ScheduleOutcome::MeetingScheduled { .. }));
    }

    #[tokio::test]
    async fn no_responsible_authorities_stores_nothing() {
        let state = test_state(None).await;
        upsert_authority(
            &state,
            authority_request("Cy", "cy@city.gov", "finance"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let err = schedule_alert_meeting(&state, alert("A4", "fire", "high"), at(10, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainsyncError::NoResponsibleAuthorities(ref t) if t == "fire"));
        assert!(list_meetings_for_alert(&state, "A4").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn every_responsible_authority_is_a_pending_attendee() {
        let state = test_state(None).await;
        for (name, department) in [
            ("Ana", "operations"),
            ("Ben", "executive"),
            ("Cy", "public_safety"),
            ("Di", "finance"),
        ] {
            let email = format!("{}@city.gov", name.to_lowercase());
            upsert_authority(&state, authority_request(name, &email, department), at(9, 0, 0))
                .await
                .unwrap();
        }

        let outcome = schedule_alert_meeting(&state, alert("A5", "fire", "critical"), at(10, 0, 0))
            .await
            .unwrap();
        let ScheduleOutcome::MeetingScheduled { meeting } = outcome else {
            panic!("expected a meeting");
        };
        assert_eq!(meeting.attendees.len(), 3);
        assert!(meeting
            .attendees
            .iter()
            .all(|a| a.status == AttendeeStatus::Pending));
    }

    #[tokio::test]
    async fn region_narrows_the_attendees() {
        let state = test_state(None).await;
        upsert_authority(
            &state,
            authority_request("Ana", "ana@city.gov", "operations"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let mut request = alert("A6", "fire", "high");
        request.location = Some(Location {
            region: Some("south".to_string()),
            address: None,
            latitude: None,
            longitude: None,
        });
        let err = schedule_alert_meeting(&state, request, at(10, 0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainsyncError::NoResponsibleAuthorities(_)));
    }

    #[tokio::test]
    async fn calendar_failure_still_saves_the_meeting() {
        let calendar = Arc::new(MockCalendar::failing());
        let state = test_state(Some(calendar.clone())).await;
        upsert_authority(
            &state,
            with_calendar(authority_request("Ana", "ana@city.gov", "operations"), "t"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        let outcome = schedule_alert_meeting(&state, alert("A7", "fire", "high"), at(10, 0, 0))
            .await
            .unwrap();
        assert!(matches!(outcome, ScheduleOutcome::MeetingScheduled { .. }));
        assert_eq!(calendar.call_count(), 1);

        let stored = list_meetings_for_alert(&state, "A7").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].google_event_id.is_none());
        assert!(stored[0]
            .calendar_error
            .as_deref()
            .unwrap()
            .contains("quota"));
    }

    #[tokio::test]
    async fn calendar_success_is_recorded() {
        let calendar = Arc::new(MockCalendar::default());
        let state = test_state(Some(calendar.clone())).await;
        upsert_authority(
            &state,
            with_calendar(authority_request("Ana", "ana@city.gov", "operations"), "t"),
            at(9, 0, 0),
        )
        .await
        .unwrap();

        schedule_alert_meeting(&state, alert("A8", "fire", "medium"), at(10, 0, 0))
            .await
            .unwrap();

        let stored = list_meetings_for_alert(&state, "A8").await.unwrap();
        assert_eq!(stored[0].google_event_id.as_deref(), Some("evt-123"));
        assert_eq!(stored[0].google_meet_link.as_deref(), Some(MEET_LINK));
        assert!(stored[0].calendar_error.is_none());
    }

    // --- Meeting updates ---

    async fn scheduled_meeting_id(state: &crate::handlers::ChainsyncState) -> String {
        upsert_authority(
            state,
            authority_request("Ana", "ana@city.gov", "operations"),
            at(9, 0, 0),
        )
        .await
        .unwrap();
        match schedule_alert_meeting(state, alert("A9", "fire", "high"), at(10, 0, 0))
            .await
            .unwrap()
        {
            ScheduleOutcome::MeetingScheduled { meeting } => meeting.id.to_string(),
            other => panic!("expected a meeting, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_update_with_note() {
        let state = test_state(None).await;
        let id = scheduled_meeting_id(&state).await;

        let updated = update_meeting_status(
            &state,
            &id,
            UpdateStatusRequest {
                status: Some("in-progress".to_string()),
                note: Some("Bridge line open".to_string()),
                author: None,
            },
            at(10, 20, 0),
        )
        .await
        .unwrap();

        assert_eq!(updated.status, MeetingStatus::InProgress);
        assert_eq!(updated.notes.len(), 1);
        assert_eq!(updated.notes[0].author, "system");
        assert_eq!(updated.updated_at, at(10, 20, 0));
    }

    #[tokio::test]
    async fn status_update_errors() {
        let state = test_state(None).await;
        let id = scheduled_meeting_id(&state).await;

        let invalid = update_meeting_status(
            &state,
            &id,
            UpdateStatusRequest {
                status: Some("postponed".to_string()),
                ..Default::default()
            },
            at(10, 20, 0),
        )
        .await;
        assert!(matches!(invalid, Err(ChainsyncError::Validation(_))));

        let bad_id = update_meeting_status(
            &state,
            "not-a-uuid",
            UpdateStatusRequest {
                status: Some("completed".to_string()),
                ..Default::default()
            },
            at(10, 20, 0),
        )
        .await;
        assert!(matches!(bad_id, Err(ChainsyncError::Validation(_))));

        let unknown = update_meeting_status(
            &state,
            &uuid::Uuid::new_v4().to_string(),
            UpdateStatusRequest {
                status: Some("completed".to_string()),
                ..Default::default()
            },
            at(10, 20, 0),
        )
        .await;
        assert!(matches!(unknown, Err(ChainsyncError::NotFound(_))));
    }

    #[tokio::test]
    async fn notes_are_appended() {
        let state = test_state(None).await;
        let id = scheduled_meeting_id(&state).await;

        for content in ["First", "Second"] {
            add_meeting_note(
                &state,
                &id,
                AddNoteRequest {
                    content: Some(content.to_string()),
                    author: Some("ops".to_string()),
                },
                at(10, 30, 0),
            )
            .await
            .unwrap();
        }
        let meeting = &list_meetings_for_alert(&state, "A9").await.unwrap()[0];
        let contents: Vec<_> = meeting.notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["First", "Second"]);
        assert_eq!(meeting.status, MeetingStatus::Scheduled);

        let empty = add_meeting_note(&state, &id, AddNoteRequest::default(), at(10, 30, 0)).await;
        assert!(matches!(empty, Err(ChainsyncError::Validation(_))));
    }

    #[tokio::test]
    async fn meeting_list_rejects_unknown_filters() {
        let state = test_state(None).await;
        let query = MeetingListQuery {
            severity: Some("huge".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            list_meetings(&state, &query).await,
            Err(ChainsyncError::Validation(_))
        ));
    }

    // --- Authorities & configs ---

    #[test]
    fn authority_request_requires_core_fields() {
        let mut request = authority_request("Ana", "ana@city.gov", "operations");
        request.role = None;
        request.jurisdiction = None;

        let err = request.into_authority(at(9, 0, 0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: role, jurisdiction.region"
        );
    }

    #[test]
    fn authority_request_normalizes_email_and_calendar() {
        let authority = with_calendar(authority_request("Ana", "Ana@City.gov", "operations"), "t")
            .into_authority(at(9, 0, 0))
            .unwrap();
        assert_eq!(authority.email, "ana@city.gov");
        assert_eq!(authority.priority, 100);
        let link = authority.google_calendar.unwrap();
        assert_eq!(link.calendar_id, "primary");
        assert!(link.connected);
    }

    #[tokio::test]
    async fn deactivating_unknown_authority_is_not_found() {
        let state = test_state(None).await;
        assert!(matches!(
            deactivate_authority(&state, "ghost@city.gov").await,
            Err(ChainsyncError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn alert_config_requires_type() {
        let state = test_state(None).await;
        let err = upsert_alert_config(&state, AlertConfigRequest::default(), at(9, 0, 0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("alertType"));
        assert!(list_alert_configs(&state).await.unwrap().is_empty());
    }
}
