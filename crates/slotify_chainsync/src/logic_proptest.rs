#[cfg(test)]
mod tests {
    use crate::logic::{compute_meeting_slot, slot_step_minutes};
    use chrono::{DateTime, Duration, Timelike, Utc};
    use proptest::prelude::*;
    use slotify_common::models::SeverityPolicy;

    // Any instant between 2000 and 2100, with sub-second precision
    fn instant(secs: i64, nanos: u32) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, nanos).unwrap()
    }

    fn policy(duration: i64, emergency_override: bool) -> SeverityPolicy {
        SeverityPolicy {
            auto_schedule: true,
            meeting_duration: duration,
            required_departments: vec![],
            emergency_override,
        }
    }

    proptest! {
        #[test]
        fn slot_starts_on_next_boundary(
            secs in 946_684_800i64..4_102_444_800i64,
            nanos in 0u32..1_000_000_000u32,
            duration in 1i64..480,
            emergency_override in any::<bool>(),
        ) {
            let now = instant(secs, nanos);
            let window = compute_meeting_slot(now, &policy(duration, emergency_override));
            let step = slot_step_minutes(emergency_override);

            prop_assert!(window.start_time >= now);
            prop_assert!(window.start_time - now < Duration::minutes(step));
            prop_assert_eq!(i64::from(window.start_time.minute()) % step, 0);
            prop_assert_eq!(window.start_time.second(), 0);
            prop_assert_eq!(window.start_time.nanosecond(), 0);
            prop_assert_eq!(window.end_time - window.start_time, Duration::minutes(duration));
            prop_assert_eq!(window.duration_minutes, duration);
        }

        #[test]
        fn slot_on_boundary_is_now(
            boundary in 0i64..1_000_000,
            emergency_override in any::<bool>(),
        ) {
            let step = slot_step_minutes(emergency_override);
            let now = instant(946_684_800 + boundary * step * 60, 0);
            let window = compute_meeting_slot(now, &policy(30, emergency_override));
            prop_assert_eq!(window.start_time, now);
        }
    }
}
