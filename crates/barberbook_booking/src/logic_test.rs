#[cfg(test)]
mod tests {
    use crate::error::BookingError;
    use crate::logic::{
        generate_slots, resolve_availability, slot_label, validate_schedule,
        within_booking_horizon,
    };
    use barberbook_common::models::{DaySchedule, DayStatus, SlotPeriod, WeeklySchedule};
    use chrono::{Duration, NaiveDate, NaiveTime};
    use std::collections::HashSet;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_with_break(
        start: NaiveTime,
        end: NaiveTime,
        break_start: NaiveTime,
        break_end: NaiveTime,
    ) -> DaySchedule {
        DaySchedule {
            enabled: true,
            start: Some(start),
            end: Some(end),
            break_enabled: true,
            break_start: Some(break_start),
            break_end: Some(break_end),
        }
    }

    #[test]
    fn test_slot_label_formatting() {
        assert_eq!(slot_label(time(9, 0)), "9:00 AM");
        assert_eq!(slot_label(time(0, 30)), "12:30 AM");
        assert_eq!(slot_label(time(12, 0)), "12:00 PM");
        assert_eq!(slot_label(time(13, 5)), "1:05 PM");
        assert_eq!(slot_label(time(17, 0)), "5:00 PM");
        assert_eq!(slot_label(time(23, 20)), "11:20 PM");
    }

    #[test]
    fn test_generate_slots_hourly_day() {
        // 09:00-18:00 at 60 minutes: nine slots, none at or past closing
        let day = DaySchedule::open(time(9, 0), time(18, 0));
        let slots: Vec<_> = generate_slots(&day, 60).collect();

        assert_eq!(slots.len(), 9);
        assert_eq!(slots[0].label, "9:00 AM");
        assert_eq!(slots[8].label, "5:00 PM");

        let morning = slots
            .iter()
            .filter(|s| s.period == SlotPeriod::Morning)
            .count();
        assert_eq!(morning, 3); // 9, 10, 11
    }

    #[test]
    fn test_generate_slots_skips_break_window() {
        // Same day with a 12:00-13:00 break: the noon slot disappears
        let day = day_with_break(time(9, 0), time(18, 0), time(12, 0), time(13, 0));
        let slots: Vec<_> = generate_slots(&day, 60).collect();

        assert_eq!(slots.len(), 8);
        assert!(slots.iter().all(|s| s.label != "12:00 PM"));
        // The break window is half-open: a slot at exactly break_end survives
        assert!(slots.iter().any(|s| s.label == "1:00 PM"));
    }

    #[test]
    fn test_generate_slots_default_duration() {
        let day = DaySchedule::open(time(9, 0), time(18, 0));
        let slots: Vec<_> = generate_slots(&day, 40).collect();

        // 540 minutes of opening time stepped by 40
        assert_eq!(slots.len(), 14);
        assert_eq!(slots[0].label, "9:00 AM");
        assert_eq!(slots[13].label, "5:40 PM");
        assert_eq!(slots[1].time, time(9, 40));
    }

    #[test]
    fn test_generate_slots_degenerate_days() {
        assert_eq!(generate_slots(&DaySchedule::closed(), 40).count(), 0);

        // Inverted window
        let inverted = DaySchedule::open(time(18, 0), time(9, 0));
        assert_eq!(generate_slots(&inverted, 40).count(), 0);

        // Enabled but missing times
        let missing = DaySchedule {
            enabled: true,
            start: Some(time(9, 0)),
            end: None,
            break_enabled: false,
            break_start: None,
            break_end: None,
        };
        assert_eq!(generate_slots(&missing, 40).count(), 0);
    }

    #[test]
    fn test_generate_slots_disabled_break_is_ignored() {
        let mut day = day_with_break(time(9, 0), time(18, 0), time(12, 0), time(13, 0));
        day.break_enabled = false;
        let slots: Vec<_> = generate_slots(&day, 60).collect();

        assert_eq!(slots.len(), 9);
        assert!(slots.iter().any(|s| s.label == "12:00 PM"));
    }

    #[test]
    fn test_resolve_availability_precedence() {
        let schedule = WeeklySchedule::default();
        let today = date(2025, 9, 2); // a Tuesday
        let no_blocked = HashSet::new();
        let no_booked = HashSet::new();

        // Past wins over everything, even when the date is also blocked
        let yesterday = date(2025, 9, 1);
        let mut blocked = HashSet::new();
        blocked.insert(yesterday);
        let past = resolve_availability(yesterday, today, &schedule, &blocked, &no_booked, 40);
        assert_eq!(past.day_status, DayStatus::Past);
        assert!(past.slots.is_empty());

        // Blocked wins over an otherwise open weekday
        let wednesday = date(2025, 9, 3);
        let mut blocked = HashSet::new();
        blocked.insert(wednesday);
        let result =
            resolve_availability(wednesday, today, &schedule, &blocked, &no_booked, 40);
        assert_eq!(result.day_status, DayStatus::Blocked);
        assert!(result.slots.is_empty());

        // Sunday is closed by default
        let sunday = date(2025, 9, 7);
        let result =
            resolve_availability(sunday, today, &schedule, &no_blocked, &no_booked, 40);
        assert_eq!(result.day_status, DayStatus::Closed);
        assert!(result.slots.is_empty());

        // An open day carries slots
        let result =
            resolve_availability(wednesday, today, &schedule, &no_blocked, &no_booked, 40);
        assert_eq!(result.day_status, DayStatus::Open);
        assert_eq!(result.slots.len(), 14);
    }

    #[test]
    fn test_resolve_availability_marks_booked_slots() {
        let schedule = WeeklySchedule::default();
        let today = date(2025, 9, 2);
        let wednesday = date(2025, 9, 3);

        let mut booked = HashSet::new();
        booked.insert("9:40 AM".to_string());

        let result =
            resolve_availability(wednesday, today, &schedule, &HashSet::new(), &booked, 40);

        let flagged: Vec<_> = result.slots.iter().filter(|s| s.booked).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].label, "9:40 AM");
        assert!(result
            .slots
            .iter()
            .filter(|s| s.label != "9:40 AM")
            .all(|s| !s.booked));
    }

    #[test]
    fn test_within_booking_horizon_bounds() {
        let today = date(2025, 9, 2);

        assert!(within_booking_horizon(today, today, 60));
        assert!(within_booking_horizon(today + Duration::days(60), today, 60));
        assert!(!within_booking_horizon(today + Duration::days(61), today, 60));
        assert!(!within_booking_horizon(today - Duration::days(1), today, 60));
    }

    #[test]
    fn test_validate_schedule_accepts_defaults() {
        assert!(validate_schedule(&WeeklySchedule::default()).is_ok());
    }

    #[test]
    fn test_validate_schedule_rejects_inverted_hours() {
        let mut schedule = WeeklySchedule::default();
        schedule.tuesday = DaySchedule::open(time(18, 0), time(9, 0));

        let err = validate_schedule(&schedule).unwrap_err();
        match err {
            BookingError::Validation(msg) => {
                assert!(msg.contains("Tue"), "unexpected message: {msg}");
                assert!(msg.contains("before closing"), "unexpected message: {msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_schedule_rejects_break_outside_hours() {
        let mut schedule = WeeklySchedule::default();
        schedule.friday =
            day_with_break(time(9, 0), time(18, 0), time(8, 0), time(10, 0));

        let err = validate_schedule(&schedule).unwrap_err();
        match err {
            BookingError::Validation(msg) => {
                assert!(msg.contains("Fri"), "unexpected message: {msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_schedule_rejects_enabled_day_without_times() {
        let mut schedule = WeeklySchedule::default();
        schedule.monday = DaySchedule {
            enabled: true,
            start: None,
            end: None,
            break_enabled: false,
            break_start: None,
            break_end: None,
        };

        assert!(matches!(
            validate_schedule(&schedule),
            Err(BookingError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_schedule_ignores_disabled_days() {
        let mut schedule = WeeklySchedule::default();
        // A disabled day with garbage times still validates
        schedule.sunday = DaySchedule {
            enabled: false,
            start: Some(time(20, 0)),
            end: Some(time(8, 0)),
            break_enabled: true,
            break_start: None,
            break_end: None,
        };

        assert!(validate_schedule(&schedule).is_ok());
    }
}
