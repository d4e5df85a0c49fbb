#[cfg(test)]
mod tests {
    use crate::logic::generate_slots;
    use barberbook_common::models::DaySchedule;
    use chrono::{NaiveTime, Timelike};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn minutes(t: NaiveTime) -> u32 {
        t.hour() * 60 + t.minute()
    }

    fn from_minutes(m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap()
    }

    prop_compose! {
        /// An arbitrary open day, optionally with a break somewhere inside
        /// the opening window, paired with a slot duration.
        fn arb_day()(
            start in 0u32..1200,
            len in 1u32..600,
            duration in 10u32..120,
            with_break in any::<bool>(),
            break_offset in 0u32..600,
            break_len in 1u32..120,
        ) -> (DaySchedule, u32) {
            let end = (start + len).min(1439);
            let mut day = DaySchedule::open(from_minutes(start), from_minutes(end));
            if with_break {
                let break_start = (start + break_offset).min(end);
                let break_end = (break_start + break_len).min(end);
                day.break_enabled = true;
                day.break_start = Some(from_minutes(break_start));
                day.break_end = Some(from_minutes(break_end));
            }
            (day, duration)
        }
    }

    proptest! {
        #[test]
        fn slots_stay_inside_opening_hours((day, duration) in arb_day()) {
            let start = minutes(day.start.unwrap());
            let end = minutes(day.end.unwrap());

            for slot in generate_slots(&day, duration) {
                let m = minutes(slot.time);
                prop_assert!(m >= start, "slot {} before opening", slot.label);
                prop_assert!(m < end, "slot {} at or past closing", slot.label);
            }
        }

        #[test]
        fn slots_never_fall_inside_an_enabled_break((day, duration) in arb_day()) {
            if let (true, Some(bs), Some(be)) = (day.break_enabled, day.break_start, day.break_end) {
                let break_start = minutes(bs);
                let break_end = minutes(be);

                for slot in generate_slots(&day, duration) {
                    let m = minutes(slot.time);
                    prop_assert!(
                        m < break_start || m >= break_end,
                        "slot {} inside the break window",
                        slot.label
                    );
                }
            }
        }

        #[test]
        fn slots_align_to_the_duration_grid((day, duration) in arb_day()) {
            let start = minutes(day.start.unwrap());
            let mut previous: Option<u32> = None;

            for slot in generate_slots(&day, duration) {
                let m = minutes(slot.time);
                prop_assert_eq!((m - start) % duration, 0);
                if let Some(prev) = previous {
                    prop_assert!(m > prev, "slots must be strictly increasing");
                }
                previous = Some(m);
            }
        }

        #[test]
        fn slots_without_a_break_are_evenly_spaced(
            start in 0u32..1200,
            len in 1u32..600,
            duration in 10u32..120,
        ) {
            let end = (start + len).min(1439);
            let day = DaySchedule::open(from_minutes(start), from_minutes(end));

            let times: Vec<u32> = generate_slots(&day, duration)
                .map(|slot| minutes(slot.time))
                .collect();
            for pair in times.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], duration);
            }
        }

        #[test]
        fn slot_labels_are_unique((day, duration) in arb_day()) {
            let labels: Vec<String> = generate_slots(&day, duration)
                .map(|slot| slot.label)
                .collect();
            let unique: HashSet<&String> = labels.iter().collect();
            prop_assert_eq!(unique.len(), labels.len());
        }
    }
}
