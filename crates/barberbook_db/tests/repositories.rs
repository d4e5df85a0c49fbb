//! Repository tests against an in-memory SQLite database.

use barberbook_common::models::{
    Appointment, AppointmentStatus, BlockedDate, ServiceKind, WeeklySchedule,
};
use barberbook_db::{
    AppointmentRepository, BlockedDateRepository, DbClient, DbError, ScheduleRepository,
    SqlAppointmentRepository, SqlBlockedDateRepository, SqlScheduleRepository,
};
use chrono::{NaiveDate, NaiveTime, Utc};

async fn memory_client() -> DbClient {
    DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory database should open")
}

fn appointment(id: &str, date: NaiveDate, time: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        customer_name: "Marcus Reed".to_string(),
        customer_email: "marcus@example.com".to_string(),
        customer_phone: "+15550001111".to_string(),
        service: ServiceKind::Fade,
        extras: vec![],
        notes: None,
        date,
        time: time.to_string(),
        total_cents: 2500,
        deposit_cents: 500,
        status: AppointmentStatus::Confirmed,
        payment_reference: Some("pi_test_123".to_string()),
        created_at: Utc::now(),
        cancelled_at: None,
    }
}

#[tokio::test]
async fn schedule_round_trips_and_defaults() {
    let client = memory_client().await;
    let repo = SqlScheduleRepository::new(client);
    repo.init_schema().await.unwrap();

    // Nothing saved yet: the default hours come back.
    let loaded = repo.load().await.unwrap();
    assert_eq!(loaded, WeeklySchedule::default());
    assert!(!loaded.sunday.enabled);

    let mut schedule = WeeklySchedule::default();
    schedule.monday.break_enabled = true;
    schedule.monday.break_start = NaiveTime::from_hms_opt(12, 0, 0);
    schedule.monday.break_end = NaiveTime::from_hms_opt(13, 0, 0);
    repo.save(&schedule).await.unwrap();

    let loaded = repo.load().await.unwrap();
    assert_eq!(loaded, schedule);

    // Saving again replaces the previous document.
    let plain = WeeklySchedule::default();
    repo.save(&plain).await.unwrap();
    assert_eq!(repo.load().await.unwrap(), plain);
}

#[tokio::test]
async fn blocked_dates_behave_as_a_set() {
    let client = memory_client().await;
    let repo = SqlBlockedDateRepository::new(client);
    repo.init_schema().await.unwrap();

    let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    let entry = BlockedDate {
        id: "b1".to_string(),
        date: christmas,
        reason: "Holiday".to_string(),
        created_at: Utc::now(),
    };
    repo.add(entry.clone()).await.unwrap();

    // Blocking again keeps the original entry rather than duplicating it.
    let duplicate = BlockedDate {
        id: "b2".to_string(),
        date: christmas,
        reason: "Unavailable".to_string(),
        created_at: Utc::now(),
    };
    let stored = repo.add(duplicate).await.unwrap();
    assert_eq!(stored.id, "b1");
    assert_eq!(repo.list().await.unwrap().len(), 1);

    assert!(repo.find_by_date(christmas).await.unwrap().is_some());
    assert!(repo.remove_by_date(christmas).await.unwrap());
    assert!(repo.find_by_date(christmas).await.unwrap().is_none());
    assert!(!repo.remove_by_date(christmas).await.unwrap());
}

#[tokio::test]
async fn confirmed_slot_is_unique() {
    let client = memory_client().await;
    let repo = SqlAppointmentRepository::new(client);
    repo.init_schema().await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
    repo.insert_confirmed(&appointment("a1", date, "10:00 AM"))
        .await
        .unwrap();

    let second = repo
        .insert_confirmed(&appointment("a2", date, "10:00 AM"))
        .await;
    assert!(matches!(second, Err(DbError::UniqueViolation)));

    // A different slot on the same day is fine.
    repo.insert_confirmed(&appointment("a3", date, "10:40 AM"))
        .await
        .unwrap();

    let booked = repo.booked_times_for_date(date).await.unwrap();
    assert_eq!(booked.len(), 2);
    assert!(booked.contains(&"10:00 AM".to_string()));
}

#[tokio::test]
async fn cancelling_frees_the_slot_for_rebooking() {
    let client = memory_client().await;
    let repo = SqlAppointmentRepository::new(client);
    repo.init_schema().await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
    repo.insert_confirmed(&appointment("a1", date, "10:00 AM"))
        .await
        .unwrap();

    assert!(repo.mark_cancelled("a1", Utc::now()).await.unwrap());
    // Already cancelled: the conditional update touches nothing.
    assert!(!repo.mark_cancelled("a1", Utc::now()).await.unwrap());

    // The cancelled row is preserved but no longer holds the slot.
    let kept = repo.find_by_id("a1").await.unwrap().unwrap();
    assert_eq!(kept.status, AppointmentStatus::Cancelled);
    assert!(kept.cancelled_at.is_some());
    assert!(repo
        .find_confirmed_at(date, "10:00 AM")
        .await
        .unwrap()
        .is_none());

    repo.insert_confirmed(&appointment("a2", date, "10:00 AM"))
        .await
        .unwrap();
}

#[tokio::test]
async fn rescheduling_respects_the_slot_index() {
    let client = memory_client().await;
    let repo = SqlAppointmentRepository::new(client);
    repo.init_schema().await.unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
    repo.insert_confirmed(&appointment("a1", date, "10:00 AM"))
        .await
        .unwrap();
    repo.insert_confirmed(&appointment("a2", date, "10:40 AM"))
        .await
        .unwrap();

    // Moving onto an occupied slot collides with the index.
    let collision = repo.update_slot("a1", date, "10:40 AM").await;
    assert!(matches!(collision, Err(DbError::UniqueViolation)));

    // Moving to a free slot succeeds and releases the old one.
    assert!(repo.update_slot("a1", date, "11:20 AM").await.unwrap());
    assert!(repo
        .find_confirmed_at(date, "10:00 AM")
        .await
        .unwrap()
        .is_none());
    let moved = repo.find_by_id("a1").await.unwrap().unwrap();
    assert_eq!(moved.time, "11:20 AM");

    // Unknown or cancelled appointments are not moved.
    assert!(!repo.update_slot("missing", date, "12:00 PM").await.unwrap());
}
