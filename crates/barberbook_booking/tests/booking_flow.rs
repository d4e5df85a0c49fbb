// --- File: crates/barberbook_booking/tests/booking_flow.rs ---
//! End-to-end booking flow against an in-memory store.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use barberbook_booking::booking::{
    book_slot, cancel_appointment, reschedule_appointment, Actor, NewBooking,
};
use barberbook_booking::handlers::BookingState;
use barberbook_booking::routes::routes;
use barberbook_booking::BookingError;
use barberbook_common::models::{AppointmentStatus, DaySchedule, ServiceKind, WeeklySchedule};
use barberbook_config::{AdminConfig, AppConfig, BookingConfig, ServerConfig};
use barberbook_db::{
    AppointmentRepository, BlockedDateRepository, DbClient, ScheduleRepository,
    SqlAppointmentRepository, SqlBlockedDateRepository, SqlScheduleRepository,
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

async fn memory_client() -> DbClient {
    DbClient::from_url("sqlite::memory:")
        .await
        .expect("in-memory pool")
}

async fn appointment_repo() -> SqlAppointmentRepository {
    let repo = SqlAppointmentRepository::new(memory_client().await);
    repo.init_schema().await.expect("schema");
    repo
}

fn today() -> NaiveDate {
    // A Tuesday; the default schedule is open Monday through Saturday.
    NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()
}

fn policy() -> BookingConfig {
    BookingConfig::default()
}

fn new_booking(date: NaiveDate, time: &str) -> NewBooking {
    NewBooking {
        customer_name: "Marcus Reid".to_string(),
        customer_email: "marcus@example.com".to_string(),
        customer_phone: "+1 555 0134".to_string(),
        service: ServiceKind::Fade,
        extras: Vec::new(),
        notes: None,
        date,
        time: time.to_string(),
        total_cents: 3500,
        payment_reference: None,
    }
}

#[tokio::test]
async fn booking_a_free_slot_confirms_an_appointment() {
    let repo = appointment_repo().await;
    let schedule = WeeklySchedule::default();
    let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    let appointment = book_slot(
        &repo,
        &schedule,
        &HashSet::new(),
        new_booking(date, "10:20 AM"),
        today(),
        &policy(),
    )
    .await
    .expect("booking should succeed");

    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert_eq!(appointment.deposit_cents, 500);
    assert_eq!(appointment.time, "10:20 AM");

    let holder = repo
        .find_confirmed_at(date, "10:20 AM")
        .await
        .expect("lookup")
        .expect("slot should be held");
    assert_eq!(holder.id, appointment.id);
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_leave_exactly_one_winner() {
    let repo = appointment_repo().await;
    let schedule = WeeklySchedule::default();
    let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    let blocked = HashSet::new();
    let booking_policy = policy();
    let first = book_slot(
        &repo,
        &schedule,
        &blocked,
        new_booking(date, "11:00 AM"),
        today(),
        &booking_policy,
    );
    let second = book_slot(
        &repo,
        &schedule,
        &blocked,
        new_booking(date, "11:00 AM"),
        today(),
        &booking_policy,
    );

    let (a, b) = tokio::join!(first, second);

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactly one booking must win the slot");

    let loser = if a.is_err() { a } else { b };
    assert!(matches!(loser, Err(BookingError::SlotAlreadyBooked)));

    let booked = repo.booked_times_for_date(date).await.expect("lookup");
    assert_eq!(booked, vec!["11:00 AM".to_string()]);
}

#[tokio::test]
async fn cancelling_is_idempotent_and_frees_the_slot() {
    let repo = appointment_repo().await;
    let schedule = WeeklySchedule::default();
    let date = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    let appointment = book_slot(
        &repo,
        &schedule,
        &HashSet::new(),
        new_booking(date, "9:40 AM"),
        today(),
        &policy(),
    )
    .await
    .expect("booking");

    let cancelled = cancel_appointment(&repo, &appointment.id, Actor::Customer)
        .await
        .expect("cancel");
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    // A second cancel is a no-op, not an error
    let again = cancel_appointment(&repo, &appointment.id, Actor::Admin)
        .await
        .expect("repeat cancel");
    assert_eq!(again.status, AppointmentStatus::Cancelled);

    // The slot is free again for a different customer
    let rebooked = book_slot(
        &repo,
        &schedule,
        &HashSet::new(),
        new_booking(date, "9:40 AM"),
        today(),
        &policy(),
    )
    .await
    .expect("rebooking a freed slot");
    assert_ne!(rebooked.id, appointment.id);
}

#[tokio::test]
async fn cancelling_an_unknown_appointment_is_not_found() {
    let repo = appointment_repo().await;

    let result = cancel_appointment(&repo, "missing-id", Actor::Customer).await;
    assert!(matches!(result, Err(BookingError::NotFound(_))));
}

#[tokio::test]
async fn rescheduling_moves_the_appointment_and_respects_conflicts() {
    let repo = appointment_repo().await;
    let schedule = WeeklySchedule::default();
    let blocked = HashSet::new();
    let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
    let thursday = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();

    let first = book_slot(
        &repo,
        &schedule,
        &blocked,
        new_booking(wednesday, "10:20 AM"),
        today(),
        &policy(),
    )
    .await
    .expect("first booking");
    let second = book_slot(
        &repo,
        &schedule,
        &blocked,
        new_booking(wednesday, "11:00 AM"),
        today(),
        &policy(),
    )
    .await
    .expect("second booking");

    // Moving onto a held slot is refused
    let conflict = reschedule_appointment(
        &repo,
        &schedule,
        &blocked,
        &first.id,
        wednesday,
        "11:00 AM",
        today(),
        &policy(),
    )
    .await;
    assert!(matches!(conflict, Err(BookingError::SlotAlreadyBooked)));

    // Moving onto its own slot is allowed
    let unchanged = reschedule_appointment(
        &repo,
        &schedule,
        &blocked,
        &first.id,
        wednesday,
        "10:20 AM",
        today(),
        &policy(),
    )
    .await
    .expect("no-op reschedule");
    assert_eq!(unchanged.time, "10:20 AM");

    // Moving to a free slot works and frees the old one
    let moved = reschedule_appointment(
        &repo,
        &schedule,
        &blocked,
        &first.id,
        thursday,
        "1:00 PM",
        today(),
        &policy(),
    )
    .await
    .expect("reschedule");
    assert_eq!(moved.date, thursday);
    assert_eq!(moved.time, "1:00 PM");

    let freed = repo
        .find_confirmed_at(wednesday, "10:20 AM")
        .await
        .expect("lookup");
    assert!(freed.is_none());

    // A cancelled appointment stays where it is
    cancel_appointment(&repo, &second.id, Actor::Admin)
        .await
        .expect("cancel");
    let result = reschedule_appointment(
        &repo,
        &schedule,
        &blocked,
        &second.id,
        thursday,
        "2:20 PM",
        today(),
        &policy(),
    )
    .await;
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[tokio::test]
async fn booking_rejects_bad_requests_before_writing() {
    let repo = appointment_repo().await;
    let schedule = WeeklySchedule::default();
    let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();

    // Bad email
    let mut booking = new_booking(wednesday, "10:20 AM");
    booking.customer_email = "not-an-email".to_string();
    let result = book_slot(&repo, &schedule, &HashSet::new(), booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Total below the deposit
    let mut booking = new_booking(wednesday, "10:20 AM");
    booking.total_cents = 100;
    let result = book_slot(&repo, &schedule, &HashSet::new(), booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Not a slot the generator produces
    let booking = new_booking(wednesday, "10:30 AM");
    let result = book_slot(&repo, &schedule, &HashSet::new(), booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Blocked date
    let mut blocked = HashSet::new();
    blocked.insert(wednesday);
    let booking = new_booking(wednesday, "10:20 AM");
    let result = book_slot(&repo, &schedule, &blocked, booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Past date
    let yesterday = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let booking = new_booking(yesterday, "10:20 AM");
    let result = book_slot(&repo, &schedule, &HashSet::new(), booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    // Sunday is closed by default
    let sunday = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
    let booking = new_booking(sunday, "10:20 AM");
    let result = book_slot(&repo, &schedule, &HashSet::new(), booking, today(), &policy()).await;
    assert!(matches!(result, Err(BookingError::Validation(_))));

    assert!(repo
        .booked_times_for_date(wednesday)
        .await
        .expect("lookup")
        .is_empty());
}

// --- Router-level tests for the admin surface ---

const ADMIN_SECRET: &str = "test-secret";

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_stripe: false,
        use_notify: false,
        booking: BookingConfig::default(),
        database: None,
        stripe: None,
        notify: None,
        admin: Some(AdminConfig {
            shared_secret: Some(ADMIN_SECRET.to_string()),
        }),
    })
}

async fn test_router() -> axum::Router {
    let client = memory_client().await;
    let schedule_repo = SqlScheduleRepository::new(client.clone());
    let blocked_repo = SqlBlockedDateRepository::new(client.clone());
    let appointment_repo = SqlAppointmentRepository::new(client);
    schedule_repo.init_schema().await.expect("schema");
    blocked_repo.init_schema().await.expect("schema");
    appointment_repo.init_schema().await.expect("schema");

    routes(Arc::new(BookingState {
        config: test_config(),
        schedule_repo,
        blocked_repo,
        appointment_repo,
        payment_service: None,
        notification_service: None,
    }))
}

#[tokio::test]
async fn admin_routes_require_the_shared_secret() {
    let router = test_router().await;

    let no_header = Request::builder()
        .uri("/admin/schedule")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(no_header).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let wrong_secret = Request::builder()
        .uri("/admin/schedule")
        .header("X-Admin-Auth-Secret", "wrong")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(wrong_secret).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let with_secret = Request::builder()
        .uri("/admin/schedule")
        .header("X-Admin-Auth-Secret", ADMIN_SECRET)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(with_secret).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn a_rejected_schedule_save_leaves_the_stored_schedule_intact() {
    let router = test_router().await;

    // Break outside the opening window
    let mut invalid = WeeklySchedule::default();
    invalid.tuesday = DaySchedule {
        enabled: true,
        start: Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
        end: Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
        break_enabled: true,
        break_start: Some(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
        break_end: Some(NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
    };

    let put = Request::builder()
        .method("PUT")
        .uri("/admin/schedule")
        .header("X-Admin-Auth-Secret", ADMIN_SECRET)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&invalid).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(put).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let get = Request::builder()
        .uri("/admin/schedule")
        .header("X-Admin-Auth-Secret", ADMIN_SECRET)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(get).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let stored: WeeklySchedule = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored, WeeklySchedule::default());
}

#[tokio::test]
async fn availability_reports_outside_horizon_dates_as_past() {
    let router = test_router().await;

    let request = Request::builder()
        .uri("/availability?date=1999-01-01")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["day_status"], "past");
    assert!(payload["slots"].as_array().unwrap().is_empty());
}
