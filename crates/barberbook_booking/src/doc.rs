// File: crates/barberbook_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa;
use utoipa::OpenApi;

use crate::booking::NewBooking;
use crate::handlers::{
    AppointmentsResponse, AvailabilityResponse, BlockDateRequest, BlockedDatesResponse,
    BookingResponse, CancellationResponse, RescheduleRequest, UnblockResponse,
};
use crate::logic::{DayAvailability, SlotAvailability};
use barberbook_common::models::{
    Appointment, BlockedDate, DaySchedule, DayStatus, Extra, ServiceKind, SlotPeriod,
    WeeklySchedule,
};

#[utoipa::path(
    get,
    path = "/availability",
    params(
        ("date" = String, Query, description = "Date in YYYY-MM-DD format", example = "2025-09-02", format = "date")
    ),
    responses(
        (status = 200, description = "Resolved day availability", body = AvailabilityResponse,
         example = json!({
             "date": "2025-09-02",
             "day_status": "open",
             "slots": [
                 {"time": "09:00", "label": "9:00 AM", "period": "morning", "booked": false},
                 {"time": "09:40", "label": "9:40 AM", "period": "morning", "booked": true}
             ]
         })
        ),
        (status = 400, description = "Invalid date format", body = String),
        (status = 503, description = "Appointment store unavailable", body = String)
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = NewBooking, example = json!({
        "customer_name": "Marcus Reid",
        "customer_email": "marcus@example.com",
        "customer_phone": "+1 555 0134",
        "service": "fade",
        "extras": [{"name": "Beard trim", "price_cents": 1000}],
        "notes": "Skin fade, number 2 on top",
        "date": "2025-09-02",
        "time": "10:00 AM",
        "total_cents": 4500,
        "payment_reference": "pi_3NXAbc123"
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse),
        (status = 400, description = "Invalid booking request", body = String),
        (status = 409, description = "Slot already booked", body = String,
         example = json!("Requested time slot is no longer available")
        ),
        (status = 503, description = "Appointment store unavailable", body = String)
    )
)]
fn doc_book_slot_handler() {}

#[utoipa::path(
    post,
    path = "/appointments/{id}/cancel",
    params(
        ("id" = String, Path, description = "The ID of the appointment to cancel")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse),
        (status = 404, description = "Appointment not found", body = String)
    )
)]
fn doc_cancel_appointment_handler() {}

#[utoipa::path(
    get,
    path = "/admin/appointments",
    params(
        ("from" = Option<String>, Query, description = "Earliest date to include, YYYY-MM-DD; defaults to today", format = "date")
    ),
    responses(
        (status = 200, description = "Appointments from the given date onward", body = AppointmentsResponse),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_list_appointments_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/appointments/{id}/cancel",
    params(
        ("id" = String, Path, description = "The ID of the appointment to cancel")
    ),
    responses(
        (status = 200, description = "Cancellation result", body = CancellationResponse),
        (status = 404, description = "Appointment not found", body = String),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_admin_cancel_appointment_handler() {}

#[utoipa::path(
    patch,
    path = "/admin/appointments/{id}/reschedule",
    params(
        ("id" = String, Path, description = "The ID of the appointment to move")
    ),
    request_body(content = RescheduleRequest, example = json!({
        "date": "2025-09-03",
        "time": "11:20 AM"
    })),
    responses(
        (status = 200, description = "Reschedule result", body = BookingResponse),
        (status = 404, description = "Appointment not found", body = String),
        (status = 409, description = "Target slot already booked", body = String),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_reschedule_appointment_handler() {}

#[utoipa::path(
    get,
    path = "/admin/schedule",
    responses(
        (status = 200, description = "The stored weekly schedule", body = WeeklySchedule),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_get_schedule_handler() {}

#[utoipa::path(
    put,
    path = "/admin/schedule",
    request_body = WeeklySchedule,
    responses(
        (status = 200, description = "The saved schedule", body = WeeklySchedule),
        (status = 400, description = "Schedule failed validation; nothing was saved", body = String,
         example = json!("Validation error: Tue: break must fall within opening hours")
        ),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_save_schedule_handler() {}

#[utoipa::path(
    get,
    path = "/admin/blocked-dates",
    responses(
        (status = 200, description = "All blocked dates, soonest first", body = BlockedDatesResponse),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_list_blocked_dates_handler() {}

#[utoipa::path(
    post,
    path = "/admin/blocked-dates",
    request_body(content = BlockDateRequest, example = json!({
        "date": "2024-12-25",
        "reason": "Holiday"
    })),
    responses(
        (status = 200, description = "The stored blocked date", body = BlockedDate),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_block_date_handler() {}

#[utoipa::path(
    delete,
    path = "/admin/blocked-dates/{date}",
    params(
        ("date" = String, Path, description = "Date to unblock, YYYY-MM-DD", format = "date")
    ),
    responses(
        (status = 200, description = "Unblock result", body = UnblockResponse),
        (status = 400, description = "Invalid date format", body = String),
        (status = 401, description = "Missing or invalid admin secret", body = String)
    )
)]
fn doc_unblock_date_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_book_slot_handler,
        doc_cancel_appointment_handler,
        doc_list_appointments_handler,
        doc_admin_cancel_appointment_handler,
        doc_reschedule_appointment_handler,
        doc_get_schedule_handler,
        doc_save_schedule_handler,
        doc_list_blocked_dates_handler,
        doc_block_date_handler,
        doc_unblock_date_handler
    ),
    components(
        schemas(
            AvailabilityResponse,
            DayAvailability,
            SlotAvailability,
            SlotPeriod,
            DayStatus,
            NewBooking,
            BookingResponse,
            CancellationResponse,
            RescheduleRequest,
            AppointmentsResponse,
            Appointment,
            ServiceKind,
            Extra,
            BlockDateRequest,
            BlockedDate,
            BlockedDatesResponse,
            UnblockResponse,
            DaySchedule,
            WeeklySchedule
        )
    ),
    tags(
        (name = "booking", description = "Barbershop Booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
