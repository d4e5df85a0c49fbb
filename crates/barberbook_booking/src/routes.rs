// --- File: crates/barberbook_booking/src/routes.rs ---

use crate::auth::{admin_auth_middleware, AdminAuthState};
use crate::handlers::{
    admin_cancel_appointment_handler, block_date_handler, book_slot_handler,
    cancel_appointment_handler, get_availability_handler, get_schedule_handler,
    list_appointments_handler, list_blocked_dates_handler, reschedule_appointment_handler,
    save_schedule_handler, unblock_date_handler, BookingState,
};
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
///
/// Public routes cover the customer flow; everything under `/admin` sits
/// behind the shared-secret middleware.
pub fn routes(state: Arc<BookingState>) -> Router {
    let auth_state = Arc::new(AdminAuthState {
        config: state.config.clone(),
    });

    let public_router = Router::new()
        .route("/availability", get(get_availability_handler))
        .route("/book", post(book_slot_handler))
        .route(
            "/appointments/{id}/cancel",
            post(cancel_appointment_handler),
        );

    let admin_router = Router::new()
        .route("/admin/appointments", get(list_appointments_handler))
        .route(
            "/admin/appointments/{id}/cancel",
            patch(admin_cancel_appointment_handler),
        )
        .route(
            "/admin/appointments/{id}/reschedule",
            patch(reschedule_appointment_handler),
        )
        .route(
            "/admin/schedule",
            get(get_schedule_handler).put(save_schedule_handler),
        )
        .route(
            "/admin/blocked-dates",
            get(list_blocked_dates_handler).post(block_date_handler),
        )
        .route("/admin/blocked-dates/{date}", delete(unblock_date_handler))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            admin_auth_middleware,
        ));

    public_router.merge(admin_router).with_state(state)
}
