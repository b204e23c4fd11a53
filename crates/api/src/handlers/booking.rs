//! Handlers for the `/bookings` resource.
//!
//! All three endpoints require a valid Bearer token. The recorded `user` is
//! always the token subject; anything a client puts in the request body is
//! discarded.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use bistro_core::error::CoreError;
use bistro_core::types::DbId;
use bistro_db::models::booking::{Booking, CreateBooking};
use bistro_db::repositories::{BookingRepo, RestaurantCacheRepo};

use crate::error::AppResult;
use crate::extractors::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /bookings
///
/// Validates the party size, consults the restaurant cache (advisory only),
/// persists the booking, and enqueues a `booking.created` notification. The
/// 201 response is the stored row with its assigned id.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    input.user = user.subject;

    if input.people <= 0 {
        return Err(CoreError::Validation("people must be greater than zero".into()).into());
    }

    // The cache may lag the restaurant service, so an unknown id is logged
    // and the booking recorded anyway.
    match RestaurantCacheRepo::get(&state.pool, input.restaurant_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::debug!(
                restaurant_id = input.restaurant_id,
                "Restaurant not in local cache"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Restaurant cache lookup failed");
        }
    }

    let booking = BookingRepo::create(&state.pool, &input).await?;
    tracing::info!(booking_id = booking.id, user = %booking.user, "Booking created");

    // Fire and forget: a full buffer or dead worker never fails the request.
    state.notifier.notify(&booking);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Booking>> {
    let booking = BookingRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "booking",
            id,
        })?;
    Ok(Json(booking))
}

/// GET /bookings
///
/// Returns every booking; an empty table yields `[]`, not an error.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = BookingRepo::list(&state.pool).await?;
    Ok(Json(bookings))
}

/// Routes mounted at the application root.
///
/// ```text
/// GET    /bookings        -> list
/// POST   /bookings        -> create
/// GET    /bookings/{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list).post(create))
        .route("/bookings/{id}", get(get_by_id))
}
