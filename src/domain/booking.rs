use chrono::{Days, Local, NaiveDate};
use derive_more::{Display, Error};
use tracing::debug;

use crate::domain::core::{
    Guest, GuestRepository, Host, Money, Reservation, ReservationId, ReservationRepository,
};
use crate::domain::{DataAccessError, Entity, Response};

/// A candidate reservation before validation. Every field is optional so
/// that the structural pass can report each missing field separately.
#[derive(Debug, Default, Clone)]
pub struct ReservationDraft {
    pub guest: Option<Guest>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cost_of_stay: Option<Money>,
}

#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    #[display("Valid guest is required")]
    GuestRequired,
    #[display("Valid start date is required")]
    StartDateRequired,
    #[display("Valid end date is required")]
    EndDateRequired,
    #[display("Valid cost is required")]
    CostRequired,
    #[display("Guest not found")]
    GuestNotFound,
    #[display("Start date must not have occurred yet.")]
    StartDateTooSoon,
    #[display("Start date must come before the end date.")]
    StartNotBeforeEnd,
    #[display("Cost of stay must be a positive value.")]
    NegativeCost,
    #[display("Dates cannot Overlap")]
    Overlap,
    #[display("Reservation {} does not exist", _0)]
    DoesNotExist(#[error(not(source))] ReservationId),
}

/// Reservation lifecycle engine: validates candidates against the business
/// rules and the host's existing bookings, then drives the per-host ledger.
pub struct BookingService<G, R> {
    guests: G,
    reservations: R,
}

impl<G, R> BookingService<G, R>
where
    G: GuestRepository,
    R: ReservationRepository,
{
    pub fn new(guests: G, reservations: R) -> Self {
        Self {
            guests,
            reservations,
        }
    }

    /// All reservations for the host, ordered by start date. Storage keeps
    /// them unordered.
    pub async fn reservations_for_host(&self, host: &Host) -> Vec<Reservation> {
        let mut reservations = self
            .reservations
            .find_by_host(host.id())
            .await
            .into_records();
        reservations.sort_by_key(Reservation::start_date);
        reservations
    }

    /// The host's reservations booked by the given guest.
    pub async fn reservations_for_guest(&self, host: &Host, guest: &Guest) -> Vec<Reservation> {
        self.reservations_for_host(host)
            .await
            .into_iter()
            .filter(|r| r.guest_id() == guest.id())
            .collect()
    }

    /// The host's reservations starting after today.
    pub async fn upcoming_reservations(&self, host: &Host) -> Vec<Reservation> {
        let today = Local::now().date_naive();
        self.reservations_for_host(host)
            .await
            .into_iter()
            .filter(|r| r.start_date() > today)
            .collect()
    }

    pub async fn find_reservation(
        &self,
        host: &Host,
        id: ReservationId,
    ) -> Option<Reservation> {
        self.reservations.find_by_id(host.id(), id).await
    }

    /// Runs the full validation without persisting anything.
    pub async fn check_reservation(
        &self,
        host: &Host,
        draft: &ReservationDraft,
    ) -> Response<Reservation> {
        self.validate(host, draft, ReservationId::default()).await
    }

    /// Validates the draft and, on success, stores it under a freshly
    /// assigned id.
    pub async fn add_reservation(
        &self,
        host: &Host,
        draft: &ReservationDraft,
    ) -> Result<Response<Reservation>, DataAccessError> {
        let result = self.validate(host, draft, ReservationId::default()).await;
        let Some(candidate) = result.payload().cloned() else {
            return Ok(result);
        };
        let stored = self.reservations.add(host.id(), candidate).await?;
        debug!(host = %host.id(), id = %stored.id(), "reservation added");
        Ok(Response::success(stored))
    }

    /// Validates the draft against every reservation except the one being
    /// replaced, then swaps the stored record in place.
    pub async fn update_reservation(
        &self,
        host: &Host,
        id: ReservationId,
        draft: &ReservationDraft,
    ) -> Result<Response<Reservation>, DataAccessError> {
        let result = self.validate(host, draft, id).await;
        let Some(candidate) = result.payload().cloned() else {
            return Ok(result);
        };
        if !self.reservations.update(host.id(), candidate.clone()).await? {
            return Ok(Response::error(BookingError::DoesNotExist(id)));
        }
        debug!(host = %host.id(), id = %id, "reservation updated");
        Ok(Response::success(candidate))
    }

    /// Removes the reservation. Absence is reported on the response, not as
    /// an error.
    pub async fn cancel_reservation(
        &self,
        host: &Host,
        id: ReservationId,
    ) -> Result<Response<ReservationId>, DataAccessError> {
        if !self.reservations.delete(host.id(), id).await? {
            return Ok(Response::error(BookingError::DoesNotExist(id)));
        }
        debug!(host = %host.id(), id = %id, "reservation cancelled");
        Ok(Response::success(id))
    }

    /// Three short-circuiting passes: structural (fields present), semantic
    /// (referential and date rules), then the date-conflict scan. The
    /// reservation whose id equals `exclude_id` is ignored by the conflict
    /// scan so an update never collides with itself.
    async fn validate(
        &self,
        host: &Host,
        draft: &ReservationDraft,
        exclude_id: ReservationId,
    ) -> Response<Reservation> {
        let mut response = Response::new();

        if draft.guest.is_none() {
            response.add_error(BookingError::GuestRequired);
        }
        if draft.start_date.is_none() {
            response.add_error(BookingError::StartDateRequired);
        }
        if draft.end_date.is_none() {
            response.add_error(BookingError::EndDateRequired);
        }
        if draft.cost_of_stay.is_none() {
            response.add_error(BookingError::CostRequired);
        }
        if !response.is_success() {
            return response;
        }
        let (Some(guest), Some(start), Some(end), Some(cost)) = (
            draft.guest.as_ref(),
            draft.start_date,
            draft.end_date,
            draft.cost_of_stay,
        ) else {
            return response;
        };

        if self.guests.find_by_email(guest.email()).await.is_none() {
            response.add_error(BookingError::GuestNotFound);
        }
        let tomorrow = Local::now().date_naive() + Days::new(1);
        if start < tomorrow {
            response.add_error(BookingError::StartDateTooSoon);
        }
        if start >= end {
            response.add_error(BookingError::StartNotBeforeEnd);
        }
        if cost.is_negative() {
            response.add_error(BookingError::NegativeCost);
        }
        if !response.is_success() {
            return response;
        }

        let candidate = match Reservation::create(exclude_id, guest.id(), start, end, cost) {
            Ok(candidate) => candidate,
            Err(error) => return Response::error(error),
        };
        for existing in self.reservations.find_by_host(host.id()).await.records() {
            if existing.id() != candidate.id() && candidate.overlaps(existing) {
                response.add_error(BookingError::Overlap);
                return response;
            }
        }
        Response::success(candidate)
    }
}
