use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::domain::{DataAccessError, Entity, Id, Loaded};

use super::{GuestId, HostId, Money};

/// Per-host reservation ledger. Every operation is scoped by an explicit
/// host id; there is no selected-host state. Mutations re-read the backing
/// collection, apply the change, and rewrite the whole collection.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_by_host(&self, host_id: HostId) -> Loaded<Reservation>;

    async fn find_by_id(&self, host_id: HostId, id: ReservationId) -> Option<Reservation> {
        self.find_by_host(host_id)
            .await
            .into_iter()
            .find(|r| r.id() == id)
    }

    /// Stores the candidate under the next free id (max existing + 1,
    /// starting at 1) and returns the stored record.
    async fn add(
        &self,
        host_id: HostId,
        candidate: Reservation,
    ) -> Result<Reservation, DataAccessError>;

    /// Replaces the record with the same id. Returns false, without
    /// touching the collection, when no such record exists.
    async fn update(
        &self,
        host_id: HostId,
        reservation: Reservation,
    ) -> Result<bool, DataAccessError>;

    /// Removes the record with the given id. Returns false when absent.
    async fn delete(&self, host_id: HostId, id: ReservationId) -> Result<bool, DataAccessError>;
}

/// Reservation ID, unique only within one host's collection.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct ReservationId(u64);

impl Id for ReservationId {
    type Inner = u64;
}

/// A booked stay. The stay covers `start_date` inclusive through `end_date`
/// exclusive; the owning host is implicit in the collection the record
/// lives in. Field order matches the persisted column order.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    guest_id: GuestId,
    #[serde_as(as = "DisplayFromStr")]
    cost_of_stay: Money,
}

impl Reservation {
    pub fn create(
        id: ReservationId,
        guest_id: GuestId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        cost_of_stay: Money,
    ) -> Result<Self, ReservationError> {
        if start_date >= end_date {
            return Err(ReservationError::InvalidDates);
        }
        Ok(Self {
            id,
            start_date,
            end_date,
            guest_id,
            cost_of_stay,
        })
    }

    /// Same reservation under a storage-assigned id.
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = id;
        self
    }

    pub fn guest_id(&self) -> GuestId {
        self.guest_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn cost_of_stay(&self) -> Money {
        self.cost_of_stay
    }

    /// Two reservations conflict when either one's start date falls within
    /// the other's inclusive [start, end] span. Back-to-back stays sharing
    /// an endpoint therefore conflict.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        Self::span_contains(other, self.start_date) || Self::span_contains(self, other.start_date)
    }

    fn span_contains(reservation: &Reservation, date: NaiveDate) -> bool {
        date >= reservation.start_date && date <= reservation.end_date
    }
}

impl Entity for Reservation {
    type Id = ReservationId;

    const ENTITY_NAME: &'static str = "reservation";

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Error, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationError {
    #[display("Start date must come before the end date.")]
    InvalidDates,
}

/// Total charge for a stay of [start, end): one rate per night, where
/// Friday and Saturday nights bill the weekend rate and every other night
/// bills the standard rate. Pure in its four inputs.
pub fn cost_of_stay(
    start: NaiveDate,
    end: NaiveDate,
    standard_rate: Money,
    weekend_rate: Money,
) -> Money {
    start
        .iter_days()
        .take_while(|night| *night < end)
        .map(|night| match night.weekday() {
            Weekday::Fri | Weekday::Sat => weekend_rate,
            _ => standard_rate,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: Money = Money::from_cents(10_000);
    const WEEKEND: Money = Money::from_cents(15_000);

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reservation(id: u64, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation::create(
            ReservationId::from(id),
            GuestId::from(1),
            start,
            end,
            STANDARD,
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_unordered_dates() {
        let day = date(2024, 3, 10);
        assert_eq!(
            Reservation::create(ReservationId::from(1), GuestId::from(1), day, day, STANDARD),
            Err(ReservationError::InvalidDates)
        );
        assert!(Reservation::create(
            ReservationId::from(1),
            GuestId::from(1),
            day,
            date(2024, 3, 9),
            STANDARD,
        )
        .is_err());
    }

    // 2024-01-01 is a Monday.

    #[test]
    fn test_cost_weekday_nights() {
        // Wednesday to Friday: Wed and Thu nights, both standard.
        let total = cost_of_stay(date(2024, 1, 3), date(2024, 1, 5), STANDARD, WEEKEND);
        assert_eq!(total, Money::from_cents(20_000));
    }

    #[test]
    fn test_cost_weekend_nights() {
        // Friday to Sunday: Fri and Sat nights, both weekend.
        let total = cost_of_stay(date(2024, 1, 5), date(2024, 1, 7), STANDARD, WEEKEND);
        assert_eq!(total, Money::from_cents(30_000));
    }

    #[test]
    fn test_cost_single_night() {
        let thursday = cost_of_stay(date(2024, 1, 4), date(2024, 1, 5), STANDARD, WEEKEND);
        assert_eq!(thursday, STANDARD);
        let saturday = cost_of_stay(date(2024, 1, 6), date(2024, 1, 7), STANDARD, WEEKEND);
        assert_eq!(saturday, WEEKEND);
    }

    #[test]
    fn test_cost_mixed_week() {
        // Thursday to Monday: Thu standard, Fri + Sat weekend, Sun standard.
        let total = cost_of_stay(date(2024, 1, 4), date(2024, 1, 8), STANDARD, WEEKEND);
        assert_eq!(total, Money::from_cents(50_000));
    }

    #[test]
    fn test_cost_empty_range() {
        let day = date(2024, 1, 3);
        assert_eq!(cost_of_stay(day, day, STANDARD, WEEKEND), Money::ZERO);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let a = cost_of_stay(date(2024, 1, 3), date(2024, 1, 10), STANDARD, WEEKEND);
        let b = cost_of_stay(date(2024, 1, 3), date(2024, 1, 10), STANDARD, WEEKEND);
        assert_eq!(a, b);
    }

    #[test]
    fn test_overlap_identical_ranges() {
        let a = reservation(1, date(2024, 2, 10), date(2024, 2, 12));
        let b = reservation(2, date(2024, 2, 10), date(2024, 2, 12));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_overlap_partial() {
        let a = reservation(1, date(2024, 2, 10), date(2024, 2, 14));
        let b = reservation(2, date(2024, 2, 12), date(2024, 2, 16));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = reservation(1, date(2024, 2, 9), date(2024, 2, 20));
        let inner = reservation(2, date(2024, 2, 12), date(2024, 2, 14));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_overlap_shared_endpoint() {
        // Inclusive bounds: a stay starting the day another ends conflicts.
        let a = reservation(1, date(2024, 2, 10), date(2024, 2, 12));
        let b = reservation(2, date(2024, 2, 12), date(2024, 2, 14));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_no_overlap_disjoint() {
        let a = reservation(1, date(2024, 2, 10), date(2024, 2, 12));
        let b = reservation(2, date(2024, 2, 13), date(2024, 2, 15));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
}
