use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::core::{HostId, Reservation, ReservationId, ReservationRepository};
use crate::domain::{DataAccessError, Entity, Loaded};
use crate::infrastructure::{decode_records, encode_records};

/// Reservation ledger storage, one flat file per host under a common
/// directory. Every mutation re-reads the host's file, applies the change
/// in memory, and rewrites the file wholesale, so storage moves between
/// consistent versions only.
#[derive(Clone, Debug)]
pub struct CsvReservationRepository {
    directory: PathBuf,
}

impl CsvReservationRepository {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn file_path(&self, host_id: HostId) -> PathBuf {
        self.directory.join(format!("{host_id}.csv"))
    }

    async fn write_all(
        &self,
        host_id: HostId,
        reservations: &[Reservation],
    ) -> Result<(), DataAccessError> {
        let contents = encode_records(reservations)?;
        tokio::fs::write(self.file_path(host_id), contents).await?;
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for CsvReservationRepository {
    async fn find_by_host(&self, host_id: HostId) -> Loaded<Reservation> {
        let contents = match tokio::fs::read_to_string(self.file_path(host_id)).await {
            Ok(contents) => contents,
            Err(_) => return Loaded::default(),
        };
        let loaded = decode_records(&contents);
        if loaded.skipped() > 0 {
            warn!(
                entity = Reservation::ENTITY_NAME,
                host = %host_id,
                skipped = loaded.skipped(),
                "skipped malformed rows"
            );
        }
        loaded
    }

    async fn add(
        &self,
        host_id: HostId,
        candidate: Reservation,
    ) -> Result<Reservation, DataAccessError> {
        let mut all = self.find_by_host(host_id).await.into_records();
        let next_id = all.iter().map(|r| *r.id()).max().unwrap_or(0) + 1;
        let stored = candidate.with_id(ReservationId::from(next_id));
        all.push(stored.clone());
        self.write_all(host_id, &all).await?;
        debug!(host = %host_id, id = %stored.id(), "reservation stored");
        Ok(stored)
    }

    async fn update(
        &self,
        host_id: HostId,
        reservation: Reservation,
    ) -> Result<bool, DataAccessError> {
        let mut all = self.find_by_host(host_id).await.into_records();
        let Some(slot) = all.iter_mut().find(|r| r.id() == reservation.id()) else {
            return Ok(false);
        };
        *slot = reservation;
        self.write_all(host_id, &all).await?;
        Ok(true)
    }

    async fn delete(&self, host_id: HostId, id: ReservationId) -> Result<bool, DataAccessError> {
        let mut all = self.find_by_host(host_id).await.into_records();
        let Some(index) = all.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };
        all.remove(index);
        self.write_all(host_id, &all).await?;
        Ok(true)
    }
}
