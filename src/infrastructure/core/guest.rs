use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::core::{Guest, GuestRepository};
use crate::domain::{Entity, Loaded};
use crate::infrastructure::decode_records;

/// Guest directory backed by a single flat file. Reads never fail: an
/// unreadable file is an empty directory.
#[derive(Clone, Debug)]
pub struct CsvGuestRepository {
    path: PathBuf,
}

impl CsvGuestRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GuestRepository for CsvGuestRepository {
    async fn find_all(&self) -> Loaded<Guest> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "guest store unreadable, treating as empty");
                return Loaded::default();
            }
        };
        let loaded = decode_records(&contents);
        if loaded.skipped() > 0 {
            warn!(
                entity = Guest::ENTITY_NAME,
                skipped = loaded.skipped(),
                "skipped malformed rows"
            );
        }
        loaded
    }
}
