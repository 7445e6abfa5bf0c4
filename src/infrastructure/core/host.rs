use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::core::{Host, HostRepository};
use crate::domain::{Entity, Loaded};
use crate::infrastructure::decode_records;

/// Host directory backed by a single flat file.
#[derive(Clone, Debug)]
pub struct CsvHostRepository {
    path: PathBuf,
}

impl CsvHostRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HostRepository for CsvHostRepository {
    async fn find_all(&self) -> Loaded<Host> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "host store unreadable, treating as empty");
                return Loaded::default();
            }
        };
        let loaded = decode_records(&contents);
        if loaded.skipped() > 0 {
            warn!(
                entity = Host::ENTITY_NAME,
                skipped = loaded.skipped(),
                "skipped malformed rows"
            );
        }
        loaded
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use uuid::Uuid;

    use crate::domain::core::{HostId, Money};

    use super::*;

    const SEED: &str = "\
id,last_name,email,phone,address,city,state,postal_code,standard_rate,weekend_rate
3edda6bc-ab95-49a8-8962-d50b53f84b15,Yearnes,eyearnes0@sfgate.com,(806) 1783815,3 Nova Trail,Amarillo,TX,79182,340,425
a0d911e7-4fde-4e4a-bdb7-f047f15615e8,Rhodes,krhodes1@posterous.com,(478) 7475991,7262 Morning Avenue,Macon,GA,31296,295,368.75
";

    async fn seeded_repository(contents: &str) -> (tempfile::TempDir, CsvHostRepository) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hosts.csv");
        tokio::fs::write(&path, contents).await.unwrap();
        (dir, CsvHostRepository::new(path))
    }

    fn host_id(text: &str) -> HostId {
        HostId::from(text.parse::<Uuid>().unwrap())
    }

    #[tokio::test]
    async fn test_find_all_parses_rates() {
        let (_dir, repo) = seeded_repository(SEED).await;
        let loaded = repo.find_all().await;
        assert_eq!(loaded.records().len(), 2);
        assert_eq!(loaded.records()[0].standard_rate(), Money::from_cents(34_000));
        assert_eq!(loaded.records()[1].weekend_rate(), Money::from_cents(36_875));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let (_dir, repo) = seeded_repository(SEED).await;
        let host = repo
            .find_by_id(host_id("a0d911e7-4fde-4e4a-bdb7-f047f15615e8"))
            .await
            .unwrap();
        assert_eq!(host.last_name(), "Rhodes");
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let (_dir, repo) = seeded_repository(SEED).await;
        let host = repo.find_by_email("KRHODES1@posterous.com").await.unwrap();
        assert_eq!(host.city(), "Macon");
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let malformed = "\
id,last_name,email,phone,address,city,state,postal_code,standard_rate,weekend_rate
3edda6bc-ab95-49a8-8962-d50b53f84b15,Yearnes,eyearnes0@sfgate.com,(806) 1783815,3 Nova Trail,Amarillo,TX,79182,340,425
not-a-uuid,Broken,row
";
        let (_dir, repo) = seeded_repository(malformed).await;
        let loaded = repo.find_all().await;
        assert_eq!(loaded.records().len(), 1);
        assert_eq!(loaded.skipped(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let repo = CsvHostRepository::new("/nonexistent/hosts.csv");
        assert!(repo.find_all().await.records().is_empty());
    }
}
