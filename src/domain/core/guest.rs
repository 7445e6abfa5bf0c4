use async_trait::async_trait;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

use crate::domain::rules;
use crate::domain::{Entity, Id, Loaded, Response};

/// Read-only directory over the guest store. Every lookup re-reads the full
/// backing collection; an unreadable store reads as empty.
#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn find_all(&self) -> Loaded<Guest>;

    async fn find_by_id(&self, id: GuestId) -> Option<Guest> {
        self.find_all().await.into_iter().find(|g| g.id() == id)
    }

    async fn find_by_email(&self, email: &str) -> Option<Guest> {
        self.find_all()
            .await
            .into_iter()
            .find(|g| g.email().eq_ignore_ascii_case(email))
    }
}

/// Guest ID, unique across the whole guest directory.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct GuestId(u64);

impl Id for GuestId {
    type Inner = u64;
}

/// Guest entity. Field order matches the persisted column order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    id: GuestId,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    state: String,
}

impl Guest {
    pub fn new(
        id: GuestId,
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        state: String,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            state,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Applies every field rule and accumulates the complete failure list.
    pub fn validate(&self) -> Response<()> {
        let mut response = Response::new();
        for error in rules::validate_name("Guest first name", &self.first_name) {
            response.add_error(error);
        }
        for error in rules::validate_name("Guest last name", &self.last_name) {
            response.add_error(error);
        }
        for error in rules::validate_email(&self.email) {
            response.add_error(error);
        }
        for error in rules::validate_phone("Guest phone number", &self.phone) {
            response.add_error(error);
        }
        for error in rules::validate_state(&self.state) {
            response.add_error(error);
        }
        response
    }
}

impl Entity for Guest {
    type Id = GuestId;

    const ENTITY_NAME: &'static str = "guest";

    fn id(&self) -> Self::Id {
        self.id
    }
}
