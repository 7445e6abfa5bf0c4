use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use uuid::Uuid;

use crate::domain::rules;
use crate::domain::{Entity, Id, Loaded, Response};

use super::{cost_of_stay, Money};

/// Read-only directory over the host store.
#[async_trait]
pub trait HostRepository: Send + Sync {
    async fn find_all(&self) -> Loaded<Host>;

    async fn find_by_id(&self, id: HostId) -> Option<Host> {
        self.find_all().await.into_iter().find(|h| h.id() == id)
    }

    async fn find_by_email(&self, email: &str) -> Option<Host> {
        self.find_all()
            .await
            .into_iter()
            .find(|h| h.email().eq_ignore_ascii_case(email))
    }
}

/// Host ID. Each host owns exactly one reservation collection, partitioned
/// by this id.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct HostId(Uuid);

impl Id for HostId {
    type Inner = Uuid;
}

/// Host entity. Field order matches the persisted column order.
#[serde_as]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    id: HostId,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    state: String,
    postal_code: String,
    #[serde_as(as = "DisplayFromStr")]
    standard_rate: Money,
    #[serde_as(as = "DisplayFromStr")]
    weekend_rate: Money,
}

impl Host {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: HostId,
        last_name: String,
        email: String,
        phone: String,
        address: String,
        city: String,
        state: String,
        postal_code: String,
        standard_rate: Money,
        weekend_rate: Money,
    ) -> Self {
        Self {
            id,
            last_name,
            email,
            phone,
            address,
            city,
            state,
            postal_code,
            standard_rate,
            weekend_rate,
        }
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

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn standard_rate(&self) -> Money {
        self.standard_rate
    }

    pub fn weekend_rate(&self) -> Money {
        self.weekend_rate
    }

    /// Total charge for a stay of [start, end) at this host's rates.
    pub fn cost_for_stay(&self, start: NaiveDate, end: NaiveDate) -> Money {
        cost_of_stay(start, end, self.standard_rate, self.weekend_rate)
    }

    /// Applies every field rule and accumulates the complete failure list.
    pub fn validate(&self) -> Response<()> {
        let mut response = Response::new();
        for error in rules::validate_name("Host last name", &self.last_name) {
            response.add_error(error);
        }
        for error in rules::validate_email(&self.email) {
            response.add_error(error);
        }
        for error in rules::validate_phone("Host phone number", &self.phone) {
            response.add_error(error);
        }
        for error in rules::validate_text("Address", &self.address) {
            response.add_error(error);
        }
        for error in rules::validate_text("City", &self.city) {
            response.add_error(error);
        }
        for error in rules::validate_state(&self.state) {
            response.add_error(error);
        }
        for error in rules::validate_postal_code(&self.postal_code) {
            response.add_error(error);
        }
        for error in rules::validate_rate("Standard rate", self.standard_rate) {
            response.add_error(error);
        }
        for error in rules::validate_rate("Weekend rate", self.weekend_rate) {
            response.add_error(error);
        }
        response
    }
}

impl Entity for Host {
    type Id = HostId;

    const ENTITY_NAME: &'static str = "host";

    fn id(&self) -> Self::Id {
        self.id
    }
}
