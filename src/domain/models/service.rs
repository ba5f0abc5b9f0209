use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Raised when a stored or submitted string does not name a known variant.
#[derive(Debug, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Property,
    Vehicle,
    Tour,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Property => "property",
            ServiceCategory::Vehicle => "vehicle",
            ServiceCategory::Tour => "tour",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" => Ok(ServiceCategory::Property),
            "vehicle" => Ok(ServiceCategory::Vehicle),
            "tour" => Ok(ServiceCategory::Tour),
            other => Err(UnknownVariant { kind: "service category", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for ServiceCategory {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The booking rules a service is subject to, with the data each rule needs.
///
/// Room capacity only exists for properties, slot exclusivity only for tours;
/// vehicles are exclusive over their whole rental range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceKind {
    Property { total_inventory: i32 },
    Vehicle,
    Tour { slots: Vec<String> },
}

impl ServiceKind {
    pub fn category(&self) -> ServiceCategory {
        match self {
            ServiceKind::Property { .. } => ServiceCategory::Property,
            ServiceKind::Vehicle => ServiceCategory::Vehicle,
            ServiceKind::Tour { .. } => ServiceCategory::Tour,
        }
    }
}

/// A bookable unit: a room type, a rental vehicle or a guided tour.
/// For properties the service id doubles as the room type id.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    #[sqlx(try_from = "String")]
    pub category: ServiceCategory,
    pub name: String,
    pub owner_id: String,
    pub total_inventory: i32,
    pub tour_slots_json: Option<String>,
    pub min_stay: i32,
    pub max_stay: Option<i32>,
    pub base_price: Option<f64>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub category: ServiceCategory,
    pub name: String,
    pub owner_id: String,
    pub total_inventory: i32,
    pub tour_slots: Vec<String>,
    pub min_stay: i32,
    pub max_stay: Option<i32>,
    pub base_price: Option<f64>,
    pub timezone: String,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Self {
        let tour_slots_json = if params.tour_slots.is_empty() {
            None
        } else {
            serde_json::to_string(&params.tour_slots).ok()
        };

        Self {
            id: Uuid::new_v4().to_string(),
            category: params.category,
            name: params.name,
            owner_id: params.owner_id,
            total_inventory: params.total_inventory,
            tour_slots_json,
            min_stay: params.min_stay,
            max_stay: params.max_stay,
            base_price: params.base_price,
            timezone: params.timezone,
            created_at: Utc::now(),
        }
    }

    pub fn tour_slots(&self) -> Vec<String> {
        self.tour_slots_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> ServiceKind {
        match self.category {
            ServiceCategory::Property => ServiceKind::Property { total_inventory: self.total_inventory },
            ServiceCategory::Vehicle => ServiceKind::Vehicle,
            ServiceCategory::Tour => ServiceKind::Tour { slots: self.tour_slots() },
        }
    }

    /// Current calendar date in the service's own timezone.
    pub fn today(&self) -> NaiveDate {
        let tz: Tz = self.timezone.parse().unwrap_or(chrono_tz::UTC);
        Utc::now().with_timezone(&tz).date_naive()
    }
}
