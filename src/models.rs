// Records exchanged with the tendering API. Field names follow the
// server's PascalCase JSON (including its `RouteLenght` spelling).
// Ids are kept as `serde_json::Value`: the server is free to send
// numbers or strings and we hand them back unchanged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::schedule::{self, TenderSchedule};

/// Reference data returned by `GET tender/create`.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReferenceCatalog {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub corporates: Vec<Corporate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Corporate {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contact_persons: Vec<ContactPerson>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ContactPerson {
    #[serde(default)]
    pub id: Option<Value>,
}

/// Lists the server sends as `null` read as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReferenceCatalog {
    /// Customer built from the first corporate and its first contact
    /// person. `None` when either is missing or has a null id.
    pub fn first_customer(&self) -> Option<Customer> {
        let corporate = self.corporates.first()?;
        let company_id = corporate.id.clone()?;
        let contact_id = corporate.contact_persons.first()?.id.clone()?;
        Some(Customer {
            company_id,
            contact_id,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub company_id: Value,
    pub contact_id: Value,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    /// Consolidated cargo, no packaging details required.
    Joint,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePointType {
    Loading,
    Unloading,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStep {
    Auto,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VatRequirement {
    None,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct RoutePoint {
    #[serde(rename = "Type")]
    pub kind: RoutePointType,
    pub address: String,
    /// Distance to the point in km. Left out, the server plots the route itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(serialize_with = "schedule::serialize")]
    pub arrival_time: NaiveDateTime,
    #[serde(serialize_with = "schedule::serialize")]
    pub leave_time: NaiveDateTime,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Bidding {
    #[serde(serialize_with = "schedule::serialize")]
    pub start_date: NaiveDateTime,
    /// Must close at least 30 minutes before the route starts.
    #[serde(serialize_with = "schedule::serialize")]
    pub end_date: NaiveDateTime,
    pub init_cost: u64,
    pub min_step_req: BidStep,
    pub vat_reqs: VatRequirement,
}

/// Body of `POST tender/create`.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct TenderRequest {
    #[serde(serialize_with = "schedule::serialize")]
    pub order_date: NaiveDateTime,
    #[serde(serialize_with = "schedule::serialize")]
    pub start_date: NaiveDateTime,
    pub customer: Customer,
    pub cargo: String,
    pub cargo_weight: u32,
    pub cargo_volume: u32,
    pub cargo_danger_class: u8,
    pub package_type: PackageType,
    pub route_points: Vec<RoutePoint>,
    pub tender: Bidding,
}

impl TenderRequest {
    /// The example order: one consolidated load from Moscow to Saint
    /// Petersburg, auctioned from now until the morning of the trip.
    pub fn example(customer: Customer, schedule: &TenderSchedule) -> Self {
        TenderRequest {
            order_date: schedule.order_date,
            start_date: schedule.start,
            customer,
            cargo: "Important cargo".into(),
            cargo_weight: 10,
            cargo_volume: 10,
            cargo_danger_class: 0,
            package_type: PackageType::Joint,
            route_points: vec![
                RoutePoint {
                    kind: RoutePointType::Loading,
                    address: "Moscow, Red Square".into(),
                    distance: None,
                    arrival_time: schedule.start,
                    leave_time: schedule.loading_leave,
                },
                RoutePoint {
                    kind: RoutePointType::Unloading,
                    address: "Saint Petersburg, Palace Square".into(),
                    distance: None,
                    arrival_time: schedule.unloading_arrival,
                    leave_time: schedule.unloading_leave,
                },
            ],
            tender: Bidding {
                start_date: schedule.bidding_start,
                end_date: schedule.bidding_end,
                init_cost: 50_000,
                min_step_req: BidStep::Auto,
                vat_reqs: VatRequirement::None,
            },
        }
    }
}

/// Tender record returned by `GET tender/{id}`. Only the fields the
/// status report reads are modelled.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct TenderDetails {
    #[serde(default)]
    pub number: Value,
    #[serde(default)]
    pub status: Value,
    #[serde(default)]
    pub status_title: Value,
    #[serde(default)]
    pub actual_date: Value,
    #[serde(default)]
    pub actual_date_title: Value,
    #[serde(default, rename = "RouteLenght")]
    pub route_length: Value,
    #[serde(default)]
    pub proposals_count: Value,
    #[serde(default)]
    pub best_proposal: Option<BestProposal>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct BestProposal {
    #[serde(default)]
    pub bet: Value,
}
