//! Verification record consumed from the external backend.
//!
//! The record is owned by the backend; this client only reads it. The wire
//! shape is the JSON returned by `GET /verify/{identifier}` and uses
//! camelCase field names.

use crate::types::ProductId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status of a single supply-chain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Step finished and verified.
    Completed,

    /// Step currently in progress (usually the consumer check itself).
    Active,

    /// Step not yet reached.
    Pending,
}

/// One event in a product's supply-chain history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChainEvent {
    /// Short event title, e.g. "Harvested & Registered".
    pub title: String,

    /// Role of the acting party (farmer, distributor, retailer, consumer).
    pub role: String,

    /// Display name of the acting party.
    pub actor: String,

    /// Event date.
    pub date: NaiveDate,

    /// Where the event took place.
    pub location: String,

    /// Free-form detail line.
    pub details: String,

    /// Event status.
    pub status: EventStatus,
}

/// Read-only verification record for one product.
///
/// Fetched by identifier; `logs` is an ordered sequence, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    /// Canonical product identifier.
    pub product_id: ProductId,

    /// Registered farmer display name.
    pub farmer_name: String,

    /// Harvest date.
    pub harvest_date: NaiveDate,

    /// Origin location as registered at upload.
    pub origin_location: String,

    /// Quality grade assigned at registration, e.g. "A+".
    pub quality_grade: String,

    /// Ordered supply-chain event history.
    #[serde(default)]
    pub logs: Vec<SupplyChainEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "productId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "farmerName": "Ravi Kumar",
        "harvestDate": "2025-10-15",
        "originLocation": "Sikar Farms, Rajasthan",
        "qualityGrade": "A+",
        "logs": [
            {
                "title": "Harvested & Registered",
                "role": "Farmer",
                "actor": "Ravi Kumar (Certified)",
                "date": "2025-10-15",
                "location": "Sikar Farms, Rajasthan",
                "details": "Quality Grade A+ verified",
                "status": "completed"
            },
            {
                "title": "Retail Store Arrival",
                "role": "Retailer",
                "actor": "GreenStore Supermarket",
                "date": "2025-10-20",
                "location": "Vaishali Nagar, Jaipur",
                "details": "Shelf stocked. Freshness maintained.",
                "status": "active"
            }
        ]
    }"#;

    #[test]
    fn test_record_deserialization() {
        let record: VerificationRecord = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(
            record.product_id.to_string(),
            "3fa85f64-5717-4562-b3fc-2c963f66afa6"
        );
        assert_eq!(record.farmer_name, "Ravi Kumar");
        assert_eq!(record.quality_grade, "A+");
        assert_eq!(record.logs.len(), 2);
        assert_eq!(record.logs[0].status, EventStatus::Completed);
        assert_eq!(record.logs[1].status, EventStatus::Active);
    }

    #[test]
    fn test_logs_preserve_order() {
        let record: VerificationRecord = serde_json::from_str(SAMPLE).unwrap();
        assert!(record.logs[0].date < record.logs[1].date);
        assert_eq!(record.logs[0].role, "Farmer");
        assert_eq!(record.logs[1].role, "Retailer");
    }

    #[test]
    fn test_missing_logs_defaults_empty() {
        let json = r#"{
            "productId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "farmerName": "Ravi Kumar",
            "harvestDate": "2025-10-15",
            "originLocation": "Sikar Farms, Rajasthan",
            "qualityGrade": "A"
        }"#;
        let record: VerificationRecord = serde_json::from_str(json).unwrap();
        assert!(record.logs.is_empty());
    }

    #[test]
    fn test_record_roundtrip() {
        let record: VerificationRecord = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        // Wire field names stay camelCase
        assert!(json.contains("\"farmerName\""));
        assert!(json.contains("\"harvestDate\""));
        let back: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
