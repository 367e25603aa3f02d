//! Incident and checklist records, plus the facility-id filter applied to
//! every record collection before it is evaluated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logs::MaintenanceLog;

// ---

/// Records that belong to a single facility.
pub trait FacilityScoped {
    fn facility_id(&self) -> &str;
}

/// Keep only the records for `facility_id`; `None` keeps everything.
pub fn for_facility<T: FacilityScoped>(records: Vec<T>, facility_id: Option<&str>) -> Vec<T> {
    // ---
    match facility_id {
        Some(id) => records
            .into_iter()
            .filter(|r| r.facility_id() == id)
            .collect(),
        None => records,
    }
}

impl FacilityScoped for MaintenanceLog {
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
}

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Draft,
    Submitted,
    UnderReview,
    Closed,
}

impl IncidentStatus {
    /// Submitted or under review.
    pub fn is_active(self) -> bool {
        !matches!(self, IncidentStatus::Draft | IncidentStatus::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Injury,
    NearMiss,
    PropertyDamage,
    ChemicalSpill,
    EquipmentFailure,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Minor,
    Moderate,
    Serious,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub facility_id: String,
    pub incident_number: String,
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    pub severity: IncidentSeverity,
    pub occurred_at: DateTime<Utc>,
    pub status: IncidentStatus,
}

impl FacilityScoped for Incident {
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
}

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistStatus {
    Pending,
    InProgress,
    Completed,
}

impl ChecklistStatus {
    /// Pending or in progress.
    pub fn is_open(self) -> bool {
        !matches!(self, ChecklistStatus::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: String,
    pub facility_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: ChecklistStatus,
}

impl FacilityScoped for Checklist {
    fn facility_id(&self) -> &str {
        &self.facility_id
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn checklist(id: &str, facility_id: &str, status: ChecklistStatus) -> Checklist {
        // ---
        Checklist {
            id: id.to_string(),
            facility_id: facility_id.to_string(),
            name: "Opening checks".to_string(),
            due_date: None,
            status,
        }
    }

    #[test]
    fn test_incident_activity_by_status() {
        // ---
        assert!(!IncidentStatus::Draft.is_active());
        assert!(IncidentStatus::Submitted.is_active());
        assert!(IncidentStatus::UnderReview.is_active());
        assert!(!IncidentStatus::Closed.is_active());
    }

    #[test]
    fn test_checklist_status_uses_kebab_case() {
        // ---
        let status: ChecklistStatus = serde_json::from_str(r#""in-progress""#).unwrap();
        assert_eq!(status, ChecklistStatus::InProgress);
        assert!(status.is_open());
        assert!(ChecklistStatus::Pending.is_open());
        assert!(!ChecklistStatus::Completed.is_open());
    }

    #[test]
    fn test_incident_deserializes_type_field() {
        // ---
        let incident: Incident = serde_json::from_str(
            r#"{
                "id": "inc-1",
                "facilityId": "facility-1",
                "incidentNumber": "INC-2025-0001",
                "type": "near_miss",
                "severity": "minor",
                "occurredAt": "2025-06-01T14:00:00Z",
                "status": "under_review"
            }"#,
        )
        .unwrap();

        assert_eq!(incident.incident_type, IncidentType::NearMiss);
        assert_eq!(incident.status, IncidentStatus::UnderReview);
        assert_eq!(
            incident.occurred_at,
            Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_for_facility_filters_by_id() {
        // ---
        let records = vec![
            checklist("a", "facility-1", ChecklistStatus::Pending),
            checklist("b", "facility-2", ChecklistStatus::Pending),
            checklist("c", "facility-1", ChecklistStatus::Completed),
        ];

        let scoped = for_facility(records.clone(), Some("facility-1"));
        let ids: Vec<&str> = scoped.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert_eq!(for_facility(records.clone(), None), records);
        assert!(for_facility(records, Some("facility-9")).is_empty());
    }
}
