use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use aquaops_compliance::{routes, Config};

/// Serve the full router on an ephemeral local port and return its base URL.
async fn spawn_app() -> Result<String> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = routes::router(Config::default());

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", addr))
}

fn log_header(id: &str, facility_id: &str) -> Value {
    json!({
        "id": id,
        "facilityId": facility_id,
        "recordedBy": "user-1",
        "timestamp": "2025-06-01T08:00:00Z",
    })
}

fn with_entry(mut header: Value, entry: Value) -> Value {
    // ---
    let (Some(header_map), Value::Object(entry_map)) = (header.as_object_mut(), entry) else {
        panic!("log fixtures must be JSON objects");
    };
    header_map.extend(entry_map);
    header
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let body: Value = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "aquaops-compliance");
    Ok(())
}

#[tokio::test]
async fn evaluate_reports_violations_and_advice() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let request = json!({
        "readings": { "pH": 8.2, "chlorine": 2.0, "alkalinity": 100 },
        "ranges": {
            "pH": { "min": 7.2, "max": 7.8 },
            "chlorine": { "min": 1.0, "max": 10.0 },
            "alkalinity": { "min": 80, "max": 120 }
        }
    });

    let response = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&request)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await?;
    assert_eq!(body["isCompliant"], false);
    assert_eq!(body["violations"], json!(["pH 8.2 is outside range 7.2-7.8"]));
    assert_eq!(
        body["recommendations"],
        json!(["pH is too high. Add muriatic acid or sodium bisulfate to lower pH."])
    );
    Ok(())
}

#[tokio::test]
async fn evaluate_defaults_to_standard_ranges() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let request = json!({
        "readings": { "pH": 7.4, "chlorine": 3.0, "alkalinity": 100, "calciumHardness": 500 }
    });

    let body: Value = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["isCompliant"], false);
    assert_eq!(
        body["violations"],
        json!(["Calcium Hardness 500 ppm is outside range 200-400 ppm"])
    );
    assert_eq!(body["recommendations"], json!([]));
    Ok(())
}

#[tokio::test]
async fn evaluate_uses_facility_rules() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let rules = json!({
        "id": "rules-1",
        "facilityId": "facility-1",
        "standard": "state",
        "poolTestingRanges": {
            "pH": { "min": 7.2, "max": 7.8 },
            "chlorine": { "min": 2.0, "max": 4.0 },
            "alkalinity": { "min": 80, "max": 120 }
        }
    });
    let readings = json!({ "pH": 7.4, "chlorine": 1.5, "alkalinity": 100 });

    let body: Value = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&json!({ "readings": readings, "rules": rules }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["isCompliant"], false);
    assert_eq!(
        body["violations"],
        json!(["Chlorine 1.5 ppm is outside range 2-4 ppm"])
    );
    assert_eq!(
        body["recommendations"],
        json!(["Chlorine is too low. Add chlorine to increase sanitizer levels."])
    );

    // Explicit ranges take precedence over the rules record.
    let body: Value = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&json!({
            "readings": readings,
            "rules": rules,
            "ranges": {
                "pH": { "min": 7.2, "max": 7.8 },
                "chlorine": { "min": 1.0, "max": 10.0 },
                "alkalinity": { "min": 80, "max": 120 }
            }
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["isCompliant"], true);
    Ok(())
}

#[tokio::test]
async fn evaluate_rejects_inverted_rules() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let request = json!({
        "readings": { "pH": 7.4 },
        "rules": {
            "id": "rules-1",
            "facilityId": "facility-1",
            "standard": "custom",
            "poolTestingRanges": {
                "pH": { "min": 7.2, "max": 7.8 },
                "chlorine": { "min": 4.0, "max": 2.0 },
                "alkalinity": { "min": 80, "max": 120 }
            }
        }
    });

    let response = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&request)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn evaluate_rejects_inverted_ranges() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let request = json!({
        "readings": { "pH": 7.4, "chlorine": 3.0, "alkalinity": 100 },
        "ranges": {
            "pH": { "min": 7.8, "max": 7.2 },
            "chlorine": { "min": 1.0, "max": 10.0 },
            "alkalinity": { "min": 80, "max": 120 }
        }
    });

    let response = Client::new()
        .post(format!("{}/compliance/evaluate", base))
        .json(&request)
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await?;
    assert!(
        body["error"].as_str().unwrap_or_default().contains("pH range is inverted"),
        "unexpected error body: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn alerts_are_sorted_and_filtered_by_facility() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let logs = json!([
        with_entry(
            log_header("filter-1", "facility-1"),
            json!({
                "type": "filter_cleaning",
                "filterType": "sand",
                "cleaningMethod": "backwash",
                "nextCleaningDue": "2025-06-15T12:00:00Z"
            }),
        ),
        with_entry(
            log_header("cell-1", "facility-1"),
            json!({
                "type": "salt_cell_cleaning",
                "cleaningMethod": "acid_wash",
                "conditionBefore": "scaled",
                "conditionAfter": "clean",
                "nextCleaningDue": "2025-06-08T12:00:00Z"
            }),
        ),
        with_entry(
            log_header("salt-other", "facility-2"),
            json!({
                "type": "salt_level",
                "saltLevel": 2000,
                "targetRange": { "min": 3000, "max": 3500 },
                "isInRange": false
            }),
        ),
    ]);

    let alerts: Vec<Value> = Client::new()
        .post(format!("{}/alerts?facilityId=facility-1", base))
        .json(&json!({ "logs": logs, "asOf": "2025-06-10T12:00:00Z" }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(alerts.len(), 2, "facility-2 log should be filtered out");

    assert_eq!(alerts[0]["id"], "salt-cell-overdue-cell-1");
    assert_eq!(alerts[0]["type"], "maintenance_overdue");
    assert_eq!(alerts[0]["severity"], "high");
    assert_eq!(alerts[0]["description"], "Salt cell cleaning was due 2 days ago");

    assert_eq!(alerts[1]["id"], "filter-due-filter-1");
    assert_eq!(alerts[1]["severity"], "low");
    assert_eq!(alerts[1]["description"], "Filter cleaning is due in 5 days");
    Ok(())
}

#[tokio::test]
async fn dashboard_rolls_up_snapshot() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let pool_test = |id: &str, timestamp: &str, compliant: bool| {
        let mut header = log_header(id, "facility-1");
        header["timestamp"] = json!(timestamp);
        with_entry(
            header,
            json!({
                "type": "pool_testing",
                "readings": { "pH": 7.4, "chlorine": 2.0, "alkalinity": 100 },
                "isCompliant": compliant,
                "recommendations": []
            }),
        )
    };

    let request = json!({
        "logs": [
            pool_test("p1", "2025-06-09T08:00:00Z", true),
            pool_test("p2", "2025-06-08T08:00:00Z", true),
            pool_test("p3", "2025-06-07T08:00:00Z", false),
            pool_test("p4", "2025-06-06T08:00:00Z", true),
            with_entry(
                log_header("temp-1", "facility-1"),
                json!({
                    "type": "temperature",
                    "temperature": 90,
                    "location": "spa",
                    "targetRange": { "min": 100, "max": 104 },
                    "isInRange": false
                }),
            ),
        ],
        "incidents": [
            {
                "id": "inc-1",
                "facilityId": "facility-1",
                "incidentNumber": "INC-2025-0001",
                "type": "injury",
                "severity": "minor",
                "occurredAt": "2025-06-05T15:00:00Z",
                "status": "submitted"
            },
            {
                "id": "inc-2",
                "facilityId": "facility-1",
                "incidentNumber": "INC-2025-0002",
                "type": "near_miss",
                "severity": "minor",
                "occurredAt": "2025-06-04T15:00:00Z",
                "status": "closed"
            }
        ],
        "checklists": [
            { "id": "cl-1", "facilityId": "facility-1", "name": "Opening", "status": "in-progress" },
            { "id": "cl-2", "facilityId": "facility-1", "name": "Closing", "status": "completed" }
        ],
        "asOf": "2025-06-10T12:00:00Z"
    });

    let body: Value = Client::new()
        .post(format!("{}/dashboard/stats", base))
        .json(&request)
        .send()
        .await?
        .json()
        .await?;

    let stats = &body["stats"];
    assert_eq!(stats["complianceRate"], 75);
    assert_eq!(stats["activeIncidents"], 1);
    assert_eq!(stats["pendingChecklists"], 1);
    assert_eq!(stats["maintenanceAlerts"], 1);
    assert_eq!(stats["totalPoolTests"], 4);
    assert_eq!(stats["recentPoolTests"], 4);
    assert_eq!(body["complianceStatus"], "warning");
    Ok(())
}

#[tokio::test]
async fn dashboard_without_pool_tests_has_null_rate() -> Result<()> {
    // ---
    let base = spawn_app().await?;
    let body: Value = Client::new()
        .post(format!("{}/dashboard/stats", base))
        .json(&json!({ "logs": [], "incidents": [], "checklists": [] }))
        .send()
        .await?
        .json()
        .await?;

    assert!(body["stats"]["complianceRate"].is_null());
    assert_eq!(body["complianceStatus"], "no_data");
    Ok(())
}
