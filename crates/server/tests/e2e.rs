use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::serve;
use server::state::ServerState;
use service::maintenance::repository::mock::MockMaintenanceRepository;
use service::vehicle::repository::mock::MockVehicleRepository;

struct TestApp {
    base_url: String,
    entries: Arc<MockMaintenanceRepository>,
    vehicles: Arc<MockVehicleRepository>,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Real router on an ephemeral port over in-memory stores.
async fn start_server() -> anyhow::Result<TestApp> {
    let entries = Arc::new(MockMaintenanceRepository::default());
    let vehicles = Arc::new(MockVehicleRepository::default());
    let state = ServerState::new(vehicles.clone(), entries.clone());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, entries, vehicles })
}

async fn register_vehicle(c: &reqwest::Client, app: &TestApp, plate: &str, mileage: i32) -> anyhow::Result<String> {
    let res = c
        .post(app.url("/api/vehicles"))
        .json(&json!({"brand": "Mercedes-Benz", "model": "Vito", "licensePlate": plate, "mileage": mileage}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["vehicle"]["status"], "available");
    Ok(body["vehicle"]["id"].as_str().unwrap_or_default().to_string())
}

async fn vehicle_mileage(c: &reqwest::Client, app: &TestApp, id: &str) -> anyhow::Result<i64> {
    let body = c.get(app.url(&format!("/api/vehicles/{id}"))).send().await?.json::<Value>().await?;
    Ok(body["vehicle"]["mileage"].as_i64().unwrap_or(-1))
}

fn entry_body(vehicle_id: &str, date: &str, mileage: i32) -> Value {
    json!({
        "vehicleId": vehicle_id,
        "date": date,
        "type": "oil-change",
        "mileage": mileage,
        "cost": 119.5,
        "workshop": "Bosch Car Service",
        "notes": "5W-30"
    })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(app.url("/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_mileage_only_moves_forward() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let vehicle_id = register_vehicle(&c, &app, "HH-FD 10", 10_000).await?;

    let res = c.post(app.url("/api/maintenance")).json(&entry_body(&vehicle_id, "2024-03-01", 12_000)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["maintenance"]["mileage"], 12_000);
    assert_eq!(body["maintenance"]["type"], "oil-change");
    assert_eq!(vehicle_mileage(&c, &app, &vehicle_id).await?, 12_000);

    let res = c.post(app.url("/api/maintenance")).json(&entry_body(&vehicle_id, "2024-04-01", 9_000)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(vehicle_mileage(&c, &app, &vehicle_id).await?, 12_000);
    assert_eq!(app.entries.len(), 2);
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_vehicle_id_is_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(app.url("/api/maintenance")).json(&entry_body("not-a-valid-id", "2024-03-01", 1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "invalid vehicle id");
    assert!(app.entries.is_empty());

    let res = c.post(app.url("/api/maintenance")).json(&entry_body(&Uuid::new_v4().to_string(), "2024-03-01", 1)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(app.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_vehicle_history_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(app.url(&format!("/api/maintenance/vehicle/{}", Uuid::new_v4()))).await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    let keys: Vec<_> = body.as_object().map(|o| o.keys().cloned().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["error".to_string()]);
    Ok(())
}

#[tokio::test]
async fn e2e_update_get_delete_cycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let vehicle_id = register_vehicle(&c, &app, "HH-FD 11", 0).await?;

    let created = c.post(app.url("/api/maintenance")).json(&entry_body(&vehicle_id, "2024-05-20", 3_000)).send().await?.json::<Value>().await?;
    let entry_id = created["maintenance"]["id"].as_str().unwrap_or_default().to_string();
    let entry_url = app.url(&format!("/api/maintenance/{entry_id}"));

    // empty date keeps the stored one; omitted optionals are cleared
    let res = c
        .put(&entry_url)
        .json(&json!({"vehicleId": vehicle_id, "date": "", "type": "repair", "mileage": 3_500, "cost": 420.0}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["maintenance"]["date"], "2024-05-20");
    assert_eq!(body["maintenance"]["type"], "repair");
    assert!(body["maintenance"]["workshop"].is_null());
    assert_eq!(vehicle_mileage(&c, &app, &vehicle_id).await?, 3_500);

    let res = c.put(&entry_url).json(&entry_body(&vehicle_id, "05/21/2024", 3_500)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let detail = c.get(&entry_url).send().await?.json::<Value>().await?;
    assert_eq!(detail["maintenance"]["id"], entry_id.as_str());
    assert_eq!(detail["vehicle"]["licensePlate"], "HH-FD 11");

    let res = c.delete(&entry_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.json::<Value>().await?["message"].is_string());

    let res = c.delete(&entry_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert!(res.json::<Value>().await?["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_listing_carries_vehicle_names() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let vehicle_id = register_vehicle(&c, &app, "HH-FD 12", 0).await?;
    c.post(app.url("/api/maintenance")).json(&entry_body(&vehicle_id, "2024-06-01", 100)).send().await?;

    let body = c.get(app.url("/api/maintenance")).send().await?.json::<Value>().await?;
    let rows = body["maintenance"].as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["vehicleName"], "Mercedes-Benz Vito (HH-FD 12)");
    assert_eq!(rows[0]["vehicleId"], vehicle_id.as_str());

    let history = c.get(app.url(&format!("/api/maintenance/vehicle/{vehicle_id}"))).send().await?.json::<Value>().await?;
    assert_eq!(history["maintenance"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(history["vehicle"]["id"], vehicle_id.as_str());
    Ok(())
}

#[tokio::test]
async fn e2e_failed_mileage_sync_keeps_entry() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let vehicle_id = register_vehicle(&c, &app, "HH-FD 13", 500).await?;
    app.vehicles.fail_updates(true);

    let res = c.post(app.url("/api/maintenance")).json(&entry_body(&vehicle_id, "2024-06-02", 800)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    assert_eq!(app.entries.len(), 1);
    assert_eq!(vehicle_mileage(&c, &app, &vehicle_id).await?, 500);
    Ok(())
}
