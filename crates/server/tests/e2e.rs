use std::net::SocketAddr;

use axum::Router;
use chrono::{Duration, Local};
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes;
use server::state::ServerState;

struct TestApp {
    base_url: String,
}

/// Real server on an ephemeral port over the configured database.
async fn start_server() -> anyhow::Result<TestApp> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let app: Router = routes::build_router(ServerState::new(db), CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()) })
}

fn tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// POST, expect 201 and return the id from the `Location` header.
async fn create(client: &reqwest::Client, url: String, body: Value) -> anyhow::Result<i32> {
    let res = client.post(&url).json(&body).send().await?;
    let status = res.status();
    let location = res
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    if status != HttpStatusCode::CREATED {
        let text = res.text().await.unwrap_or_default();
        anyhow::bail!("POST {} -> {}: {}", url, status, text);
    }
    let location = location.ok_or_else(|| anyhow::anyhow!("no Location header"))?;
    let id = location.rsplit('/').next().unwrap_or_default().parse()?;
    Ok(id)
}

#[tokio::test]
async fn e2e_booking_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip: {}", e);
            return Ok(());
        }
    };
    let client = reqwest::Client::new();
    let api = format!("{}/api/v1", app.base_url);

    let res = client.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let loc = create(&client, format!("{}/locations", api), json!({"name": format!("Sede {}", tag()), "address": "Calle 1", "phone": "5550100"})).await?;
    let barber = create(&client, format!("{}/barbers", api), json!({"name": "Ana", "surname": format!("Ruiz {}", tag()), "location_id": loc})).await?;
    let cli = create(&client, format!("{}/clients", api), json!({"name": "Luis", "surname": "Paz", "phone": format!("6{}", tag())})).await?;
    let svc = create(&client, format!("{}/services", api), json!({"name": format!("Corte {}", tag()), "price": "12.00"})).await?;

    let day = (Local::now().date_naive() + Duration::days(45)).to_string();
    let slot = json!({"date": day, "time": "10:00", "client_id": cli, "barber_id": barber, "service_id": svc});
    let appt = create(&client, format!("{}/appointments", api), slot.clone()).await?;

    let res = client.post(format!("{}/appointments", api)).json(&slot).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], json!(false));

    let pay = create(&client, format!("{}/payments", api), json!({"amount": "12.00", "paid_on": day, "method": "cash", "appointment_id": appt})).await?;

    // paid appointment is protected
    let res = client.delete(format!("{}/appointments/{}", api, appt)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = client.get(format!("{}/appointments/{}/payments", api, appt)).send().await?;
    let payments: Value = res.json().await?;
    assert_eq!(payments.as_array().map(|a| a.len()), Some(1));

    for url in [
        format!("{}/payments/{}", api, pay),
        format!("{}/appointments/{}", api, appt),
        format!("{}/services/{}", api, svc),
        format!("{}/clients/{}", api, cli),
        format!("{}/barbers/{}", api, barber),
        format!("{}/locations/{}", api, loc),
    ] {
        let res = client.delete(&url).send().await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "DELETE {}", url);
    }
    Ok(())
}
