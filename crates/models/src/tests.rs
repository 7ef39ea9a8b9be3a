use chrono::{Duration, Local, NaiveTime};
use migration::MigratorTrait;
use sea_orm::{EntityTrait, ModelTrait, SqlErr};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{appointment, barber, client, db, location, payment, service_item};

#[tokio::test]
async fn insert_full_booking_graph() {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        eprintln!("skip: SKIP_DB_TESTS set");
        return;
    }
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return;
    }

    // unique columns get a per-run suffix so reruns don't collide
    let tag = &Uuid::new_v4().simple().to_string()[..8];
    let loc = location::create(&db, &format!("Centro {tag}"), "Av. Principal 1", "5550001").await.expect("location");
    let b = barber::create(&db, "Ana", &format!("Ruiz {tag}"), Some("fades"), loc.id).await.expect("barber");
    let c = client::create(&db, "Luis", "Paz", &format!("9{tag}"), None, Local::now().date_naive()).await.expect("client");
    let s = service_item::create(&db, &format!("Corte {tag}"), None, "10.00".parse().unwrap()).await.expect("service");
    let date = Local::now().date_naive() + Duration::days(30);
    let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    let a = appointment::create(&db, date, time, c.id, b.id, s.id).await.expect("appointment");
    let p = payment::create(&db, "10.00".parse().unwrap(), date, payment::PaymentMethod::Cash, a.id).await.expect("payment");

    let found = payment::Entity::find_by_id(p.id).one(&db).await.expect("find").expect("row");
    assert_eq!(found.method, payment::PaymentMethod::Cash);
    let owner = found.find_related(appointment::Entity).one(&db).await.expect("related").expect("appointment");
    assert_eq!(owner.barber_id, b.id);

    // a second booking of the same slot hits the unique index
    let dup = appointment::create(&db, date, time, c.id, b.id, s.id).await;
    assert!(matches!(
        dup,
        Err(ModelError::Db(ref e)) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    ));

    // cleanup in dependency order
    payment::Entity::delete_by_id(p.id).exec(&db).await.expect("del payment");
    appointment::Entity::delete_by_id(a.id).exec(&db).await.expect("del appointment");
    service_item::Entity::delete_by_id(s.id).exec(&db).await.expect("del service");
    client::Entity::delete_by_id(c.id).exec(&db).await.expect("del client");
    barber::Entity::delete_by_id(b.id).exec(&db).await.expect("del barber");
    location::Entity::delete_by_id(loc.id).exec(&db).await.expect("del location");
}

#[test]
fn location_requires_all_fields() {
    assert!(location::validate("Centro", "Calle 1", "555").is_ok());
    assert!(location::validate("", "Calle 1", "555").is_err());
    assert!(location::validate("Centro", "Calle 1", "1234567890123456").is_err());
}

#[test]
fn client_email_needs_at_sign() {
    assert!(client::validate("Luis", "Paz", "555", Some("luis.example.com")).is_err());
    assert!(client::validate("Luis", "Paz", "555", Some("luis@example.com")).is_ok());
    assert!(client::validate("Luis", "Paz", "555", None).is_ok());
}

#[test]
fn barber_specialty_length_is_bounded() {
    let long = "x".repeat(barber::SPECIALTY_MAX + 1);
    assert!(barber::validate("Ana", "Ruiz", Some(&long)).is_err());
    assert!(barber::validate("Ana", "Ruiz", None).is_ok());
}
