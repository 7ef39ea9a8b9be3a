use chrono::{NaiveDate, NaiveTime};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::appointment::{self, Column};
use crate::appointment::domain::{Appointment, AppointmentDraft};
use crate::appointment::repository::AppointmentRepository;
use crate::errors::{db_err, map_write_err, model_write_err, ServiceError};

pub struct SeaOrmAppointmentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAppointmentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AppointmentRepository for SeaOrmAppointmentRepository {
    async fn client_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::client::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?.is_some())
    }

    async fn barber_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::barber::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?.is_some())
    }

    async fn service_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::service_item::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?.is_some())
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(self.get(id).await?.is_some())
    }

    async fn get(&self, id: i32) -> Result<Option<Appointment>, ServiceError> {
        let res = appointment::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(res.map(Appointment::from))
    }

    async fn find_by_barber_date_time(&self, barber_id: i32, date: NaiveDate, time: NaiveTime) -> Result<Option<Appointment>, ServiceError> {
        let res = appointment::Entity::find()
            .filter(Column::BarberId.eq(barber_id))
            .filter(Column::Date.eq(date))
            .filter(Column::Time.eq(time))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(res.map(Appointment::from))
    }

    async fn insert(&self, draft: AppointmentDraft) -> Result<Appointment, ServiceError> {
        let created = appointment::create(&self.db, draft.date, draft.time, draft.client_id, draft.barber_id, draft.service_id)
            .await
            .map_err(|e| model_write_err(e, "appointment slot"))?;
        Ok(created.into())
    }

    async fn update(&self, a: &Appointment) -> Result<Appointment, ServiceError> {
        let am = appointment::ActiveModel {
            id: Set(a.id),
            date: Set(a.date),
            time: Set(a.time),
            client_id: Set(a.client_id),
            barber_id: Set(a.barber_id),
            service_id: Set(a.service_id),
        };
        let updated = am.update(&self.db).await.map_err(|e| map_write_err(e, "appointment slot"))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        appointment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err(e, "appointment"))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, ServiceError> {
        let rows = appointment::Entity::find()
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Time)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn list_by_barber_and_date(&self, barber_id: i32, date: NaiveDate) -> Result<Vec<Appointment>, ServiceError> {
        let rows = appointment::Entity::find()
            .filter(Column::BarberId.eq(barber_id))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::Time)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn list_by_client(&self, client_id: i32) -> Result<Vec<Appointment>, ServiceError> {
        let rows = appointment::Entity::find()
            .filter(Column::ClientId.eq(client_id))
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Time)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, tag};
    use chrono::{Duration, Local};
    use models::{barber, client, location, service_item};

    // Writes straight through the repository, skipping the service's
    // pre-check, the way a second server process would race us.
    #[tokio::test]
    async fn unique_slot_index_rejects_double_booking() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let t = tag();
        let loc = location::create(&db, &format!("Sede {t}"), "Calle 2", "5550002").await?;
        let b = barber::create(&db, "Rita", &format!("Gil {t}"), None, loc.id).await?;
        let c = client::create(&db, "Juan", "Soto", &format!("8{t}"), None, Local::now().date_naive()).await?;
        let s = service_item::create(&db, &format!("Barba {t}"), None, "8.00".parse()?).await?;
        let repo = SeaOrmAppointmentRepository::new(db.clone());

        let date = Local::now().date_naive() + Duration::days(30);
        let at = |h| AppointmentDraft {
            date,
            time: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
            client_id: c.id,
            barber_id: b.id,
            service_id: s.id,
        };
        let first = repo.insert(at(10)).await?;
        let err = repo.insert(at(10)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");

        let second = repo.insert(at(11)).await?;
        let moved = Appointment { time: first.time, ..second.clone() };
        let err = repo.update(&moved).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        assert_eq!(repo.get(second.id).await?.map(|a| a.time), Some(second.time));

        repo.delete(first.id).await?;
        repo.delete(second.id).await?;
        service_item::Entity::delete_by_id(s.id).exec(&db).await?;
        client::Entity::delete_by_id(c.id).exec(&db).await?;
        barber::Entity::delete_by_id(b.id).exec(&db).await?;
        location::Entity::delete_by_id(loc.id).exec(&db).await?;
        Ok(())
    }
}
