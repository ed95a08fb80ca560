use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::scheduling_types::*;

/// Service for the per-caregiver calendar of open and booked slots
#[derive(Clone)]
pub struct AvailabilityLedger {
    pool: SqlitePool,
}

impl AvailabilityLedger {
    /// Creates a new instance of `AvailabilityLedger` with the provided database connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Publishes one open slot for the caregiver on the given date
    pub async fn publish(
        &self,
        caregiver_username: &str,
        date: NaiveDate,
    ) -> Result<AvailabilitySlot, SchedulingError> {
        let result =
            sqlx::query("INSERT INTO availabilities (caregiver_username, slot_date) VALUES (?, ?)")
                .bind(caregiver_username)
                .bind(date)
                .execute(&self.pool)
                .await?;

        let appointment_id = result.last_insert_rowid();
        log::info!(
            "Caregiver {} published slot {} on {}",
            caregiver_username,
            appointment_id,
            date
        );

        Ok(AvailabilitySlot {
            appointment_id,
            caregiver_username: caregiver_username.to_string(),
            date,
            vaccine_name: None,
            patient_username: None,
        })
    }

    /// Lists the caregivers holding an open slot on the date, ascending by username.
    ///
    /// A caregiver appears once per open slot.
    pub async fn find_open_slots(&self, date: NaiveDate) -> Result<Vec<String>, SchedulingError> {
        let rows = sqlx::query(
            r#"
            SELECT caregiver_username
            FROM availabilities
            WHERE slot_date = ? AND vaccine_name IS NULL AND patient_username IS NULL
            ORDER BY caregiver_username
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.get("caregiver_username"))
            .collect())
    }

    /// Gets the id of the first open slot on the date under the same ordering
    /// as [`AvailabilityLedger::find_open_slots`]
    pub async fn first_open_slot_id(
        &self,
        date: NaiveDate,
    ) -> Result<Option<i64>, SchedulingError> {
        let row = sqlx::query(
            r#"
            SELECT appointment_id
            FROM availabilities
            WHERE slot_date = ? AND vaccine_name IS NULL AND patient_username IS NULL
            ORDER BY caregiver_username, appointment_id
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get("appointment_id")))
    }

    /// Gets a slot by id
    pub async fn get_slot(
        &self,
        appointment_id: i64,
    ) -> Result<Option<AvailabilitySlot>, SchedulingError> {
        let slot = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT appointment_id, caregiver_username, slot_date, vaccine_name, patient_username
            FROM availabilities
            WHERE appointment_id = ?
            "#,
        )
        .bind(appointment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    /// Binds a patient and a vaccine to an open slot
    pub async fn book(
        &self,
        appointment_id: i64,
        patient_username: &str,
        vaccine_name: &str,
    ) -> Result<(), SchedulingError> {
        let result = sqlx::query(
            r#"
            UPDATE availabilities
            SET patient_username = ?, vaccine_name = ?
            WHERE appointment_id = ? AND vaccine_name IS NULL AND patient_username IS NULL
            "#,
        )
        .bind(patient_username)
        .bind(vaccine_name)
        .bind(appointment_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(SchedulingError::SlotUnavailable(appointment_id));
        }

        log::info!(
            "Slot {} booked by {} for {}",
            appointment_id,
            patient_username,
            vaccine_name
        );
        Ok(())
    }

    /// Reopens a slot, returning the vaccine that was bound to it.
    ///
    /// Returns `None` when the slot does not exist or was already open.
    pub async fn release(&self, appointment_id: i64) -> Result<Option<String>, SchedulingError> {
        let row = sqlx::query("SELECT vaccine_name FROM availabilities WHERE appointment_id = ?")
            .bind(appointment_id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            log::debug!("Release of unknown slot {}", appointment_id);
            return Ok(None);
        };
        let vaccine_name: Option<String> = row.get("vaccine_name");

        sqlx::query(
            "UPDATE availabilities SET patient_username = NULL, vaccine_name = NULL WHERE appointment_id = ?",
        )
        .bind(appointment_id)
        .execute(&self.pool)
        .await?;

        log::info!("Slot {} released", appointment_id);
        Ok(vaccine_name)
    }

    /// Gets all slots published by a caregiver, ascending by appointment id
    pub async fn list_for_caregiver(
        &self,
        caregiver_username: &str,
    ) -> Result<Vec<AvailabilitySlot>, SchedulingError> {
        let slots = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT appointment_id, caregiver_username, slot_date, vaccine_name, patient_username
            FROM availabilities
            WHERE caregiver_username = ?
            ORDER BY appointment_id
            "#,
        )
        .bind(caregiver_username)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    /// Gets all slots booked by a patient, ascending by appointment id
    pub async fn list_for_patient(
        &self,
        patient_username: &str,
    ) -> Result<Vec<AvailabilitySlot>, SchedulingError> {
        let slots = sqlx::query_as::<_, AvailabilitySlot>(
            r#"
            SELECT appointment_id, caregiver_username, slot_date, vaccine_name, patient_username
            FROM availabilities
            WHERE patient_username = ?
            ORDER BY appointment_id
            "#,
        )
        .bind(patient_username)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    async fn ledger_with_caregivers(names: &[&str]) -> (SqlitePool, AvailabilityLedger) {
        let pool = test_support::pool().await;
        for name in names {
            test_support::add_caregiver(&pool, name).await;
        }
        (pool.clone(), AvailabilityLedger::new(pool))
    }

    #[tokio::test]
    async fn test_publish_then_find() {
        let (_pool, ledger) = ledger_with_caregivers(&["zoe", "carol"]).await;

        let first = ledger.publish("zoe", day(1)).await.unwrap();
        let second = ledger.publish("carol", day(1)).await.unwrap();
        ledger.publish("carol", day(2)).await.unwrap();

        assert!(first.is_open());
        assert!(second.appointment_id > first.appointment_id);
        assert_eq!(ledger.find_open_slots(day(1)).await.unwrap(), vec!["carol", "zoe"]);
        assert_eq!(ledger.find_open_slots(day(2)).await.unwrap(), vec!["carol"]);
        assert!(ledger.find_open_slots(day(3)).await.unwrap().is_empty());
        assert_eq!(
            ledger.first_open_slot_id(day(1)).await.unwrap(),
            Some(second.appointment_id)
        );
    }

    #[tokio::test]
    async fn test_book_and_release() {
        let (pool, ledger) = ledger_with_caregivers(&["carol"]).await;
        test_support::add_patient(&pool, "pat").await;
        sqlx::query("INSERT INTO vaccines (name, doses) VALUES ('Moderna', 1)")
            .execute(&pool)
            .await
            .unwrap();

        let slot = ledger.publish("carol", day(1)).await.unwrap();
        ledger.book(slot.appointment_id, "pat", "Moderna").await.unwrap();

        assert!(ledger.find_open_slots(day(1)).await.unwrap().is_empty());
        let booked = ledger.get_slot(slot.appointment_id).await.unwrap().unwrap();
        assert_eq!(booked.patient_username.as_deref(), Some("pat"));
        assert_eq!(booked.vaccine_name.as_deref(), Some("Moderna"));

        // a booked slot cannot be booked again
        assert!(matches!(
            ledger.book(slot.appointment_id, "pat", "Moderna").await,
            Err(SchedulingError::SlotUnavailable(id)) if id == slot.appointment_id
        ));

        let released = ledger.release(slot.appointment_id).await.unwrap();
        assert_eq!(released.as_deref(), Some("Moderna"));
        assert!(ledger.get_slot(slot.appointment_id).await.unwrap().unwrap().is_open());

        // releasing an open slot reports nothing bound
        assert_eq!(ledger.release(slot.appointment_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_release_unknown_slot() {
        let (_pool, ledger) = ledger_with_caregivers(&[]).await;
        assert_eq!(ledger.release(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_listings_are_scoped_and_ordered() {
        let (pool, ledger) = ledger_with_caregivers(&["carol", "dave"]).await;
        test_support::add_patient(&pool, "pat").await;
        sqlx::query("INSERT INTO vaccines (name, doses) VALUES ('Moderna', 1)")
            .execute(&pool)
            .await
            .unwrap();

        let a = ledger.publish("carol", day(3)).await.unwrap();
        let b = ledger.publish("dave", day(1)).await.unwrap();
        let c = ledger.publish("carol", day(1)).await.unwrap();
        ledger.book(b.appointment_id, "pat", "Moderna").await.unwrap();

        let carol: Vec<i64> = ledger
            .list_for_caregiver("carol")
            .await
            .unwrap()
            .iter()
            .map(|s| s.appointment_id)
            .collect();
        assert_eq!(carol, vec![a.appointment_id, c.appointment_id]);

        let pat = ledger.list_for_patient("pat").await.unwrap();
        assert_eq!(pat.len(), 1);
        assert_eq!(pat[0].caregiver_username, "dave");
        assert_eq!(pat[0].date, day(1));
    }
}
