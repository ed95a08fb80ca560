use sqlx::SqlitePool;

use crate::scheduling_types::*;

/// Service for reading and updating vaccine dose counts.
///
/// Updates are read-then-write: the caller holds a previously read
/// [`VaccineStock`], the new total is computed from it and written back as an
/// absolute value. Concurrent writers can lose updates.
#[derive(Clone)]
pub struct VaccineInventory {
    pool: SqlitePool,
}

impl VaccineInventory {
    /// Creates a new instance of `VaccineInventory` with the provided database connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Gets a vaccine by name, returning `None` if it is not in the inventory
    pub async fn get_by_name(&self, name: &str) -> Result<Option<VaccineStock>, SchedulingError> {
        let stock =
            sqlx::query_as::<_, VaccineStock>("SELECT name, doses FROM vaccines WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(stock)
    }

    /// Lists every vaccine in the inventory ordered by name
    pub async fn list(&self) -> Result<Vec<VaccineStock>, SchedulingError> {
        let stock =
            sqlx::query_as::<_, VaccineStock>("SELECT name, doses FROM vaccines ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(stock)
    }

    /// Adds a vaccine that is not in the inventory yet
    pub async fn create(
        &self,
        name: &str,
        initial_doses: i32,
    ) -> Result<VaccineStock, SchedulingError> {
        if initial_doses < 0 {
            return Err(SchedulingError::InvalidArgument(format!(
                "initial doses cannot be negative: {initial_doses}"
            )));
        }

        sqlx::query("INSERT INTO vaccines (name, doses) VALUES (?, ?)")
            .bind(name)
            .bind(initial_doses)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                    SchedulingError::VaccineExists(name.to_string())
                } else {
                    SchedulingError::Database(e)
                }
            })?;

        log::info!("Added vaccine {} with {} doses", name, initial_doses);

        Ok(VaccineStock {
            name: name.to_string(),
            available_doses: initial_doses,
        })
    }

    /// Adds `num` doses to the stock and persists the new total
    pub async fn increase(
        &self,
        stock: &mut VaccineStock,
        num: i32,
    ) -> Result<(), SchedulingError> {
        if num <= 0 {
            return Err(SchedulingError::InvalidArgument(format!(
                "dose increase must be positive: {num}"
            )));
        }

        let total = stock.available_doses.checked_add(num).ok_or_else(|| {
            SchedulingError::InvalidArgument(format!("dose count overflow for {}", stock.name))
        })?;

        self.persist(&stock.name, total).await?;
        stock.available_doses = total;
        Ok(())
    }

    /// Removes `num` doses from the stock and persists the new total
    pub async fn decrease(
        &self,
        stock: &mut VaccineStock,
        num: i32,
    ) -> Result<(), SchedulingError> {
        if num <= 0 {
            return Err(SchedulingError::InvalidArgument(format!(
                "dose decrease must be positive: {num}"
            )));
        }

        let total = stock
            .available_doses
            .checked_sub(num)
            .filter(|total| *total >= 0)
            .ok_or_else(|| {
                SchedulingError::InvalidArgument(format!(
                    "not enough doses of {}: {} available, {} requested",
                    stock.name, stock.available_doses, num
                ))
            })?;

        self.persist(&stock.name, total).await?;
        stock.available_doses = total;
        Ok(())
    }

    async fn persist(&self, name: &str, doses: i32) -> Result<(), SchedulingError> {
        sqlx::query("UPDATE vaccines SET doses = ? WHERE name = ?")
            .bind(doses)
            .bind(name)
            .execute(&self.pool)
            .await?;

        log::debug!("Vaccine {} now has {} doses", name, doses);
        Ok(())
    }
}
