use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::availability::AvailabilityLedger;
use crate::inventory::VaccineInventory;
use crate::scheduling_types::*;

/// Orchestrates bookings across the availability ledger and the vaccine inventory.
///
/// Multi-step operations are independent writes with no transaction around
/// them: a failure halfway leaves the earlier writes in place.
pub struct ReservationService {
    inventory: VaccineInventory,
    ledger: AvailabilityLedger,
}

impl ReservationService {
    /// Creates a new instance of `ReservationService` with the provided database connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inventory: VaccineInventory::new(pool.clone()),
            ledger: AvailabilityLedger::new(pool),
        }
    }

    /// The vaccine inventory used by this service
    pub fn inventory(&self) -> &VaccineInventory {
        &self.inventory
    }

    /// The availability ledger used by this service
    pub fn ledger(&self) -> &AvailabilityLedger {
        &self.ledger
    }

    /// Books the first open slot on `date` for the patient.
    ///
    /// The caregiver is the lowest username with an open slot. The slot id is
    /// fetched by a second query with the same filter, so under interleaved
    /// writes it may belong to a different caregiver than the one reported.
    /// Stock is checked against the count read at the start, after the
    /// caregiver has been chosen.
    pub async fn reserve(
        &self,
        date: NaiveDate,
        vaccine_name: &str,
        patient_username: &str,
    ) -> Result<Reservation, SchedulingError> {
        let Some(mut vaccine) = self.inventory.get_by_name(vaccine_name).await? else {
            let inventory = self
                .inventory
                .list()
                .await?
                .into_iter()
                .map(|v| v.name)
                .collect();
            return Err(SchedulingError::VaccineNotFound {
                name: vaccine_name.to_string(),
                inventory,
            });
        };

        let caregivers = self.ledger.find_open_slots(date).await?;
        let Some(caregiver_username) = caregivers.into_iter().next() else {
            return Err(SchedulingError::NoAvailability);
        };

        let appointment_id = self
            .ledger
            .first_open_slot_id(date)
            .await?
            .ok_or(SchedulingError::NoAvailability)?;

        if vaccine.available_doses == 0 {
            return Err(SchedulingError::OutOfStock(vaccine.name));
        }

        self.ledger
            .book(appointment_id, patient_username, &vaccine.name)
            .await?;
        self.inventory.decrease(&mut vaccine, 1).await?;

        log::info!(
            "Reserved appointment {} with {} for {} ({})",
            appointment_id,
            caregiver_username,
            patient_username,
            vaccine.name
        );

        Ok(Reservation {
            appointment_id,
            caregiver_username,
        })
    }

    /// Cancels an appointment and returns its dose to the inventory.
    ///
    /// An unknown appointment id is not an error.
    pub async fn cancel(&self, appointment_id: i64) -> Result<(), SchedulingError> {
        let Some(vaccine_name) = self.ledger.release(appointment_id).await? else {
            return Ok(());
        };

        match self.inventory.get_by_name(&vaccine_name).await? {
            Some(mut vaccine) => self.inventory.increase(&mut vaccine, 1).await?,
            None => log::warn!(
                "Cancelled appointment {} referenced missing vaccine {}",
                appointment_id,
                vaccine_name
            ),
        }

        Ok(())
    }

    /// Creates the vaccine with `doses` if unseen, otherwise adds `doses` to its stock
    pub async fn add_doses(
        &self,
        vaccine_name: &str,
        doses: i32,
    ) -> Result<VaccineStock, SchedulingError> {
        match self.inventory.get_by_name(vaccine_name).await? {
            Some(mut vaccine) => {
                self.inventory.increase(&mut vaccine, doses).await?;
                Ok(vaccine)
            }
            None => self.inventory.create(vaccine_name, doses).await,
        }
    }

    /// Collects the caregivers open on `date` and the current vaccine stock
    pub async fn schedule_for(&self, date: NaiveDate) -> Result<ScheduleView, SchedulingError> {
        let caregivers = self.ledger.find_open_slots(date).await?;
        let vaccines = self.inventory.list().await?;

        Ok(ScheduleView {
            date,
            caregivers,
            vaccines,
        })
    }
}
