use auth_services::service::AuthService;
use sqlx::SqlitePool;
use vaccine_scheduling::ReservationService;

/// Database pool and settings shared by all handlers
#[derive(Clone)]
pub struct HandlerContext {
    pool: SqlitePool,
    hash_cost: u32,
}

impl HandlerContext {
    /// Creates a context hashing new passwords with the given bcrypt cost
    pub fn new(pool: SqlitePool, hash_cost: u32) -> Self {
        Self { pool, hash_cost }
    }

    /// Account service bound to this context's pool
    pub fn auth_service(&self) -> AuthService {
        AuthService::with_cost(self.pool.clone(), self.hash_cost)
    }

    /// Reservation service bound to this context's pool
    pub fn reservation_service(&self) -> ReservationService {
        ReservationService::new(self.pool.clone())
    }
}
