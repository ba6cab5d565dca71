/// Database layer for TaskTrack
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: embedded SQL migration runner
/// - `seed`: first-run bootstrap of the default admin account

pub mod migrations;
pub mod pool;
pub mod seed;
