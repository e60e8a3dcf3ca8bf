//! Repository modules for database access
//!
//! The only entity is the append-only `device_registrations` table.

pub mod device_registration;
pub mod device_registration_sql;

pub use device_registration::{DeviceRegistration, DeviceRegistrationRepository, DeviceTypeCount};
pub use device_registration_sql::SqlDeviceRegistrationRepository;
