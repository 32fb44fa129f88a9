pub mod checkin;
pub mod clock;
pub mod error;
pub mod loyalty;
pub mod passengers;
pub mod repository;
pub mod request;

#[cfg(test)]
pub(crate) mod testing;

pub use checkin::{CheckinService, ConfirmationReceipt, MIN_EMERGENCY_ROW_AGE};
pub use clock::{Clock, SystemClock};
pub use error::{BusinessRule, CoreError, CoreResult, Entity, FieldError};
pub use passengers::{PassengerProfile, PassengerService};
pub use repository::{PassengerRepository, StoreError};
pub use request::{ConfirmationForm, ConfirmationRequest};
