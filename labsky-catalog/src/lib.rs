pub mod seat;
pub mod catalog;

pub use seat::{normalize_seat_code, Seat, SeatParseError};
pub use catalog::{SeatCatalog, COLUMNS, EMERGENCY_ROWS, ROW_COUNT};
