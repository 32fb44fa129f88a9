use crate::seat::{Seat, SeatParseError};

pub const ROW_COUNT: u8 = 10;
pub const COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];
pub const EMERGENCY_ROWS: [u8; 2] = [5, 6];

const SEAT_COUNT: usize = ROW_COUNT as usize * COLUMNS.len();

const fn layout() -> [Seat; SEAT_COUNT] {
    let mut seats = [Seat::at(1, 'A'); SEAT_COUNT];
    let mut i = 0;
    while i < SEAT_COUNT {
        seats[i] = Seat::at((i / COLUMNS.len()) as u8 + 1, COLUMNS[i % COLUMNS.len()]);
        i += 1;
    }
    seats
}

/// Row-major seat map: "1A".."1F", "2A", ... "10F"
static SEATS: [Seat; SEAT_COUNT] = layout();

/// Static seat map of the modeled aircraft
pub struct SeatCatalog;

impl SeatCatalog {
    pub fn seats() -> &'static [Seat] {
        &SEATS
    }

    pub fn len() -> usize {
        SEATS.len()
    }

    /// Resolve a seat code against the catalog, case-insensitively
    pub fn lookup(code: &str) -> Result<Seat, SeatParseError> {
        // Parsing already bounds rows and columns to the catalog shape
        code.parse::<Seat>()
    }

    pub fn contains(code: &str) -> bool {
        Self::lookup(code).is_ok()
    }
}
