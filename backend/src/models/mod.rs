pub mod checksum;
pub mod grid;
pub mod response;

pub use checksum::{calculate_checksum, dataset_checksum};
pub use grid::{cell_text, RawTimetableSet, TimetableGrid, DAY_HEADER_KEY};
pub use response::{GenerationResponse, UNKNOWN_SERVER_ERROR};
