pub mod revision;
pub mod state_map;
pub mod week;

pub use revision::{parse_timestamp, WorkItemRevision};
pub use state_map::{StateCategory, StateCategoryMap};
pub use week::{WeekDates, WeekHighlights, DAYS_IN_WEEK, NO_HIGHLIGHTS};
