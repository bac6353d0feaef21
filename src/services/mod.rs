pub mod blue_cell_service;
pub mod blue_cells;
pub mod query_cache;
pub mod timesheet_source;

pub use blue_cell_service::{BlueCellQuery, BlueCellService, BlueCells};
pub use blue_cells::{compute_week_highlights, day_start, is_highlighted_day, RevisionTimeline};
pub use query_cache::QueryCache;
pub use timesheet_source::TimesheetSource;
