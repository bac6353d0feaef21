// Núcleo do timesheet Aponta
// Células azuis: destaque dos dias em que o usuário trabalhava no work item

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use models::{StateCategory, StateCategoryMap, WeekDates, WeekHighlights, WorkItemRevision};
pub use services::{compute_week_highlights, is_highlighted_day, BlueCellQuery, BlueCellService, BlueCells};
