pub(crate) mod calendar_model;
pub(crate) mod calendar_service;

pub use calendar_model::{DayCell, MonthGrid, MonthNavigation};
pub use calendar_service::{CalendarService, CalendarServiceTrait};
