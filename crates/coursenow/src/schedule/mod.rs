/// Course schedule loading and "in session now" matching
mod aggregate;
mod clock;
mod error;
mod loader;
mod matcher;
mod time;
mod types;

pub use aggregate::{aggregate, collect_current_courses};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ScheduleError;
pub use loader::{list_course_files, load_course};
pub use matcher::match_course;
pub use time::{convert_to_24_hour, parse_period};
pub use types::*;
