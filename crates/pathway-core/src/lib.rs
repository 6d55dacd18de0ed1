pub mod code;
pub mod error;
pub mod narrative;
pub mod time;

pub use code::{Coding, CodingSystem};
pub use error::{CoreError, Result};
pub use narrative::{Granularity, format_long, format_short, humanize};
pub use time::{Shift, Timeframe, add_months, add_years};
