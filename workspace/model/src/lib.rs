pub mod evolution;
pub mod month;
pub mod prepaid;
pub mod record;

pub use evolution::EvolutionEntry;
pub use month::{MonthKey, ParseMonthError};
pub use prepaid::{ParsePrepaidKindError, PrepaidEntry, PrepaidKind};
pub use record::MonthlyRecord;
