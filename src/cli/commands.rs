pub mod check_data;
pub mod serve;

pub use check_data::check_data;
pub use serve::serve;
