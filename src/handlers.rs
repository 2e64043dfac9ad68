pub mod charts;
pub mod dashboard;
pub mod evolution;
pub mod health;
pub mod prepaid;
pub mod records;
pub mod series;
