pub mod images;
pub mod reports;
pub mod reservation;
