pub mod entry;
pub mod hours;
pub mod mileage;
pub mod payperiod;
pub mod position;
