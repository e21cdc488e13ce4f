pub mod hours;
pub mod import;
pub mod mileage;
pub mod report;
pub mod rollup;
pub mod serve;
