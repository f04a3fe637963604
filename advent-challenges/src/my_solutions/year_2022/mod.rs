pub mod day_8;
pub mod day_10;
pub mod day_12;
pub mod day_14;
pub mod day_15;
