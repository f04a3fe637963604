pub mod year_2022;
pub mod year_2023;
