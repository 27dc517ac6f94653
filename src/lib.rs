pub mod database;
pub mod tags;
