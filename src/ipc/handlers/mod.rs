pub mod assistant;
pub mod core;
pub mod dashboard;
pub mod finance;
pub mod inventory;
pub mod navigation;
pub mod schedule;
pub mod schools;
pub mod session;
pub mod staff;
pub mod students;
