pub mod attendance;
pub mod core;
pub mod dashboard;
pub mod marks;
pub mod students;
