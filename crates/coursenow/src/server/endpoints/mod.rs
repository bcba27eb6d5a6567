pub mod courses;
pub mod status;
