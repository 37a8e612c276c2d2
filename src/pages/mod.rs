pub mod force;
pub mod home;
pub mod not_found;
