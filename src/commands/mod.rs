pub mod backup;
pub mod clean;
pub mod config;
pub mod doctor;
pub mod fetch;
pub mod provision;
pub mod restore;
pub mod verify;
