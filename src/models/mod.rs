pub mod activity;
pub mod goal;
pub mod profile;
