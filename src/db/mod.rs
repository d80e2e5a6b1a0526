pub mod activity_repository;
pub mod connection;
pub mod goal_repository;
pub mod profile_repository;
