pub mod demo;
pub mod export;
pub mod goal;
pub mod import;
pub mod plan;
pub mod profile;
pub mod remind;
