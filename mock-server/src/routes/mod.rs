pub mod dashboard;
pub mod execution;
pub mod market;
pub mod news;
pub mod portfolio;
