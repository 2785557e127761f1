pub mod build;
pub mod integration;
pub mod plan;
pub mod run;
