pub mod example_config;
pub mod run;
