pub mod config;
pub mod matching;
pub mod quiz;
pub mod serve;
