pub mod chart;
pub mod coin;
pub mod file;
pub mod history;
pub mod notice;
pub mod query;
pub mod settings;
