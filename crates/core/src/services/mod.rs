pub mod chart_service;
pub mod coin_query;
pub mod format;
pub mod refresh;
pub mod upload_service;
