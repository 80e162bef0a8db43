//! View state containers. The frontend owns instances; the core provides
//! the update logic.

pub mod chart;
pub mod coin_list;
pub mod countdown;
pub mod upload;
