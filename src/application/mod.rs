pub mod path_search_service;

pub use path_search_service::*;
