pub mod logger;
pub mod path_search;

pub use logger::*;
pub use path_search::*;
