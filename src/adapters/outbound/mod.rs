pub mod buffered_logger;
pub mod console_logger;
pub mod file_logger;
pub mod heatmap;
pub mod map_data;
pub mod multi_logger;
pub mod noop_logger;
pub mod pheromone_map;

pub use buffered_logger::*;
pub use console_logger::*;
pub use file_logger::*;
pub use heatmap::*;
pub use map_data::*;
pub use multi_logger::*;
pub use noop_logger::*;
pub use pheromone_map::*;
