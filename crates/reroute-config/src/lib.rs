pub mod config;
pub mod entries;
pub mod error;
mod loading;
pub mod routes;

pub use config::*;
pub use entries::{existing_entry_file, find_entry_file};
pub use error::*;
pub use loading::{CONFIG_FILES, ENV_PREFIX};
pub use routes::{ROUTE_CONFIG_FILES, find_route_config, load_route_config, parse_route_config};
