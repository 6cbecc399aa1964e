//! # quakedemo
//!
//! quakedemo extracts the metadata needed to list Quake demos in a catalog: the map that was
//! played, its title, and for QuakeWorld demos the game directory. Three formats are understood:
//!
//! - `.dem`: single player and NetQuake demos
//! - `.qwd`: QuakeWorld client demos
//! - `.mvd`: QuakeWorld multi-view demos
//!
//! Nothing beyond the connection handshake is decoded. A demo that is truncated or malformed is
//! not an error, it simply yields no metadata.
//!
//! ```
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = fs::read("assets/demos/good/dm3.qwd")?;
//! let info = quakedemo::ParserBuilder::new(&data)
//!     .parse("dm3.qwd")?
//!     .expect("a valid demo");
//!
//! assert_eq!(info.mod_name, "qw");
//! assert_eq!(info.map_file_path, "maps/dm3.bsp");
//! # Ok(())
//! # }
//! ```
//!
//! Parsing is synchronous and works over an in memory buffer with no shared state, so demos can
//! be parsed from as many threads as desired.

pub use self::errors::*;
pub use self::models::*;
pub use self::parser::*;

pub mod charmap;
mod core_parser;
mod dem;
mod errors;
mod messages;
mod models;
mod mvd;
mod parser;
mod parsing_utils;
pub mod protocol;
mod qwd;

/// Extracts the metadata of a demo, choosing the format from the file name's extension and
/// translating the map title with the console font mapping
pub fn parse(file_name: &str, data: &[u8]) -> Result<Option<DemoInfo>, UnsupportedFormat> {
    ParserBuilder::new(data).parse(file_name)
}
