//! # Models
//!
//! The metadata extracted from a demo and the catalog item that wraps it for display. Both only
//! serialize: a catalog is rebuilt by parsing the demos again rather than loading old output.

use crate::errors::UnsupportedFormat;
use crate::parsing_utils::file_name_of;
use serde::Serialize;

/// Metadata of a successfully parsed demo
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct DemoInfo {
    /// The game directory the demo was recorded with (eg: "qw"). Only QuakeWorld demos record
    /// this, so it is empty for single player demos.
    pub mod_name: String,

    /// Path of the map inside of the game's pak files (eg: "maps/dm3.bsp"). Never empty.
    pub map_file_path: String,

    /// Human readable name of the map (eg: "The Abandoned Base")
    pub map_title: String,
}

/// A demo as it is listed in a catalog. Demos that could not be parsed still receive an item so
/// that they can be shown as invalid instead of vanishing from the listing.
#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct DemoItem {
    /// Text shown for the item (eg: "demos/dm3_demo.dem | map: The Abandoned Base")
    pub title: String,

    /// The demo's file name, as given by the caller
    pub value: String,
    pub mod_name: String,
    pub map_file_path: String,
    pub map_title: String,
    pub is_invalid: bool,
}

impl DemoItem {
    pub fn new(file_name: &str, info: DemoInfo) -> Self {
        DemoItem {
            title: format!("{} | map: {}", file_name, info.map_title),
            value: String::from(file_name),
            mod_name: info.mod_name,
            map_file_path: info.map_file_path,
            map_title: info.map_title,
            is_invalid: false,
        }
    }

    /// An item carrying a message in place of map details
    pub fn invalid(file_name: &str, message: &str, is_invalid: bool) -> Self {
        let title = if message.is_empty() {
            String::from(file_name)
        } else {
            format!("{} | {}", file_name, message)
        };

        DemoItem {
            title,
            value: String::from(file_name),
            mod_name: String::new(),
            map_file_path: String::new(),
            map_title: String::from(file_name_of(file_name)),
            is_invalid,
        }
    }

    /// Builds the item for any outcome of parsing a demo
    pub fn from_outcome(
        file_name: &str,
        outcome: Result<Option<DemoInfo>, UnsupportedFormat>,
    ) -> Self {
        match outcome {
            Ok(Some(info)) => DemoItem::new(file_name, info),
            Ok(None) => DemoItem::invalid(file_name, "invalid or corrupted demo", true),
            Err(e) => DemoItem::invalid(file_name, &e.to_string(), true),
        }
    }
}
