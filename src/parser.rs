use crate::charmap::{self, CharMap};
use crate::errors::{ParseError, UnsupportedFormat};
use crate::models::DemoInfo;
use crate::{dem, mvd, qwd};
use std::path::Path;

/// The demo formats that metadata can be extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoFormat {
    /// Single player (NetQuake, FitzQuake, RMQ) demos
    Dem,

    /// QuakeWorld client demos
    Qwd,

    /// QuakeWorld multi-view demos
    Mvd,
}

static EXTENSIONS: phf::Map<&'static str, DemoFormat> = phf::phf_map! {
    "DEM" => DemoFormat::Dem,
    "QWD" => DemoFormat::Qwd,
    "MVD" => DemoFormat::Mvd,
};

impl DemoFormat {
    /// Determines the format from a file name's extension, ignoring case
    pub fn from_file_name(file_name: &str) -> Result<DemoFormat, UnsupportedFormat> {
        let ext = Path::new(file_name)
            .extension()
            .map(|x| x.to_string_lossy())
            .filter(|x| !x.is_empty())
            .ok_or(UnsupportedFormat { extension: None })?;

        EXTENSIONS
            .get(ext.to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| UnsupportedFormat {
                extension: Some(ext.into_owned()),
            })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DemoFormat::Dem => "dem",
            DemoFormat::Qwd => "qwd",
            DemoFormat::Mvd => "mvd",
        }
    }

    pub fn is_multiplayer(&self) -> bool {
        !matches!(self, DemoFormat::Dem)
    }

    /// Extracts the metadata, explaining why the demo was rejected on failure
    pub fn parse(&self, data: &[u8], char_map: CharMap) -> Result<DemoInfo, ParseError> {
        match self {
            DemoFormat::Dem => dem::parse(data, char_map),
            DemoFormat::Qwd => qwd::parse(data, char_map),
            DemoFormat::Mvd => mvd::parse(data, char_map),
        }
    }
}

/// The main entry point to extracting demo metadata. The format is picked from the demo's file
/// name unless one is given explicitly.
#[derive(Debug, Clone)]
pub struct ParserBuilder<'a> {
    data: &'a [u8],
    char_map: Option<CharMap>,
    format: Option<DemoFormat>,
}

impl<'a> ParserBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ParserBuilder {
            data,
            char_map: None,
            format: None,
        }
    }

    /// How bytes of the map title are displayed. Defaults to [`charmap::quake`]
    pub fn with_char_map(mut self, char_map: CharMap) -> ParserBuilder<'a> {
        self.char_map = Some(char_map);
        self
    }

    /// Skip looking at the file name's extension
    pub fn with_format(mut self, format: DemoFormat) -> ParserBuilder<'a> {
        self.format = Some(format);
        self
    }

    /// Extracts the demo's metadata. A demo that can't be parsed is not an error, it yields no
    /// metadata. Only a file name without a recognized extension is an error.
    pub fn parse(self, file_name: &str) -> Result<Option<DemoInfo>, UnsupportedFormat> {
        let format = match self.format {
            Some(format) => format,
            None => DemoFormat::from_file_name(file_name)?,
        };

        let char_map = self.char_map.unwrap_or(charmap::quake);
        match format.parse(self.data, char_map) {
            Ok(info) => Ok(Some(info)),
            Err(e) => {
                log::debug!("unable to parse {} as {:?}: {}", file_name, format, e);
                Ok(None)
            }
        }
    }
}
