use std::error::Error;
use std::fmt;

/// Describes why a demo's contents could not be parsed. Callers of [`ParserBuilder::parse`] never
/// see this type (any of these collapse into "no result"), but [`DemoFormat::parse`] exposes it
/// for diagnosing a rejected file.
///
/// [`ParserBuilder::parse`]: crate::ParserBuilder::parse
/// [`DemoFormat::parse`]: crate::DemoFormat::parse
#[derive(PartialEq, Debug, Clone)]
pub enum ParseError {
    /// Wraps an error with the section being decoded and the offset where it was detected
    ParseError(&'static str, usize, Box<ParseError>),
    InsufficientData(usize, usize),
    MissingTerminator(u8, usize),
    InvalidCdTrack,
    InvalidBlockLength(i32),
    BlockPastEnd(usize, usize),
    UnexpectedBlockType(u8),
    ConnectionlessBlock,
    UnexpectedMessage(u8),
    UnknownMessage(u8),
    UnsupportedProtocol(i32),
    InvalidMaxClients(u8),
    InvalidGameType(u8),
    EmptyMapPath,
    MapNotFound,
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::ParseError(_, _, e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::ParseError(section, offset, e) => {
                write!(f, "Could not decode {} at offset ({}): {}", section, offset, e)
            }
            ParseError::InsufficientData(expected, left) => write!(
                f,
                "Insufficient data. Expected {} bytes, but only {} left",
                expected, left
            ),
            ParseError::MissingTerminator(term, limit) => write!(
                f,
                "Expected terminator 0x{:02x} within {} bytes",
                term, limit
            ),
            ParseError::InvalidCdTrack => write!(f, "CD track is not a decimal number"),
            ParseError::InvalidBlockLength(len) => write!(f, "Block length of {} is not valid", len),
            ParseError::BlockPastEnd(end, len) => write!(
                f,
                "Block ends at {} which is past the end of the data ({})",
                end, len
            ),
            ParseError::UnexpectedBlockType(code) => {
                write!(f, "Expected a server block but found block type {}", code)
            }
            ParseError::ConnectionlessBlock => write!(f, "Connectionless blocks are not supported"),
            ParseError::UnexpectedMessage(tag) => {
                write!(f, "Expected server info message but found {}", tag)
            }
            ParseError::UnknownMessage(tag) => write!(f, "Unknown message: {}", tag),
            ParseError::UnsupportedProtocol(protocol) => {
                write!(f, "Protocol {} is not supported", protocol)
            }
            ParseError::InvalidMaxClients(clients) => {
                write!(f, "Max clients of {} is out of range", clients)
            }
            ParseError::InvalidGameType(kind) => write!(f, "Game type {} is not valid", kind),
            ParseError::EmptyMapPath => write!(f, "Map file path is empty"),
            ParseError::MapNotFound => write!(f, "No map file path found in demo"),
        }
    }
}

/// The file name did not carry one of the recognized demo extensions. Distinct from a
/// [`ParseError`] as the contents were never inspected.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct UnsupportedFormat {
    pub extension: Option<String>,
}

impl Error for UnsupportedFormat {}

impl fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.extension {
            Some(ref ext) => write!(f, "Unsupported demo type: .{}", ext),
            None => write!(f, "Unsupported demo type: file has no extension"),
        }
    }
}
