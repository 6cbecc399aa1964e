//! # MVD
//!
//! Multi-view demos are recorded on the server. Each block opens with two bytes (commonly
//! `0x00 0x01` or `0x00 0x06`) and a length, followed directly by server messages. Unlike QWD
//! there is no block type to check, and server info carries a four byte client id.

use crate::charmap::CharMap;
use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::messages::{MessageReader, StreamState};
use crate::models::DemoInfo;

pub fn parse(data: &[u8], char_map: CharMap) -> Result<DemoInfo, ParseError> {
    let mut core = CoreParser::new(data);
    let reader = MessageReader {
        client_id_len: 4,
        char_map,
    };

    let mut state = StreamState::default();
    while !core.is_empty() && !state.is_done() {
        let offset = core.bytes_read();
        let (end, block_len) = block_header(&mut core)
            .map_err(|e| ParseError::ParseError("block header", offset, Box::new(e)))?;
        reader.read_block(&mut core, end, block_len, &mut state)?;
    }

    state.into_info()
}

fn block_header(core: &mut CoreParser) -> Result<(usize, usize), ParseError> {
    core.skip(2)?;
    let len = core.take_i32()?;
    let block_len = usize::try_from(len).map_err(|_| ParseError::InvalidBlockLength(len))?;
    let end = core.bytes_read().saturating_add(block_len);
    if end >= core.len() {
        return Err(ParseError::BlockPastEnd(end, core.len()));
    }

    Ok((end, block_len))
}
