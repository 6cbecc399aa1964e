//! # DEM
//!
//! Single player (NetQuake) demos start with the CD track as text, followed by blocks of server
//! messages. Only the first block is inspected as its first message is the server info:
//!
//! ```plain
//! cd track      "-1\n"
//! block length  int32
//! view angles   float32 x 3
//! svc           byte (SVC_SERVERINFO)
//! protocol      int32 (15, 666, or 999)
//! flags         int32 (only for 999)
//! max clients   byte (1 to 16)
//! game type     byte (0 coop, 1 deathmatch)
//! map title     null terminated string
//! map path      null terminated string ("maps/e1m1.bsp")
//! ```

use crate::charmap::CharMap;
use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::DemoInfo;
use crate::parsing_utils::{decode_windows1252, file_name_of};
use crate::protocol::*;

pub fn parse(data: &[u8], char_map: CharMap) -> Result<DemoInfo, ParseError> {
    let mut core = CoreParser::new(data);

    core.skip_numeral(b'\n', MAX_CD_TRACK_LEN)
        .map_err(|e| ParseError::ParseError("cd track", core.bytes_read(), Box::new(e)))?;

    let block_len = block_header(&mut core)
        .map_err(|e| ParseError::ParseError("block header", core.bytes_read(), Box::new(e)))?;

    server_info(&mut core, block_len, char_map)
        .map_err(|e| ParseError::ParseError("server info", core.bytes_read(), Box::new(e)))
}

/// Reads the block length and skips the view angles
fn block_header(core: &mut CoreParser) -> Result<usize, ParseError> {
    let len = core.take_i32()?;
    let block_len = usize::try_from(len).map_err(|_| ParseError::InvalidBlockLength(len))?;
    let end = core.bytes_read().saturating_add(block_len);
    if end >= core.len() {
        return Err(ParseError::BlockPastEnd(end, core.len()));
    }

    core.skip(12)?;
    Ok(block_len)
}

fn server_info(
    core: &mut CoreParser,
    block_len: usize,
    char_map: CharMap,
) -> Result<DemoInfo, ParseError> {
    let tag = core.take_u8()?;
    if tag != SVC_SERVERINFO {
        return Err(ParseError::UnexpectedMessage(tag));
    }

    let protocol = core.take_i32()?;
    if !is_sp_protocol(protocol) {
        return Err(ParseError::UnsupportedProtocol(protocol));
    }

    if protocol == PROTOCOL_RMQ {
        // protocol flags
        core.skip(4)?;
    }

    let max_clients = core.take_u8()?;
    if !(1..=MAX_CLIENTS).contains(&max_clients) {
        return Err(ParseError::InvalidMaxClients(max_clients));
    }

    let game_type = core.take_u8()?;
    if game_type != GAME_COOP && game_type != GAME_DEATHMATCH {
        return Err(ParseError::InvalidGameType(game_type));
    }

    let map_title = core.map_title(block_len, char_map)?;
    let map_file_path = decode_windows1252(core.take_cstr(block_len)?);
    if map_file_path.is_empty() {
        return Err(ParseError::EmptyMapPath);
    }

    let map_title = if map_title.is_empty() {
        String::from(file_name_of(&map_file_path))
    } else {
        map_title
    };

    Ok(DemoInfo {
        mod_name: String::new(),
        map_file_path,
        map_title,
    })
}
