//! # QWD
//!
//! QuakeWorld client side demos are a series of timestamped blocks. Server blocks hold the
//! messages received from the server:
//!
//! ```plain
//! time          float32
//! code          byte (BLOCK_SERVER)
//! block length  int32
//! sequence      uint32 (0xFFFFFFFF for connectionless)
//! sequence ack  uint32
//! messages      [u8; block length - 8]
//! ```
//!
//! Client blocks and frame blocks are only recorded once the client is connected, which is after
//! the model list, so any other block type means the demo is malformed.

use crate::charmap::CharMap;
use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::messages::{MessageReader, StreamState};
use crate::models::DemoInfo;
use crate::protocol::{BLOCK_SERVER, CONNECTIONLESS};

pub fn parse(data: &[u8], char_map: CharMap) -> Result<DemoInfo, ParseError> {
    let mut core = CoreParser::new(data);
    let reader = MessageReader {
        client_id_len: 1,
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

/// Returns where the server block ends and its declared length
fn block_header(core: &mut CoreParser) -> Result<(usize, usize), ParseError> {
    // time
    core.skip(4)?;

    let code = core.take_u8()?;
    if code != BLOCK_SERVER {
        return Err(ParseError::UnexpectedBlockType(code));
    }

    let len = core.take_i32()?;
    let block_len = usize::try_from(len).map_err(|_| ParseError::InvalidBlockLength(len))?;
    let end = core.bytes_read().saturating_add(block_len);
    if end >= core.len() {
        return Err(ParseError::BlockPastEnd(end, core.len()));
    }

    if core.take_u32()? == CONNECTIONLESS {
        return Err(ParseError::ConnectionlessBlock);
    }

    // sequence ack
    core.skip(4)?;
    Ok((end, block_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charmap;
    use crate::messages::tests::{name_list, server_info};
    use crate::protocol::*;

    fn block(messages: &[u8]) -> Vec<u8> {
        block_with(BLOCK_SERVER, 1, messages)
    }

    fn block_with(code: u8, sequence: u32, messages: &[u8]) -> Vec<u8> {
        let mut data = 1.5f32.to_le_bytes().to_vec();
        data.push(code);
        data.extend_from_slice(&(messages.len() as i32 + 8).to_le_bytes());
        data.extend_from_slice(&sequence.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(messages);
        data
    }

    /// A frame block as recorded after the connection completes
    fn trailer() -> Vec<u8> {
        let mut data = 2.0f32.to_le_bytes().to_vec();
        data.push(BLOCK_FRAME);
        data.extend_from_slice(&[0u8; 4]);
        data
    }

    fn dm3(protocol: i32) -> Vec<u8> {
        let mut messages = server_info(protocol, "qw", "DM3", 1);
        messages.extend(name_list(SVC_MODELLIST, protocol, &["progs/player.mdl", "maps/dm3.bsp"]));
        let mut data = block(&messages);
        data.extend(trailer());
        data
    }

    fn root_cause(e: ParseError) -> ParseError {
        match e {
            ParseError::ParseError(_, _, inner) => root_cause(*inner),
            e => e,
        }
    }

    #[test]
    fn test_single_block() {
        for protocol in 24..=28 {
            let info = parse(&dm3(protocol), charmap::quake).unwrap();
            assert_eq!(
                info,
                DemoInfo {
                    mod_name: String::from("qw"),
                    map_file_path: String::from("maps/dm3.bsp"),
                    map_title: String::from("DM3"),
                }
            );
        }
    }

    #[test]
    fn test_messages_across_blocks() {
        let mut data = block(&server_info(28, "fortress", "", 1));
        let mut messages = vec![SVC_STUFFTEXT];
        messages.extend_from_slice(b"cmd soundlist 1 0\n\0");
        messages.extend(name_list(SVC_SOUNDLIST, 28, &["weapons/ric1.wav"]));
        data.extend(block(&messages));
        data.extend(block(&[SVC_CDTRACK, 4]));
        data.extend(block(&name_list(SVC_MODELLIST, 28, &["maps/2fort5.bsp"])));
        data.extend(trailer());

        let info = parse(&data, charmap::quake).unwrap();
        assert_eq!(info.mod_name, "fortress");
        assert_eq!(info.map_file_path, "maps/2fort5.bsp");

        // No fallback to the map's file name for QuakeWorld demos
        assert_eq!(info.map_title, "");
    }

    #[test]
    fn test_only_server_blocks() {
        let mut data = block_with(BLOCK_CLIENT, 1, &[]);
        data.extend(dm3(28));
        assert_eq!(
            root_cause(parse(&data, charmap::quake).unwrap_err()),
            ParseError::UnexpectedBlockType(BLOCK_CLIENT)
        );
    }

    #[test]
    fn test_connectionless_block() {
        let mut data = block_with(BLOCK_SERVER, CONNECTIONLESS, b"\xff\xff\xff\xffclient_connect");
        data.extend(dm3(28));
        assert_eq!(
            root_cause(parse(&data, charmap::quake).unwrap_err()),
            ParseError::ConnectionlessBlock
        );
    }

    #[test]
    fn test_block_reaching_end() {
        // The final block may not end at the end of the file
        let mut messages = server_info(28, "qw", "DM3", 1);
        messages.extend(name_list(SVC_MODELLIST, 28, &["maps/dm3.bsp"]));
        let data = block(&messages);
        assert_eq!(
            root_cause(parse(&data, charmap::quake).unwrap_err()),
            ParseError::BlockPastEnd(data.len(), data.len())
        );
    }

    #[test]
    fn test_map_not_found() {
        // The last block declares a length that ends before its final byte, so the stream is
        // exhausted without the data ever ending inside of a block
        let mut data = block(&server_info(28, "qw", "DM3", 1));
        let mut last = block(&[SVC_CDTRACK, 4]);
        last[5..9].copy_from_slice(&9i32.to_le_bytes());
        data.extend(last);
        assert_eq!(
            parse(&data, charmap::quake).unwrap_err(),
            ParseError::MapNotFound
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse(&[], charmap::quake).unwrap_err(), ParseError::MapNotFound);
    }

    #[test]
    fn test_truncated() {
        let data = dm3(28);
        let map_end = data.len() - trailer().len() - 2;
        for cut in 0..map_end {
            assert!(parse(&data[..cut], charmap::quake).is_err(), "cut at {}", cut);
        }
    }
}
