//! # Messages
//!
//! Both QuakeWorld demo formats wrap the same server message stream inside of their blocks. Only
//! the handful of messages sent while connecting can appear before the model list that names the
//! map, so anything else is considered a malformed demo instead of being skipped.

use crate::charmap::CharMap;
use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::DemoInfo;
use crate::parsing_utils::{decode_windows1252, is_bsp};
use crate::protocol::*;

/// What has been learned from the messages read so far
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct StreamState {
    pub protocol: i32,
    pub game: String,
    pub map_title: String,
    pub map_file_path: Option<String>,
}

impl StreamState {
    pub fn is_done(&self) -> bool {
        self.map_file_path.is_some()
    }

    pub fn into_info(self) -> Result<DemoInfo, ParseError> {
        match self.map_file_path {
            Some(map_file_path) => Ok(DemoInfo {
                mod_name: self.game,
                map_file_path,
                map_title: self.map_title,
            }),
            None => Err(ParseError::MapNotFound),
        }
    }
}

/// Reads the message stream of a server block
#[derive(Debug, Clone, Copy)]
pub(crate) struct MessageReader {
    /// Width of the client id that follows the game directory in server info
    pub client_id_len: usize,
    pub char_map: CharMap,
}

impl MessageReader {
    /// Reads messages until `end` is reached or the map has been found. The block's declared
    /// length bounds the map title.
    pub fn read_block(
        &self,
        core: &mut CoreParser,
        end: usize,
        block_len: usize,
        state: &mut StreamState,
    ) -> Result<(), ParseError> {
        while core.bytes_read() < end && !state.is_done() {
            let offset = core.bytes_read();
            let tag = core.take_u8()?;
            self.read_message(core, tag, block_len, state)
                .map_err(|e| ParseError::ParseError(message_name(tag), offset, Box::new(e)))?;
        }

        Ok(())
    }

    fn read_message(
        &self,
        core: &mut CoreParser,
        tag: u8,
        block_len: usize,
        state: &mut StreamState,
    ) -> Result<(), ParseError> {
        match tag {
            SVC_SERVERINFO => self.server_info(core, block_len, state),
            SVC_CDTRACK => core.skip(1),
            SVC_STUFFTEXT => core.take_cstr(MAX_STUFFTEXT_LEN).map(|_| ()),
            SVC_MODELLIST => model_list(core, layout_for(state.protocol), state),
            SVC_SOUNDLIST => sound_list(core, layout_for(state.protocol)),
            _ => Err(ParseError::UnknownMessage(tag)),
        }
    }

    fn server_info(
        &self,
        core: &mut CoreParser,
        block_len: usize,
        state: &mut StreamState,
    ) -> Result<(), ParseError> {
        let protocol = core.take_i32()?;
        if !is_qw_protocol(protocol) {
            return Err(ParseError::UnsupportedProtocol(protocol));
        }

        state.protocol = protocol;

        // Age of the server in levels
        core.skip(4)?;
        state.game = decode_windows1252(core.take_cstr_unbounded()?);
        core.skip(self.client_id_len)?;
        state.map_title = core.map_title(block_len, self.char_map)?;

        if layout_for(protocol).trailing_floats {
            core.skip(MessageLayout::TRAILING_FLOATS_LEN)?;
        }

        Ok(())
    }
}

/// The first model is the world, so the first `.bsp` found is the map
fn model_list(
    core: &mut CoreParser,
    layout: MessageLayout,
    state: &mut StreamState,
) -> Result<(), ParseError> {
    if layout.list_index {
        core.skip(1)?;
    }

    for _ in 0..MAX_LIST_NAMES {
        let name = core.take_cstr_unbounded()?;
        if name.is_empty() {
            break;
        }

        if is_bsp(name) {
            let path = decode_windows1252(name);
            log::trace!("found map {} in model list", path);
            state.map_file_path = Some(path);
            return Ok(());
        }
    }

    if layout.list_index {
        core.skip(1)?;
    }

    Ok(())
}

fn sound_list(core: &mut CoreParser, layout: MessageLayout) -> Result<(), ParseError> {
    if layout.list_index {
        core.skip(1)?;
    }

    for _ in 0..MAX_LIST_NAMES {
        if core.take_cstr_unbounded()?.is_empty() {
            break;
        }
    }

    if layout.list_index {
        core.skip(1)?;
    }

    Ok(())
}

fn message_name(tag: u8) -> &'static str {
    match tag {
        SVC_SERVERINFO => "server info",
        SVC_CDTRACK => "cd track",
        SVC_STUFFTEXT => "stuff text",
        SVC_MODELLIST => "model list",
        SVC_SOUNDLIST => "sound list",
        _ => "message",
    }
}
