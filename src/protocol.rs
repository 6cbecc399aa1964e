//! Protocol numbers, tags and the field layouts that vary between QuakeWorld versions.

/// NetQuake single player protocol
pub const PROTOCOL_NETQUAKE: i32 = 15;

/// FitzQuake single player protocol
pub const PROTOCOL_FITZQUAKE: i32 = 666;

/// RMQ single player protocol, which sends an additional int32 of protocol flags
pub const PROTOCOL_RMQ: i32 = 999;

/// The QuakeWorld protocol versions that have been released
pub static PROTOCOLS_QW: phf::Set<i32> = phf::phf_set! { 24i32, 25i32, 26i32, 27i32, 28i32 };

pub const GAME_COOP: u8 = 0;
pub const GAME_DEATHMATCH: u8 = 1;

pub const MAX_CLIENTS: u8 = 16;

pub const BLOCK_CLIENT: u8 = 0;
pub const BLOCK_SERVER: u8 = 1;
pub const BLOCK_FRAME: u8 = 2;

/// Marks a connectionless QWD server block
pub const CONNECTIONLESS: u32 = u32::MAX;

pub const SVC_STUFFTEXT: u8 = 9;
pub const SVC_SERVERINFO: u8 = 11;
pub const SVC_CDTRACK: u8 = 32;
pub const SVC_MODELLIST: u8 = 45;
pub const SVC_SOUNDLIST: u8 = 46;

/// Longest CD track number preceding a single player demo
pub const MAX_CD_TRACK_LEN: usize = 13;

/// Longest console command sent through stuff text
pub const MAX_STUFFTEXT_LEN: usize = 2048;

/// Most names a single model or sound list may carry
pub const MAX_LIST_NAMES: usize = 256;

pub fn is_sp_protocol(protocol: i32) -> bool {
    matches!(
        protocol,
        PROTOCOL_NETQUAKE | PROTOCOL_FITZQUAKE | PROTOCOL_RMQ
    )
}

pub fn is_qw_protocol(protocol: i32) -> bool {
    PROTOCOLS_QW.contains(&protocol)
}

/// Fields of the QuakeWorld message stream that only exist in some protocol versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageLayout {
    /// Model and sound lists are wrapped by a leading start index and a trailing next index
    pub list_index: bool,

    /// Server info ends with ten movement floats
    pub trailing_floats: bool,
}

impl MessageLayout {
    pub const TRAILING_FLOATS_LEN: usize = 40;
}

pub fn layout_for(protocol: i32) -> MessageLayout {
    MessageLayout {
        list_index: protocol > 25,
        trailing_floats: protocol > 24,
    }
}
