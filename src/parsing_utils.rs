use encoding_rs::WINDOWS_1252;

#[inline]
pub fn le_i32(d: [u8; 4]) -> i32 {
    i32::from_le_bytes(d)
}

#[inline]
pub fn le_u32(d: [u8; 4]) -> u32 {
    u32::from_le_bytes(d)
}

/// Decodes engine strings (paths, game directories). Every byte is valid windows-1252, so nothing
/// is lost for the ascii paths found in practice.
pub fn decode_windows1252(input: &[u8]) -> String {
    let (s, _) = WINDOWS_1252.decode_without_bom_handling(input);
    String::from(s)
}

/// Returns the last component of a path, accepting both the forward slashes used inside pak files
/// and the backslashes some tools write.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Case insensitive check for a `.bsp` suffix on a raw name
pub fn is_bsp(name: &[u8]) -> bool {
    name.len() >= 4 && name[name.len() - 4..].eq_ignore_ascii_case(b".bsp")
}
