use crate::charmap::CharMap;
use crate::errors::ParseError;
use crate::parsing_utils::{le_i32, le_u32};

/// Forward only cursor over a fully loaded demo. Every read is bounds checked and a read that
/// would move past the end of the data is an error rather than a panic.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreParser<'a> {
    data: &'a [u8],

    /// Current offset in regards to the whole view of the demo. Never exceeds `data.len()`
    col: usize,
}

impl<'a> CoreParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CoreParser { data, col: 0 }
    }

    pub fn bytes_read(&self) -> usize {
        self.col
    }

    /// Total length of the demo, regardless of how much has been read
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn bytes_left(&self) -> usize {
        self.data.len() - self.col
    }

    pub fn is_empty(&self) -> bool {
        self.bytes_left() == 0
    }

    fn rest(&self) -> &'a [u8] {
        &self.data[self.col..]
    }

    /// Returns a slice of the demo after ensuring there is enough space for the requested slice
    pub fn view_data(&self, size: usize) -> Result<&'a [u8], ParseError> {
        self.rest()
            .get(..size)
            .ok_or_else(|| ParseError::InsufficientData(size, self.bytes_left()))
    }

    pub fn take_data(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        let res = self.view_data(size)?;
        self.col += size;
        Ok(res)
    }

    #[inline]
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], ParseError> {
        let mut res = [0u8; N];
        res.copy_from_slice(self.take_data(N)?);
        Ok(res)
    }

    /// Used for skipping some amount of data
    pub fn skip(&mut self, size: usize) -> Result<(), ParseError> {
        self.take_data(size).map(|_| ())
    }

    pub fn take_u8(&mut self) -> Result<u8, ParseError> {
        self.take::<1>().map(|x| x[0])
    }

    pub fn take_i32(&mut self) -> Result<i32, ParseError> {
        self.take::<4>().map(le_i32)
    }

    pub fn take_u32(&mut self) -> Result<u32, ParseError> {
        self.take::<4>().map(le_u32)
    }

    /// Returns the bytes preceding the next `term` and moves past the terminator. At most `limit`
    /// bytes may come before the terminator.
    pub fn take_until(&mut self, term: u8, limit: usize) -> Result<&'a [u8], ParseError> {
        let rest = self.rest();
        let window = &rest[..rest.len().min(limit.saturating_add(1))];
        match window.iter().position(|&b| b == term) {
            Some(ind) => {
                self.col += ind + 1;
                Ok(&rest[..ind])
            }
            None if window.len() == rest.len() => {
                Err(ParseError::InsufficientData(window.len() + 1, rest.len()))
            }
            None => Err(ParseError::MissingTerminator(term, limit)),
        }
    }

    /// Null terminated string of at most `limit` bytes
    pub fn take_cstr(&mut self, limit: usize) -> Result<&'a [u8], ParseError> {
        self.take_until(0, limit)
    }

    /// Null terminated string only bounded by the end of the data
    pub fn take_cstr_unbounded(&mut self) -> Result<&'a [u8], ParseError> {
        self.take_until(0, usize::MAX)
    }

    /// Skips a decimal number (an optional leading minus followed by digits) that is ended by
    /// `term`. Surrounding ascii whitespace is tolerated.
    pub fn skip_numeral(&mut self, term: u8, limit: usize) -> Result<(), ParseError> {
        let raw = self.take_until(term, limit)?;
        let trimmed = raw.trim_ascii();
        let digits = trimmed.strip_prefix(b"-").unwrap_or(trimmed);
        if digits.iter().all(u8::is_ascii_digit) {
            Ok(())
        } else {
            Err(ParseError::InvalidCdTrack)
        }
    }

    /// Reads a null terminated map title of at most `limit` bytes, translating each byte for
    /// display. Bytes the mapping rejects are dropped instead of failing the parse.
    pub fn map_title(&mut self, limit: usize, char_map: CharMap) -> Result<String, ParseError> {
        let raw = self.take_cstr(limit)?;
        let title: String = raw.iter().filter_map(|&b| char_map(b)).collect();
        Ok(String::from(title.trim()))
    }
}
