use crate::{Error, ErrorKind};

#[inline]
fn get_split<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    let (head, rest) = data.split_first_chunk::<N>()?;
    Some((*head, rest))
}

#[inline]
fn take_u16(data: &[u8]) -> Option<(u16, &[u8])> {
    let (head, rest) = get_split::<2>(data)?;
    Some((u16::from_le_bytes(head), rest))
}

#[inline]
fn take_u32(data: &[u8]) -> Option<(u32, &[u8])> {
    let (head, rest) = get_split::<4>(data)?;
    Some((u32::from_le_bytes(head), rest))
}

/// Forward cursor over a byte slice that keeps absolute offsets for errors
pub(crate) struct SliceReader<'a> {
    data: &'a [u8],
    original_length: usize,
}

impl<'a> SliceReader<'a> {
    #[inline]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        SliceReader {
            data,
            original_length: data.len(),
        }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.original_length - self.data.len()
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn eof(&self) -> Error {
        Error::new(ErrorKind::Eof {
            offset: self.position(),
        })
    }

    #[inline]
    pub(crate) fn read_u16(&mut self) -> Result<u16, Error> {
        let (result, rest) = take_u16(self.data).ok_or_else(|| self.eof())?;
        self.data = rest;
        Ok(result)
    }

    #[inline]
    pub(crate) fn read_u32(&mut self) -> Result<u32, Error> {
        let (result, rest) = take_u32(self.data).ok_or_else(|| self.eof())?;
        self.data = rest;
        Ok(result)
    }

    #[inline]
    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let (result, rest) = get_split::<N>(self.data).ok_or_else(|| self.eof())?;
        self.data = rest;
        Ok(result)
    }

    #[inline]
    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let data = self.data;
        if len > data.len() {
            return Err(self.eof());
        }
        let (result, rest) = data.split_at(len);
        self.data = rest;
        Ok(result)
    }

    /// Reads a length prefixed, nul terminated string.
    ///
    /// A zero length prefix denotes an absent string and a prefix of one
    /// denotes an empty string carrying only its terminator.
    pub(crate) fn read_string(&mut self) -> Result<Option<String>, Error> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(None);
        }

        let start = self.position();
        let data = self.read_bytes(len)?;
        if data[len - 1] != 0 {
            return Err(Error::new(ErrorKind::UnterminatedString { offset: start }));
        }

        let text = std::str::from_utf8(&data[..len - 1])
            .map_err(|source| Error::new(ErrorKind::InvalidUtf8 { offset: start, source }))?;
        Ok(Some(String::from(text)))
    }
}
