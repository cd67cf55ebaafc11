use crate::reader::SliceReader;
use crate::{Error, ErrorKind};
use std::convert::TryFrom;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// The four byte tag that opens every save file
pub const MAGIC: [u8; 4] = *b"GVAS";

/// Bytes occupied by one custom format table entry
const CUSTOM_FORMAT_LEN: usize = 16 + 4;

/// A raw 16 byte identifier from the custom format table
///
/// Guids are opaque at this layer: they are compared byte for byte and echoed
/// verbatim on write, never decoded into endian sensitive components.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveGuid([u8; 16]);

impl SaveGuid {
    /// Creates a guid from its raw bytes
    #[inline]
    pub const fn new(bytes: [u8; 16]) -> Self {
        SaveGuid(bytes)
    }

    /// Returns the raw bytes of the guid
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<[u8; 16]> for SaveGuid {
    fn from(bytes: [u8; 16]) -> Self {
        SaveGuid(bytes)
    }
}

impl fmt::Display for SaveGuid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SaveGuid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SaveGuid({})", self)
    }
}

impl FromStr for SaveGuid {
    type Err = ParseGuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseGuidError);
        }

        let mut bytes = [0u8; 16];
        for (dst, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            let hi = (pair[0] as char).to_digit(16).ok_or(ParseGuidError)?;
            let lo = (pair[1] as char).to_digit(16).ok_or(ParseGuidError)?;
            *dst = (hi as u8) << 4 | lo as u8;
        }
        Ok(SaveGuid(bytes))
    }
}

/// An error when a string is not 32 hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseGuidError;

impl fmt::Display for ParseGuidError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected a guid of 32 hex digits")
    }
}

impl std::error::Error for ParseGuidError {}

/// The engine version recorded in a save header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u32,
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// One entry of the header's custom format table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CustomFormatEntry {
    pub guid: SaveGuid,
    pub value: u32,
}

/// Everything in a save file before the encrypted payload
///
/// All fields are plain data: none of them carry invariants beyond their
/// types, so they are exposed directly for modification. The custom format
/// table length prefix is recomputed from `custom_formats` on write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SaveHeader {
    pub save_version: u32,
    pub package_version: u32,
    pub engine: EngineVersion,
    pub build_id: Option<String>,
    pub format_version: u32,
    pub custom_formats: Vec<CustomFormatEntry>,
    pub save_type: Option<String>,
}

impl SaveHeader {
    /// Creates a SaveHeader by parsing the front of a byte slice
    ///
    /// Bytes past the header are ignored, so this can cheaply identify a save
    /// without touching its payload.
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        let mut reader = SliceReader::new(data);
        SaveHeader::parse(&mut reader)
    }

    pub(crate) fn parse(reader: &mut SliceReader) -> Result<Self, Error> {
        let magic = reader.read_array::<4>()?;
        if magic != MAGIC {
            return Err(Error::new(ErrorKind::Magic { found: magic }));
        }

        let save_version = reader.read_u32()?;
        let package_version = reader.read_u32()?;
        let engine = EngineVersion {
            major: reader.read_u16()?,
            minor: reader.read_u16()?,
            patch: reader.read_u16()?,
            build: reader.read_u32()?,
        };
        let build_id = reader.read_string()?;
        let format_version = reader.read_u32()?;

        let count = reader.read_u32()? as usize;
        // A hostile count must not drive the allocation; every entry needs at
        // least CUSTOM_FORMAT_LEN bytes of input to parse.
        let bounded = count.min(reader.remaining() / CUSTOM_FORMAT_LEN);
        let mut custom_formats = Vec::with_capacity(bounded);
        for _ in 0..count {
            let guid = SaveGuid::new(reader.read_array::<16>()?);
            let value = reader.read_u32()?;
            custom_formats.push(CustomFormatEntry { guid, value });
        }

        let save_type = reader.read_string()?;

        Ok(SaveHeader {
            save_version,
            package_version,
            engine,
            build_id,
            format_version,
            custom_formats,
            save_type,
        })
    }

    /// Writes the header to a writer in the save file format
    pub fn write<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        writer.write_all(&MAGIC)?;
        writer.write_all(&self.save_version.to_le_bytes())?;
        writer.write_all(&self.package_version.to_le_bytes())?;
        writer.write_all(&self.engine.major.to_le_bytes())?;
        writer.write_all(&self.engine.minor.to_le_bytes())?;
        writer.write_all(&self.engine.patch.to_le_bytes())?;
        writer.write_all(&self.engine.build.to_le_bytes())?;
        write_string(&mut writer, "build id", self.build_id.as_deref())?;
        writer.write_all(&self.format_version.to_le_bytes())?;

        let count = u32::try_from(self.custom_formats.len()).map_err(|_| {
            Error::new(ErrorKind::TooLong {
                field: "custom format table",
                len: self.custom_formats.len(),
            })
        })?;
        writer.write_all(&count.to_le_bytes())?;
        for entry in &self.custom_formats {
            writer.write_all(entry.guid.as_bytes())?;
            writer.write_all(&entry.value.to_le_bytes())?;
        }

        write_string(&mut writer, "save type", self.save_type.as_deref())?;
        Ok(())
    }
}

/// Writes a length prefixed, nul terminated string.
///
/// Absent strings become a zero length prefix and empty strings a prefix of
/// one followed by the terminator, mirroring how they are read.
fn write_string<W>(mut writer: W, field: &'static str, value: Option<&str>) -> Result<(), Error>
where
    W: Write,
{
    let text = match value {
        Some(text) => text,
        None => {
            writer.write_all(&0u32.to_le_bytes())?;
            return Ok(());
        }
    };

    let len = u32::try_from(text.len() + 1).map_err(|_| {
        Error::new(ErrorKind::TooLong {
            field,
            len: text.len(),
        })
    })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(text.as_bytes())?;
    writer.write_all(&[0])?;
    Ok(())
}

#[cfg(feature = "serde")]
mod ser {
    use super::SaveGuid;
    use serde::{Serialize, Serializer};

    impl Serialize for SaveGuid {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header_data() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"GVAS");
        data.extend_from_slice(&[0x02, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x03, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x04, 0x00, 0x1b, 0x00, 0x02, 0x00]);
        data.extend_from_slice(&[0x34, 0x12, 0x00, 0x00]);
        data.extend_from_slice(&[0x04, 0x00, 0x00, 0x00, b'O', b'A', b'K', 0x00]);
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ]);
        data.extend_from_slice(&[0x07, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00, 0x00]);
        data
    }

    #[test]
    fn test_save_header() {
        let data = sample_header_data();
        let header = SaveHeader::from_slice(&data).unwrap();

        assert_eq!(header.save_version, 2);
        assert_eq!(header.package_version, 3);
        assert_eq!(
            header.engine,
            EngineVersion {
                major: 4,
                minor: 27,
                patch: 2,
                build: 4660,
            }
        );
        assert_eq!(header.engine.to_string(), "4.27.2.4660");
        assert_eq!(header.build_id.as_deref(), Some("OAK"));
        assert_eq!(header.format_version, 1);
        assert_eq!(header.custom_formats.len(), 1);
        assert_eq!(
            header.custom_formats[0].guid.to_string(),
            "000102030405060708090a0b0c0d0e0f"
        );
        assert_eq!(header.custom_formats[0].value, 7);
        assert_eq!(header.save_type.as_deref(), Some(""));

        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_save_header_ignores_trailing_bytes() {
        let mut data = sample_header_data();
        let expected = SaveHeader::from_slice(&data).unwrap();
        data.extend_from_slice(b"payload to come");
        let header = SaveHeader::from_slice(&data).unwrap();
        assert_eq!(header, expected);
    }

    #[test]
    fn test_magic_mismatch() {
        let data = b"SAVE\x02\x00\x00\x00";
        let err = SaveHeader::from_slice(&data[..]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Magic {
                found: [b'S', b'A', b'V', b'E']
            }
        ));
    }

    #[test]
    fn test_short_input_is_eof_not_magic() {
        let err = SaveHeader::from_slice(b"GV").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Eof { offset: 0 }));
    }

    #[test]
    fn test_entry_count_round_trips() {
        let mut header = SaveHeader::default();
        for i in 0..57u8 {
            header.custom_formats.push(CustomFormatEntry {
                guid: SaveGuid::new([i; 16]),
                value: u32::from(i),
            });
        }

        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        let parsed = SaveHeader::from_slice(&out).unwrap();
        assert_eq!(parsed.custom_formats.len(), 57);
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_forged_entry_count_does_not_allocate() {
        let mut data = Vec::new();
        data.extend_from_slice(b"GVAS");
        data.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x04, 0x00, 0x14, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
        let err = SaveHeader::from_slice(&data).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Eof { .. }));
    }

    #[test]
    fn test_guid_from_str() {
        let guid: SaveGuid = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
        assert_eq!(
            guid.as_bytes(),
            &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
        );

        let upper: SaveGuid = "1D72E5D4A4C34B5A8F20E3C1B79D8E4F".parse().unwrap();
        assert_eq!(upper.to_string(), "1d72e5d4a4c34b5a8f20e3c1b79d8e4f");

        assert!("".parse::<SaveGuid>().is_err());
        assert!("1234".parse::<SaveGuid>().is_err());
        assert!("zz0102030405060708090a0b0c0d0e0f".parse::<SaveGuid>().is_err());
        assert!("000102030405060708090a0b0c0d0e0f00".parse::<SaveGuid>().is_err());
    }

    #[test]
    fn test_write_string_encodings() {
        let mut out = Vec::new();
        write_string(&mut out, "field", None).unwrap();
        assert_eq!(out, [0x00, 0x00, 0x00, 0x00]);

        let mut out = Vec::new();
        write_string(&mut out, "field", Some("")).unwrap();
        assert_eq!(out, [0x01, 0x00, 0x00, 0x00, 0x00]);

        let mut out = Vec::new();
        write_string(&mut out, "field", Some("AB")).unwrap();
        assert_eq!(out, [0x03, 0x00, 0x00, 0x00, b'A', b'B', 0x00]);
    }
}
