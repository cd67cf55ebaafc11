use crate::header::SaveHeader;
use crate::reader::SliceReader;
use crate::{cipher, Error, ErrorKind};
use std::convert::TryFrom;
use std::io::{Read, Write};

/// A parsed save file: the header plus the decrypted payload
///
/// Parsing decrypts the payload once up front and writing encrypts a copy, so
/// in between the payload can be read and edited as plaintext:
///
/// ```
/// use oaksave::OakFile;
///
/// # fn main() -> Result<(), oaksave::Error> {
/// # let mut data = Vec::new();
/// # OakFile::new(Default::default(), b"level: 40".to_vec()).write_to(&mut data)?;
/// let mut file = OakFile::from_slice(&data)?;
/// assert_eq!(file.payload(), b"level: 40");
///
/// file.payload_mut()[7..].copy_from_slice(b"72");
/// let mut out = Vec::new();
/// file.write_to(&mut out)?;
/// assert_eq!(file.payload(), b"level: 72");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OakFile {
    header: SaveHeader,
    payload: Vec<u8>,
}

impl OakFile {
    /// Creates a save file from a header and a plaintext payload
    pub fn new(header: SaveHeader, payload: Vec<u8>) -> Self {
        OakFile { header, payload }
    }

    /// Parses a save file from a byte slice
    ///
    /// The input must contain exactly one save: leftover bytes after the
    /// declared payload are rejected rather than silently dropped.
    pub fn from_slice(data: &[u8]) -> Result<Self, Error> {
        let mut reader = SliceReader::new(data);
        let header = SaveHeader::parse(&mut reader)?;

        let len = reader.read_u32()? as usize;
        let body = reader.read_bytes(len)?;
        let count = reader.remaining();
        if count != 0 {
            return Err(Error::new(ErrorKind::TrailingData { count }));
        }

        let mut payload = body.to_vec();
        cipher::decrypt(&mut payload);
        Ok(OakFile { header, payload })
    }

    /// Parses a save file by reading a source to its end
    pub fn from_reader<R>(mut reader: R) -> Result<Self, Error>
    where
        R: Read,
    {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        OakFile::from_slice(&data)
    }

    /// Returns the header
    pub fn header(&self) -> &SaveHeader {
        &self.header
    }

    /// Returns the header for modification
    pub fn header_mut(&mut self) -> &mut SaveHeader {
        &mut self.header
    }

    /// Returns the decrypted payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the decrypted payload for in place edits
    ///
    /// The payload may grow or shrink; its length prefix is recomputed on
    /// write.
    pub fn payload_mut(&mut self) -> &mut Vec<u8> {
        &mut self.payload
    }

    /// Replaces the payload
    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }

    /// Consumes the save file and returns the decrypted payload
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Writes the save file to a writer in the save file format
    ///
    /// Encryption happens on a copy of the payload, leaving `self` untouched,
    /// so repeated writes produce identical bytes.
    pub fn write_to<W>(&self, mut writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        self.header.write(&mut writer)?;

        let len = u32::try_from(self.payload.len()).map_err(|_| {
            Error::new(ErrorKind::TooLong {
                field: "payload",
                len: self.payload.len(),
            })
        })?;
        let mut body = self.payload.clone();
        cipher::encrypt(&mut body);

        writer.write_all(&len.to_le_bytes())?;
        writer.write_all(&body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CustomFormatEntry, EngineVersion, SaveGuid};

    fn sample_file() -> OakFile {
        let header = SaveHeader {
            save_version: 2,
            package_version: 522,
            engine: EngineVersion {
                major: 4,
                minor: 26,
                patch: 2,
                build: 24283,
            },
            build_id: Some(String::from("OAK-PATCHWIN64-230")),
            format_version: 2,
            custom_formats: vec![CustomFormatEntry {
                guid: SaveGuid::new(*b"#(\x99]S\x12@\xf0\x86\x11cNU\x18\x02\xaa"),
                value: 4,
            }],
            save_type: Some(String::from("OakSaveGame")),
        };
        OakFile::new(header, b"a payload long enough to cross the feedback window".to_vec())
    }

    #[test]
    fn test_round_trip() {
        let file = sample_file();
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        let parsed = OakFile::from_slice(&out).unwrap();
        assert_eq!(parsed, file);
        assert_eq!(
            parsed.payload(),
            b"a payload long enough to cross the feedback window"
        );
    }

    #[test]
    fn test_write_does_not_disturb_payload() {
        let file = sample_file();
        let mut first = Vec::new();
        file.write_to(&mut first).unwrap();
        assert_eq!(
            file.payload(),
            b"a payload long enough to cross the feedback window"
        );

        let mut second = Vec::new();
        file.write_to(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payload_is_stored_encrypted() {
        let file = sample_file();
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        let tail = &out[out.len() - file.payload().len()..];
        assert_ne!(tail, file.payload());
    }

    #[test]
    fn test_payload_can_be_resized() {
        let file = sample_file();
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        let mut reparsed = OakFile::from_slice(&out).unwrap();
        reparsed.payload_mut().extend_from_slice(b" and then some");
        let mut grown = Vec::new();
        reparsed.write_to(&mut grown).unwrap();

        let parsed = OakFile::from_slice(&grown).unwrap();
        assert_eq!(
            parsed.payload(),
            b"a payload long enough to cross the feedback window and then some".as_slice()
        );
    }

    #[test]
    fn test_trailing_data_rejected() {
        let file = sample_file();
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        out.push(0);
        let err = OakFile::from_slice(&out).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TrailingData { count: 1 }));
    }

    #[test]
    fn test_empty_payload() {
        let file = OakFile::new(SaveHeader::default(), Vec::new());
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        let parsed = OakFile::from_slice(&out).unwrap();
        assert_eq!(parsed.payload(), b"");
    }

    #[test]
    fn test_truncated_payload() {
        let file = sample_file();
        let mut out = Vec::new();
        file.write_to(&mut out).unwrap();

        out.truncate(out.len() - 1);
        let err = OakFile::from_slice(&out).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Eof { .. }));
    }

    #[test]
    fn test_io_errors_surface() {
        struct Failing;

        impl std::io::Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "boom",
                ))
            }
        }

        let err = OakFile::from_reader(Failing).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Io(_)));
    }
}
