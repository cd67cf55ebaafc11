/*!

A parser and writer for the GVAS save containers of
[Borderlands 3](https://en.wikipedia.org/wiki/Borderlands_3) and Tiny Tina's
Wonderlands.

PC saves for both games share one envelope: a plain header listing engine and
format versions, followed by a payload obfuscated with a self-feeding xor
stream. This library decodes that envelope into plaintext, lets the payload be
edited as bytes, and re-serializes saves the game accepts.

## Features

- ✔ Byte exact: a decoded save re-serializes to the exact bytes it came from
- ✔ Small: compiles with zero required dependencies
- ✔ Safe: fuzzed decoder, hostile length prefixes cannot drive allocations
- ✔ Agnostic: the payload stays opaque bytes, usable with any protobuf tooling

## Quick Start

```rust
use oaksave::OakFile;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
# let mut input = Vec::new();
# let mut sample = oaksave::SaveHeader::default();
# sample.engine = oaksave::EngineVersion { major: 4, minor: 26, patch: 2, build: 24283 };
# sample.save_type = Some("OakSaveGame".to_string());
# OakFile::new(sample, b"character data".to_vec()).write_to(&mut input)?;
let file = OakFile::from_slice(&input)?;
assert_eq!(file.header().save_type.as_deref(), Some("OakSaveGame"));
assert_eq!(file.header().engine.to_string(), "4.26.2.24283");

// The payload is already decrypted and can be edited freely before
// re-serializing.
assert_eq!(file.payload(), b"character data");

let mut out = Vec::new();
file.write_to(&mut out)?;
assert_eq!(out, input);
# Ok(())
# }
```

## Layout

A save is laid out as below, all integers little endian:

| field            | size          | notes                                  |
|------------------|---------------|----------------------------------------|
| magic            | 4             | `GVAS`                                 |
| save version     | 4             |                                        |
| package version  | 4             |                                        |
| engine version   | 2 + 2 + 2 + 4 | major, minor, patch, build             |
| build id         | varies        | length prefixed string                 |
| format version   | 4             |                                        |
| custom formats   | 4 + 20n       | count, then (guid, value) entries      |
| save type        | varies        | length prefixed string                 |
| payload          | 4 + n         | length, then encrypted bytes           |

String fields distinguish absent from empty: a zero length prefix means the
string is absent, while a prefix of one is an empty string followed by its nul
terminator. Non-empty strings are utf-8 with the terminator included in the
length.

## Caveats

Caller is responsible for:

- Decoding the payload, which is protobuf for both supported games
- Fixing up any checksums or items the game validates beyond the envelope
- Console saves, which wrap this format differently

*/

pub mod cipher;
mod errors;
mod file;
mod header;
mod reader;

pub use self::errors::{Error, ErrorKind};
pub use self::file::OakFile;
pub use self::header::{
    CustomFormatEntry, EngineVersion, ParseGuidError, SaveGuid, SaveHeader, MAGIC,
};
