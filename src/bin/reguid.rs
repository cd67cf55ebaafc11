//! Give a save file a fresh character guid.
//!
//! Both games store the character guid in the payload as 32 uppercase hex
//! characters and refuse to load two saves that share one, so a copied save
//! needs a new guid before the game will show it. This scans the decrypted
//! payload for that hex run, substitutes a replacement of equal length, and
//! optionally rewrites the character name the way the duplicate-save tools
//! for these games do: the last four characters of the name take the first
//! four of the new guid, keeping renamed copies distinguishable in the save
//! list. The payload structure itself stays opaque; everything here is byte
//! substitution.

use oaksave::OakFile;
use std::error;
use std::fs;

const GUID_CHARS: usize = 32;

fn main() -> Result<(), Box<dyn error::Error>> {
    let mut positional = Vec::new();
    let mut guid = None;
    let mut name = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--guid" => guid = Some(args.next().ok_or("--guid needs a value")?),
            "--name" => name = Some(args.next().ok_or("--name needs a value")?),
            _ => positional.push(arg),
        }
    }

    if positional.len() != 2 {
        eprintln!("Usage: reguid <src.sav> <out.sav> [--guid HEX32] [--name NAME]");
        std::process::exit(1);
    }

    let replacement = match guid {
        Some(hex) => {
            let hex = hex.to_uppercase();
            if hex.len() != GUID_CHARS || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err("guid must be 32 hex characters".into());
            }
            hex.into_bytes()
        }
        None => fresh_guid(),
    };

    let data = fs::read(&positional[0])?;
    let mut file = OakFile::from_slice(&data)?;

    let old = find_guid(file.payload())?.to_vec();
    println!(
        "{} -> {}",
        String::from_utf8_lossy(&old),
        String::from_utf8_lossy(&replacement)
    );
    replace_first(file.payload_mut(), &old, &replacement)?;

    if let Some(name) = name {
        if name.is_empty() {
            return Err("--name must not be empty".into());
        }
        let mut patched = name.clone().into_bytes();
        if patched.len() > 4 {
            let tail = patched.len() - 4;
            patched[tail..].copy_from_slice(&replacement[..4]);
        }
        replace_first(file.payload_mut(), name.as_bytes(), &patched)?;
    }

    let mut out = Vec::new();
    file.write_to(&mut out)?;
    fs::write(&positional[1], out)?;

    Ok(())
}

/// Generates a guid in the payload's encoding: 32 uppercase hex characters
fn fresh_guid() -> Vec<u8> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let bytes = rand::random::<[u8; 16]>();
    let mut out = Vec::with_capacity(GUID_CHARS);
    for byte in bytes {
        out.push(HEX[usize::from(byte >> 4)]);
        out.push(HEX[usize::from(byte & 0xf)]);
    }
    out
}

/// Locates the character guid: the only run of exactly 32 uppercase hex
/// characters in the payload.
fn find_guid(payload: &[u8]) -> Result<&[u8], Box<dyn error::Error>> {
    let is_guid_byte = |b: u8| b.is_ascii_digit() || (b'A'..=b'F').contains(&b);

    let mut candidates = Vec::new();
    let mut run = 0;
    for (i, &byte) in payload.iter().enumerate() {
        if is_guid_byte(byte) {
            run += 1;
        } else {
            if run == GUID_CHARS {
                candidates.push(i - GUID_CHARS);
            }
            run = 0;
        }
    }
    if run == GUID_CHARS {
        candidates.push(payload.len() - GUID_CHARS);
    }

    match candidates.as_slice() {
        [at] => Ok(&payload[*at..*at + GUID_CHARS]),
        [] => Err("no character guid found in the payload".into()),
        _ => Err(format!(
            "found {} possible character guids, refusing to guess",
            candidates.len()
        )
        .into()),
    }
}

/// Replaces the first occurrence of `needle` with a value of equal length
fn replace_first(
    payload: &mut [u8],
    needle: &[u8],
    replacement: &[u8],
) -> Result<(), Box<dyn error::Error>> {
    if needle.len() != replacement.len() {
        return Err("replacement length differs from the original".into());
    }

    match payload.windows(needle.len()).position(|w| w == needle) {
        Some(at) => {
            payload[at..at + needle.len()].copy_from_slice(replacement);
            Ok(())
        }
        None => Err(format!(
            "did not find '{}' in the payload",
            String::from_utf8_lossy(needle)
        )
        .into()),
    }
}
