//! Swap the payload of a save file with bytes from disk.
//!
//! The header of the source save is carried over unchanged and the new
//! payload is encrypted on the way out, so a payload produced by `extract`
//! and edited offline can be folded back into a working save.

use oaksave::OakFile;
use std::error;
use std::fs;

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 4 {
        eprintln!("Usage: {} <src.sav> <payload.bin> <out.sav>", args[0]);
        std::process::exit(1);
    }

    let data = fs::read(&args[1])?;
    let mut file = OakFile::from_slice(&data)?;
    file.set_payload(fs::read(&args[2])?);

    let mut out = Vec::new();
    file.write_to(&mut out)?;
    fs::write(&args[3], out)?;

    Ok(())
}
