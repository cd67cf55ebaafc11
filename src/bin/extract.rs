//! Decrypt a save file and write its payload to stdout.
//!
//! The output is the raw plaintext payload, ready for protobuf tooling.

use oaksave::OakFile;
use std::error;
use std::fs;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.sav>", args[0]);
        std::process::exit(1);
    }

    let data = fs::read(&args[1])?;
    let file = OakFile::from_slice(&data)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(file.payload())?;

    Ok(())
}
