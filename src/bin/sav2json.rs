//! Print the header of a save file as JSON.

use oaksave::OakFile;
use std::error;
use std::fs;
use std::io;

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.sav>", args[0]);
        std::process::exit(1);
    }

    let data = fs::read(&args[1])?;
    let file = OakFile::from_slice(&data)?;

    let stdout = io::stdout().lock();
    serde_json::to_writer_pretty(stdout, file.header())?;
    println!();

    Ok(())
}
