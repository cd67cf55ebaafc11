//! Print the header fields of a save file.

use oaksave::OakFile;
use std::error;
use std::fs;

fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file.sav>", args[0]);
        std::process::exit(1);
    }

    let data = fs::read(&args[1])?;
    let file = OakFile::from_slice(&data)?;
    let header = file.header();

    println!("Savegame version: {}", header.save_version);
    println!("Package version: {}", header.package_version);
    println!("Engine version: {}", header.engine);
    println!("Build id: {}", header.build_id.as_deref().unwrap_or("(none)"));
    println!("Custom format version: {}", header.format_version);
    println!("Custom format entries: {}", header.custom_formats.len());
    for entry in &header.custom_formats {
        println!(" - {}: {}", entry.guid, entry.value);
    }
    println!("Savegame type: {}", header.save_type.as_deref().unwrap_or("(none)"));
    println!("Payload bytes: {}", file.payload().len());

    Ok(())
}
