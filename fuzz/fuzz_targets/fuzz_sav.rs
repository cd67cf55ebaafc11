#![no_main]
use libfuzzer_sys::fuzz_target;
use oaksave::OakFile;

fuzz_target!(|data: &[u8]| {
    // Parse the save from arbitrary bytes
    let Ok(file) = OakFile::from_slice(data) else {
        return;
    };

    // Anything that parses must re-serialize to the exact input bytes
    let mut out = Vec::new();
    file.write_to(&mut out).unwrap();
    assert_eq!(out, data);

    // And survive another decode unchanged
    let reparsed = OakFile::from_slice(&out).unwrap();
    assert_eq!(reparsed, file);
});
