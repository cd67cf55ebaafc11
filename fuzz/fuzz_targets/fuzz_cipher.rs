#![no_main]
use libfuzzer_sys::fuzz_target;
use oaksave::cipher;

fuzz_target!(|data: &[u8]| {
    let mut buf = data.to_vec();
    cipher::encrypt(&mut buf);
    cipher::decrypt(&mut buf);
    assert_eq!(buf, data);

    let mut buf = data.to_vec();
    cipher::decrypt(&mut buf);
    cipher::encrypt(&mut buf);
    assert_eq!(buf, data);
});
