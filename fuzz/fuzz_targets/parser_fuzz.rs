#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Split arbitrary bytes into argv words; parsing must never panic.
    let text = String::from_utf8_lossy(data);
    let args: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    oxicmp::cli::fuzz_try_parse_args(&args);
});
