#![no_main]
use latexlog::{ParseOptions, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The parser takes &str; lossy decoding keeps almost-text inputs useful.
    let s = String::from_utf8_lossy(data);
    let report = parse(&s, &ParseOptions::default().with_ignore_duplicates(data.len() % 2 == 0));
    assert!(report.all.len() >= report.errors.len() + report.warnings.len());
    let _ = report.file_paths();
});
