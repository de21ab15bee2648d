//! Fuzz target for line classification
//!
//! Feeds arbitrary input to the factory and checks that anything it
//! accepts formats to a line it accepts again.

#![no_main]

use libfuzzer_sys::fuzz_target;
use slirc_session::{MessageFactory, MAX_LINE_LEN};
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    let Ok(input) = str::from_utf8(data) else {
        return;
    };

    let factory = MessageFactory::new();
    let Ok(message) = factory.classify_and_parse(input) else {
        return;
    };

    let formatted = message.format();
    if formatted.len() <= MAX_LINE_LEN && !formatted.contains(['\r', '\n', '\0']) {
        let _ = factory.classify_and_parse(&formatted);
    }
});
