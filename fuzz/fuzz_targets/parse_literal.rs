#![no_main]

use classforge_syntax::{parse_literal, parse_literal_prefix};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_literal(s);
        // The prefix parser must never report more bytes than it was given, or split a character.
        if let Ok((_, consumed)) = parse_literal_prefix(s) {
            assert!(consumed <= s.len());
            assert!(s.is_char_boundary(consumed));
        }
    }
});
