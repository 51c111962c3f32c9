#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{flatten, parse_fragment};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let fragment = parse_fragment(input);

    let leaves = flatten(&fragment);
    let mut offset = 0;
    for leaf in &leaves {
        assert_eq!(leaf.start, offset);
        offset = leaf.end;
    }
    assert_eq!(offset, fragment.text_len());

    let markup = fragment.to_markup();
    let reparsed = parse_fragment(&markup);
    assert_eq!(reparsed.text_content(), fragment.text_content());
    assert_eq!(reparsed.to_markup(), markup);
});
