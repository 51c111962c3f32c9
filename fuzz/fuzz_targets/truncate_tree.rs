#![no_main]

use core_types::ContainerId;
use libfuzzer_sys::fuzz_target;
use markup::parse_fragment;
use truncate::{Indicator, TruncationState, WordBoundaries, truncated_copy};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let canonical = parse_fragment(input);
    let boundaries = if selector & 1 == 0 {
        WordBoundaries::Any
    } else {
        WordBoundaries::parse(" ,.")
    };
    let state = TruncationState::new(ContainerId::from_raw(1), &canonical)
        .with_word_boundaries(boundaries)
        .with_indicator(Indicator::text("~"));
    let len = state.original_text_len;
    let target = if len == 0 { 0 } else { usize::from(selector >> 1) % len };

    let before = canonical.clone();
    let (tree, cut) = truncated_copy(&canonical, &state, target);
    assert_eq!(canonical, before);

    let text = tree.text_content();
    let original = canonical.text_content();
    match cut {
        Some(cut) => {
            assert!(cut.retained <= target);
            let prefix: String = original.chars().take(cut.retained).collect();
            assert_eq!(text, format!("{prefix}~"));
        }
        None => assert_eq!(text, original),
    }
});
