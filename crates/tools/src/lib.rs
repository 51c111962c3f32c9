pub mod substr;

pub use substr::{
    Substring, SubstringFn, byte_offset_of_char, char_len, char_substring, grapheme_substring,
};
