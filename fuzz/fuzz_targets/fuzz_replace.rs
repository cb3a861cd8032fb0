#![no_main]

use arbitrary::Arbitrary;
use bstr::ByteSlice;
use libfuzzer_sys::fuzz_target;
use literal_replace::{
    NulBuffer, ReplaceError, ReplaceOptions, ScratchSizing, SubstringReplacer,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a [u8],
    pattern: &'a [u8],
    replacement: &'a [u8],
    doubled: bool,
    spare: u8,
}

fuzz_target!(|input: Input<'_>| {
    let scratch_sizing = if input.doubled {
        ScratchSizing::Doubled
    } else {
        ScratchSizing::Exact
    };
    let mut replacer = SubstringReplacer::new(ReplaceOptions {
        scratch_sizing,
        ..Default::default()
    });

    let out = replacer.replace_all(input.text, input.pattern, input.replacement);
    if input.pattern.is_empty() {
        assert_eq!(out, Err(ReplaceError::EmptyPattern));
        return;
    }

    let expected = input.text.replace(input.pattern, input.replacement);
    match out {
        Ok(out) => assert_eq!(out, expected),
        Err(ReplaceError::CapacityExceeded { required, capacity }) => {
            assert_eq!(scratch_sizing, ScratchSizing::Doubled);
            assert_eq!(required, expected.len());
            assert!(required > capacity);
        }
        Err(err) => panic!("unexpected error: {err}"),
    }

    // In-place: storage is the text up to its first NUL, a terminator, and
    // some spare room.
    let text = input.text.split(|&b| b == 0).next().unwrap_or_default();
    let mut storage = text.to_vec();
    storage.resize(text.len() + 1 + usize::from(input.spare), 0);
    let before = storage.clone();
    let mut buffer = NulBuffer::new(&mut storage).unwrap();
    match replacer.replace_in_place(&mut buffer, input.pattern, input.replacement) {
        Ok(done) => {
            let expected = text.replace(input.pattern, input.replacement);
            assert_eq!(buffer.as_bytes(), expected.as_slice());
            assert_eq!(done.len, expected.len());
        }
        Err(ReplaceError::CapacityExceeded { .. }) => assert_eq!(storage, before),
        Err(err) => panic!("unexpected error: {err}"),
    }
});
