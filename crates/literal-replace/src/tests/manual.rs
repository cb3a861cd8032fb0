use alloc::vec::Vec;

use rstest::rstest;

use crate::{
    BudgetedScratch, ReplaceError, ReplaceOptions, ScratchSizing, SubstringReplacer,
    count_occurrences, occurrences, output_len, replace_all, replace_all_str,
};

#[rstest]
#[case::single_word("hello world", "world", "there", "hello there")]
#[case::each_match_expands("aaa", "a", "bb", "bbbbbb")]
#[case::matches_do_not_overlap("aaaa", "aa", "a", "aa")]
#[case::odd_tail_is_copied("aaaaa", "aa", "b", "bba")]
#[case::inserted_text_not_rescanned("a", "a", "aa", "aa")]
#[case::replacement_contains_pattern("xax", "a", "aaa", "xaaax")]
#[case::deletion("a-b-c", "-", "", "abc")]
#[case::no_match("abc", "d", "x", "abc")]
#[case::pattern_longer_than_text("ab", "abc", "x", "ab")]
#[case::whole_text("abc", "abc", "", "")]
#[case::empty_text("", "a", "b", "")]
#[case::case_sensitive("Aa", "a", "b", "Ab")]
#[case::partial_prefix_then_match("aab", "ab", "X", "aX")]
#[case::utf8("naïve café", "é", "e", "naïve cafe")]
fn replaces_documented_cases(
    #[case] text: &str,
    #[case] pattern: &str,
    #[case] replacement: &str,
    #[case] expected: &str,
    #[values(ScratchSizing::Exact, ScratchSizing::Doubled)] scratch_sizing: ScratchSizing,
) {
    let mut replacer = SubstringReplacer::new(ReplaceOptions {
        scratch_sizing,
        ..Default::default()
    });
    assert_eq!(
        replacer.replace_all_str(text, pattern, replacement).unwrap(),
        expected
    );
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("\u{1F600}")]
fn empty_pattern_is_rejected(#[case] text: &str) {
    assert_eq!(replace_all_str(text, "", "x"), Err(ReplaceError::EmptyPattern));
    assert_eq!(output_len(text.as_bytes(), b"", b"x"), Err(ReplaceError::EmptyPattern));
    assert!(ReplaceError::EmptyPattern.is_silent_noop());
}

#[test]
fn occurrences_skip_consumed_bytes() {
    let found: Vec<usize> = occurrences(b"abababa", b"aba").collect();
    assert_eq!(found, [0, 4]);
    assert_eq!(count_occurrences(b"abababa", b"aba"), 2);
    assert_eq!(occurrences(b"abc", b"").count(), 0);

    let mut iter = occurrences(b"xxab", b"ab");
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.cursor(), 4);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn output_len_is_exact() {
    assert_eq!(output_len(b"aaa", b"a", b"bb"), Ok(6));
    assert_eq!(output_len(b"aaaa", b"aa", b"a"), Ok(2));
    assert_eq!(output_len(b"a-b", b"-", b""), Ok(2));
    assert_eq!(output_len(b"abc", b"z", b"long"), Ok(3));
}

#[test]
fn binary_bytes_are_matched_ordinally() {
    let out = replace_all(b"\x00\xFF\x00\xFF", b"\xFF\x00", b"-").unwrap();
    assert_eq!(out, b"\x00-\xFF".as_slice());
}

#[test]
fn doubled_sizing_accepts_growth_up_to_twice_the_input() {
    let mut replacer = SubstringReplacer::new(ReplaceOptions {
        scratch_sizing: ScratchSizing::Doubled,
        ..Default::default()
    });
    assert_eq!(replacer.replace_all(b"aaa", b"a", b"bb").unwrap(), "bbbbbb");
}

// Growth past twice the input overflowed the legacy routine's scratch; it must
// be refused, not silently produce text.
#[test]
fn doubled_sizing_rejects_growth_past_twice_the_input() {
    let mut replacer = SubstringReplacer::new(ReplaceOptions {
        scratch_sizing: ScratchSizing::Doubled,
        ..Default::default()
    });
    let err = replacer.replace_all(b"aaa", b"a", b"bbb").unwrap_err();
    assert_eq!(
        err,
        ReplaceError::CapacityExceeded {
            required: 9,
            capacity: 6
        }
    );
    assert!(!err.is_silent_noop());

    let err = replacer.replace_all(b"", b"", b"x").unwrap_err();
    assert_eq!(err, ReplaceError::EmptyPattern);
}

#[test]
fn exact_sizing_handles_any_growth() {
    let text = "ab".repeat(100);
    let out = replace_all_str(&text, "a", &"z".repeat(50)).unwrap();
    assert_eq!(out.len(), 100 * 51);
    assert!(out.starts_with(&"z".repeat(50)));
    assert!(out.ends_with("zb"));
}

#[test]
fn output_ceiling_is_enforced() {
    for scratch_sizing in [ScratchSizing::Exact, ScratchSizing::Doubled] {
        let mut replacer = SubstringReplacer::new(ReplaceOptions {
            scratch_sizing,
            max_output_len: Some(4),
        });
        assert_eq!(replacer.replace_all(b"ab", b"a", b"xyz").unwrap(), "xyzb");
        assert_eq!(
            replacer.replace_all(b"aab", b"a", b"xy").unwrap_err(),
            ReplaceError::CapacityExceeded {
                required: 5,
                capacity: 4
            },
            "{scratch_sizing:?}"
        );
    }
}

#[test]
fn refused_scratch_is_reported() {
    let mut replacer =
        SubstringReplacer::with_allocator(BudgetedScratch::new(4), ReplaceOptions::default());
    assert_eq!(replacer.replace_all(b"abcd", b"b", b"B").unwrap(), "aBcd");

    let err = replacer.replace_all(b"abcd", b"b", b"BB").unwrap_err();
    assert_eq!(err, ReplaceError::AllocationFailed { requested: 5 });
    assert!(err.is_silent_noop());
}

#[test]
fn allocator_can_be_borrowed() {
    let mut budget = BudgetedScratch::new(16);
    let mut replacer = SubstringReplacer::with_allocator(&mut budget, ReplaceOptions::default());
    assert_eq!(replacer.replace_all(b"x.y", b".", b"::").unwrap(), "x::y");
    assert_eq!(replacer.options(), &ReplaceOptions::default());
}
