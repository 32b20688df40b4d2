#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    author: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let tokens = bibsearch::utils::tokenize(input.text);
    assert_eq!(tokens.len(), bibsearch::utils::token_count(input.text));
    assert!(tokens.iter().all(|t| !t.is_empty()));

    for part in bibsearch::utils::split_authors(input.author) {
        assert!(!part.is_empty());
    }
});
