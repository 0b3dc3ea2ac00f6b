//! Property tests for the encode/decode laws.

use super::Tokenizer;
use proptest::prelude::*;
use std::sync::OnceLock;

/// One tokenizer trained on a fixed corpus, shared across cases.
fn trained() -> &'static Tokenizer {
    static TOKENIZER: OnceLock<Tokenizer> = OnceLock::new();
    TOKENIZER.get_or_init(|| {
        let mut tokenizer = Tokenizer::builder().vocab_size(320).build().unwrap();
        tokenizer
            .train("the quick brown fox jumps over the lazy dog\nthe dog sleeps all day\nfoxes and dogs, dogs and foxes!\n")
            .unwrap();
        tokenizer
    })
}

proptest! {
    /// decode is a left inverse of encode for the model that encoded.
    #[test]
    fn prop_roundtrip(text in any::<String>()) {
        let tokenizer = trained();
        let ids = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(tokenizer.decode(&ids).unwrap(), text);
    }

    /// Merges only ever shrink or preserve length.
    #[test]
    fn prop_non_expansion(text in any::<String>()) {
        let tokenizer = trained();
        let ids = tokenizer.encode(&text).unwrap();
        prop_assert!(ids.len() <= text.len());
    }

    /// The encoding is empty exactly when the input is.
    #[test]
    fn prop_empty_iff_empty(text in any::<String>()) {
        let tokenizer = trained();
        let ids = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(ids.is_empty(), text.is_empty());
    }

    /// Every id produced by encode is inside the model's vocabulary.
    #[test]
    fn prop_encoded_ids_in_vocab(text in any::<String>()) {
        let tokenizer = trained();
        let limit = tokenizer.vocab_size() as u32;
        for id in tokenizer.encode(&text).unwrap() {
            prop_assert!(id < limit);
        }
    }
}
