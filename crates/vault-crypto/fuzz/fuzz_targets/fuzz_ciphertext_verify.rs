//! Fuzz target for ciphertext decoding and authentication.
//!
//! Feeds arbitrary bytes (raw and as hex text) through the same decode path
//! the gateway runs on write items.
//!
//! ## Running
//!
//! ```bash
//! cd crates/vault-crypto
//! cargo +nightly fuzz run fuzz_ciphertext_verify
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use vault_crypto::test_helpers::{generate_dealer_key, DealerKey};
use vault_crypto::Ciphertext;

static DEALER: OnceLock<DealerKey> = OnceLock::new();

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    /// Treat `data` as hex text instead of raw ciphertext bytes
    as_hex: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let dealer = DEALER.get_or_init(|| generate_dealer_key(3, 2));

    let bytes = if input.as_hex {
        match std::str::from_utf8(&input.data).ok().and_then(|s| hex::decode(s).ok()) {
            Some(bytes) => bytes,
            None => return,
        }
    } else {
        input.data
    };

    // Must never panic, whatever the input
    let verified = Ciphertext::unmarshal_verify(&bytes, &dealer.public_key);
    let parsed = Ciphertext::unmarshal(&bytes);

    // Verification implies a structurally valid parse
    if verified.is_ok() {
        assert!(parsed.is_ok());
    }

    // Deterministic
    assert_eq!(
        verified.is_ok(),
        Ciphertext::unmarshal_verify(&bytes, &dealer.public_key).is_ok()
    );
});
