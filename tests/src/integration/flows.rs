//! # Request Lifecycle Flows
//!
//! A client encrypts secrets to the vault key, submits create/update batches,
//! reads them back and deletes them. Each step goes through the validator
//! exactly as the vault service would call it.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use crate::init_test_tracing;
    use vault_crypto::test_helpers::{decrypt_with_secret, generate_dealer_key};
    use vault_crypto::Ciphertext;
    use vault_types::{EncryptedSecret, ListSecretIdentifiersRequest, MAX_BATCH_SIZE};
    use vault_validator::{
        BatchLimit, LimitContext, RequestValidator, SecretsRequestValidation, StaticBoundLimiter,
        ValidationError, ValidationErrorKind,
    };

    fn validator() -> RequestValidator<StaticBoundLimiter> {
        RequestValidator::new(StaticBoundLimiter::new(MAX_BATCH_SIZE))
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    /// Create, update, get, list and delete the same secrets in sequence.
    #[test]
    fn test_secret_lifecycle() {
        init_test_tracing();
        let dealer = generate_dealer_key(4, 3);
        let validator = validator();
        let ctx = LimitContext::for_owner(OWNER);
        let keys = ["db-password", "api-token", "tls-key"];

        let create = create_request(authentic_items(&dealer, &keys));
        assert_eq!(
            validator.validate_create_secrets_request(&ctx, Some(&dealer.public_key), &create),
            Ok(())
        );

        let update = update_request(authentic_items(&dealer, &keys[..1]));
        assert_eq!(
            validator.validate_update_secrets_request(&ctx, Some(&dealer.public_key), &update),
            Ok(())
        );

        assert_eq!(validator.validate_get_secrets_request(&get_request(&keys)), Ok(()));

        let list = ListSecretIdentifiersRequest {
            request_id: request_id(),
            owner: OWNER.to_string(),
            namespace: NAMESPACE.to_string(),
        };
        assert_eq!(validator.validate_list_secret_identifiers_request(&list), Ok(()));

        assert_eq!(
            validator.validate_delete_secrets_request(&delete_request(&keys)),
            Ok(())
        );
    }

    /// Admitted ciphertexts still decrypt to what the client sealed.
    #[test]
    fn test_admitted_ciphertext_decrypts() {
        let dealer = generate_dealer_key(3, 2);
        let plaintext = b"correct horse battery staple";
        let value = encrypted_value(&dealer, plaintext);
        let request = create_request(vec![Some(EncryptedSecret::new(secret_id("k"), &value))]);

        validator()
            .validate_create_secrets_request(
                &LimitContext::background(),
                Some(&dealer.public_key),
                &request,
            )
            .unwrap();

        let bytes = hex::decode(&value).unwrap();
        let ciphertext = Ciphertext::unmarshal_verify(&bytes, &dealer.public_key).unwrap();
        assert_eq!(
            decrypt_with_secret(&ciphertext, &dealer.secret).as_deref(),
            Some(&plaintext[..])
        );
    }

    // =============================================================================
    // KEY CACHING
    // =============================================================================

    /// A batch admitted before the key was cached is re-checked once it is.
    #[test]
    fn test_revalidation_after_key_becomes_known() {
        init_test_tracing();
        let vault = generate_dealer_key(4, 2);
        let attacker = generate_dealer_key(4, 2);
        let validator = validator();
        let ctx = LimitContext::background();

        let mut items = authentic_items(&vault, &["a", "b"]);
        items.extend(authentic_items(&attacker, &["c"]));
        let request = create_request(items);

        assert!(validator
            .validate_create_secrets_request(&ctx, None, &request)
            .is_ok());

        let err = validator
            .validate_create_secrets_request(&ctx, Some(&vault.public_key), &request)
            .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AuthenticationFailure);
        assert_eq!(err.index(), Some(2));
    }

    /// Bad hex is rejected whether or not the key is cached.
    #[test]
    fn test_undecodable_value_rejected_without_key() {
        let dealer = generate_dealer_key(3, 2);
        let mut items = authentic_items(&dealer, &["a"]);
        items.push(Some(EncryptedSecret::new(secret_id("b"), "0xdeadbeef")));
        let request = create_request(items);

        for key in [None, Some(&dealer.public_key)] {
            let err = validator()
                .validate_create_secrets_request(&LimitContext::background(), key, &request)
                .unwrap_err();
            assert!(matches!(err, ValidationError::DecodeFailure { index: 1, .. }));
        }
    }

    /// Splicing another ciphertext's nonce keeps the proof valid; the AEAD
    /// layer is only checked at decryption.
    #[test]
    fn test_spliced_nonce_passes_gateway_but_not_decryption() {
        let dealer = generate_dealer_key(3, 2);
        let victim = hex::decode(encrypted_value(&dealer, b"payload")).unwrap();
        let donor = hex::decode(encrypted_value(&dealer, b"other")).unwrap();

        let mut wire: serde_json::Value = serde_json::from_slice(&victim).unwrap();
        let donor: serde_json::Value = serde_json::from_slice(&donor).unwrap();
        wire["nonce"] = donor["nonce"].clone();
        let spliced = serde_json::to_vec(&wire).unwrap();

        let request = create_request(vec![Some(EncryptedSecret::new(
            secret_id("k"),
            hex::encode(&spliced),
        ))]);
        assert!(validator()
            .validate_create_secrets_request(
                &LimitContext::background(),
                Some(&dealer.public_key),
                &request
            )
            .is_ok());

        let parsed = Ciphertext::unmarshal(&spliced).unwrap();
        assert_eq!(decrypt_with_secret(&parsed, &dealer.secret), None);
    }

    /// Splicing the encapsulation of one ciphertext onto another label breaks
    /// the proof.
    #[test]
    fn test_relabelled_ciphertext_rejected() {
        let dealer = generate_dealer_key(3, 2);
        let original = hex::decode(encrypted_value(&dealer, b"payload")).unwrap();
        let labelled = vault_crypto::encrypt_with_label(&dealer.public_key, b"x", [7u8; 32])
            .unwrap()
            .marshal()
            .unwrap();

        let mut wire: serde_json::Value = serde_json::from_slice(&original).unwrap();
        let labelled: serde_json::Value = serde_json::from_slice(&labelled).unwrap();
        wire["tdh2_ctxt"]["label"] = labelled["tdh2_ctxt"]["label"].clone();

        let request = create_request(vec![Some(EncryptedSecret::new(
            secret_id("k"),
            hex::encode(serde_json::to_vec(&wire).unwrap()),
        ))]);
        let err = validator()
            .validate_create_secrets_request(
                &LimitContext::background(),
                Some(&dealer.public_key),
                &request,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::AuthenticationFailure);
    }

    // =============================================================================
    // BATCH BOUNDS
    // =============================================================================

    /// Writes admit exactly the limiter bound; reads and deletes stop one short.
    #[test]
    fn test_asymmetric_batch_bounds() {
        let dealer = generate_dealer_key(3, 2);
        let validator = validator();
        let ctx = LimitContext::background();
        let keys: Vec<String> = (0..MAX_BATCH_SIZE).map(|i| format!("k{i}")).collect();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();

        let create = create_request(authentic_items(&dealer, &keys));
        assert!(validator
            .validate_create_secrets_request(&ctx, Some(&dealer.public_key), &create)
            .is_ok());

        let expected = Err(ValidationError::BatchSizeExceeded {
            limit: BatchLimit::Known(MAX_BATCH_SIZE),
        });
        assert_eq!(validator.validate_get_secrets_request(&get_request(&keys)), expected);
        assert_eq!(
            validator.validate_delete_secrets_request(&delete_request(&keys)),
            expected
        );

        let mut one_more = keys.clone();
        one_more.push("extra");
        let oversized = create_request(authentic_items(&dealer, &one_more));
        assert_eq!(
            validator.validate_create_secrets_request(&ctx, Some(&dealer.public_key), &oversized),
            expected
        );
    }
}
