//! # Concurrent Validation
//!
//! The vault service shares one validator across request handlers. These
//! tests drive it from many tokio tasks at once while the limiter policy
//! changes underneath.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use crate::init_test_tracing;
    use std::sync::Arc;
    use vault_crypto::test_helpers::generate_dealer_key;
    use vault_types::EncryptedSecret;
    use vault_validator::{
        LimitContext, LimitSettings, RequestValidator, ScopedBoundLimiter,
        SecretsRequestValidation, ValidationErrorKind,
    };

    /// Verdicts from parallel tasks match the sequential verdicts.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_verdicts_match_sequential() {
        init_test_tracing();
        let dealer = Arc::new(generate_dealer_key(4, 2));
        let validator = Arc::new(RequestValidator::new(ScopedBoundLimiter::new(
            LimitSettings::new(10),
        )));

        let requests: Vec<_> = (0..32)
            .map(|i| {
                let mut items = authentic_items(&dealer, &["a", "b"]);
                if i % 3 == 0 {
                    items.push(Some(EncryptedSecret::new(secret_id("a"), "00")));
                }
                if i % 5 == 0 {
                    items.push(None);
                }
                Arc::new(create_request(items))
            })
            .collect();

        let expected: Vec<_> = requests
            .iter()
            .map(|request| {
                validator
                    .validate_create_secrets_request(
                        &LimitContext::background(),
                        Some(&dealer.public_key),
                        request,
                    )
                    .map_err(|e| e.kind())
            })
            .collect();

        let handles: Vec<_> = requests
            .iter()
            .cloned()
            .map(|request| {
                let validator = validator.clone();
                let dealer = dealer.clone();
                tokio::spawn(async move {
                    validator
                        .validate_create_secrets_request(
                            &LimitContext::background(),
                            Some(&dealer.public_key),
                            &request,
                        )
                        .map_err(|e| e.kind())
                })
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.await.unwrap(), expected);
        }
    }

    /// Policy updates racing with validation never produce a verdict outside
    /// the two policies in play.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_policy_update_during_validation() {
        let validator = Arc::new(RequestValidator::new(ScopedBoundLimiter::new(
            LimitSettings::new(2),
        )));
        let items: Vec<_> = (0..3)
            .map(|i| Some(EncryptedSecret::new(secret_id(&format!("k{i}")), "00")))
            .collect();
        let request = Arc::new(create_request(items));

        let updater = {
            let validator = validator.clone();
            tokio::spawn(async move {
                for round in 0..100 {
                    let bound = if round % 2 == 0 { 3 } else { 2 };
                    validator.limiter().update(LimitSettings::new(bound));
                    tokio::task::yield_now().await;
                }
            })
        };

        let checkers: Vec<_> = (0..8)
            .map(|_| {
                let validator = validator.clone();
                let request = request.clone();
                tokio::spawn(async move {
                    for _ in 0..50 {
                        if let Err(e) = validator.validate_create_secrets_request(
                            &LimitContext::background(),
                            None,
                            &request,
                        ) {
                            assert_eq!(e.kind(), ValidationErrorKind::BatchSizeExceeded);
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        updater.await.unwrap();
        for checker in checkers {
            checker.await.unwrap();
        }

        // Final policy allows 2; the batch has 3.
        assert!(validator
            .validate_create_secrets_request(&LimitContext::background(), None, &request)
            .is_err());
    }
}
