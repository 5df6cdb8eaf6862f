//! Shared helpers for live ARM tests

#![allow(dead_code)]

use storage_cache_provider::{ArmAccountsClient, ArmClientConfig};

/// Skip the test when any of the given environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: environment variable {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap the value (the test fails otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Build a live client from `ARM_*` environment variables.
pub fn create_live_client() -> Option<ArmAccountsClient> {
    let config = ArmClientConfig::from_env().ok()?;
    ArmAccountsClient::new(config).ok()
}
