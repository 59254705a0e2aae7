// SPDX-License-Identifier: Apache-2.0

//! Token provider for the server using environment variables.

use issuerank_core::TokenProvider;
use secrecy::SecretString;
use tracing::debug;

/// Resolves the GitHub credential from the process environment.
///
/// Checks `GH_TOKEN`, then `GITHUB_TOKEN`; empty values count as unset.
pub struct EnvTokenProvider;

impl TokenProvider for EnvTokenProvider {
    fn github_token(&self) -> Option<SecretString> {
        ["GH_TOKEN", "GITHUB_TOKEN"].into_iter().find_map(|name| {
            let token = std::env::var(name).ok().filter(|t| !t.trim().is_empty())?;
            debug!("Using token from {name} environment variable");
            Some(SecretString::from(token))
        })
    }
}
