// SPDX-License-Identifier: Apache-2.0

//! Token provider abstraction for credential resolution.
//!
//! The GitHub credential is optional: without it requests are made
//! anonymously and are subject to GitHub's lower unauthenticated rate limit.

use secrecy::SecretString;

/// Provides the GitHub credential used for upstream API calls.
pub trait TokenProvider: Send + Sync {
    /// Retrieves the GitHub API token.
    ///
    /// Returns `None` if no token is configured; callers then fall back to
    /// unauthenticated access.
    fn github_token(&self) -> Option<SecretString>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    /// Mock implementation for testing.
    struct MockTokenProvider {
        github_token: Option<SecretString>,
    }

    impl TokenProvider for MockTokenProvider {
        fn github_token(&self) -> Option<SecretString> {
            self.github_token.clone()
        }
    }

    #[test]
    fn test_mock_provider_with_token() {
        let provider = MockTokenProvider {
            github_token: Some(SecretString::from("gh_token".to_string())),
        };

        let token = provider.github_token().expect("token");
        assert_eq!(token.expose_secret(), "gh_token");
    }

    #[test]
    fn test_mock_provider_without_token() {
        let provider = MockTokenProvider { github_token: None };
        assert!(provider.github_token().is_none());
    }
}
