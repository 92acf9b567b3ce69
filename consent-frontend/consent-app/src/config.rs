use serde::{Deserialize, Serialize};

/// Origin used when nothing else is configured, the local front-end dev server.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const SIGNUP_INPUT_PATH: &str = "signup-input";
/// Name of the `<meta>` tag the server uses to hand the origin to the page.
pub const FRONTEND_URL_META: &str = "frontend-url";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub frontend_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}

impl FrontendConfig {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
        }
    }

    /// Resolves the origin from `FRONTEND_URL`, then the first entry of
    /// `CORS_ALLOWED_ORIGINS`, then the dev default. Blank values are skipped.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |value: String| {
            let value = value.trim().to_string();
            (!value.is_empty()).then_some(value)
        };
        lookup("FRONTEND_URL")
            .and_then(non_blank)
            .or_else(|| {
                lookup("CORS_ALLOWED_ORIGINS")
                    .and_then(|origins| origins.split(',').next().map(str::to_string))
                    .and_then(non_blank)
            })
            .map(Self::new)
            .unwrap_or_default()
    }

    /// `<origin>/signup-input`, regardless of whether the origin has a trailing slash.
    pub fn signup_input_url(&self) -> String {
        format!(
            "{}/{}",
            self.frontend_url.trim_end_matches('/'),
            SIGNUP_INPUT_PATH
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn default_is_localhost() {
        let config = FrontendConfig::from_lookup(lookup(&[]));
        assert_eq!(config, FrontendConfig::default());
        assert_eq!(
            config.signup_input_url(),
            "http://localhost:3000/signup-input"
        );
    }

    #[test]
    fn frontend_url_wins() {
        let config = FrontendConfig::from_lookup(lookup(&[
            ("FRONTEND_URL", "https://community.example.com"),
            ("CORS_ALLOWED_ORIGINS", "https://other.example.com"),
        ]));
        assert_eq!(config.frontend_url, "https://community.example.com");
    }

    #[test]
    fn falls_back_to_first_allowed_origin() {
        let config = FrontendConfig::from_lookup(lookup(&[
            ("FRONTEND_URL", "   "),
            (
                "CORS_ALLOWED_ORIGINS",
                " https://a.example.com ,https://b.example.com",
            ),
        ]));
        assert_eq!(config.frontend_url, "https://a.example.com");
    }

    #[test]
    fn trailing_slash() {
        let config = FrontendConfig::new("https://community.example.com/");
        assert_eq!(
            config.signup_input_url(),
            "https://community.example.com/signup-input"
        );
    }
}
