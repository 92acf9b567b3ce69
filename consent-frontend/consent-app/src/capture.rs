use chrono::{DateTime, Utc};
use cookie::Cookie;
use log::{error, info, warn};

use crate::config::FrontendConfig;
use crate::error::AppResult;
use crate::record::ConsentRecord;

/// Somewhere a cookie can be written to. In the browser this is `document.cookie`.
pub trait CookieStore {
    fn set_cookie(&self, cookie: &Cookie<'_>) -> AppResult<()>;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Moves the user to another page. In the browser this is `window.location`.
pub trait Navigator {
    fn navigate(&self, url: &str) -> AppResult<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Submitted,
}

/// The two checkboxes on the terms page at the moment the user pressed next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConsentToggles {
    pub agree_terms: bool,
    pub agree_privacy: bool,
}

/// What a single press of the next button did.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub record: ConsentRecord,
    pub cookie: Option<Cookie<'static>>,
    pub cookie_stored: bool,
    pub next_url: String,
}

pub struct ConsentCapture<S, C, N> {
    config: FrontendConfig,
    cookies: S,
    clock: C,
    navigator: N,
    state: CaptureState,
}

impl<S, C, N> ConsentCapture<S, C, N>
where
    S: CookieStore,
    C: Clock,
    N: Navigator,
{
    pub fn new(config: FrontendConfig, cookies: S, clock: C, navigator: N) -> Self {
        Self {
            config,
            cookies,
            clock,
            navigator,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Writes the `termsAgreement` cookie and then sends the user on to the
    /// signup-input step. Nothing here is validated and nothing is returned as
    /// an error: the navigation happens even when the cookie couldn't be stored.
    pub fn capture_and_proceed(&mut self, toggles: ConsentToggles) -> Submission {
        let record = ConsentRecord::new(
            toggles.agree_terms,
            toggles.agree_privacy,
            self.clock.now(),
        );
        let cookie = match record.to_cookie() {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                error!("Unable to encode consent record {record:?}: {e}");
                None
            }
        };
        let cookie_stored = match &cookie {
            Some(cookie) => match self.cookies.set_cookie(cookie) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Consent cookie was not stored, continuing anyway: {e}");
                    false
                }
            },
            None => false,
        };
        self.state = CaptureState::Submitted;
        let next_url = self.config.signup_input_url();
        info!("terms submitted {toggles:?}, moving to {next_url}");
        if let Err(e) = self.navigator.navigate(&next_url) {
            error!("Error navigating to {next_url}: {e}");
        }
        Submission {
            record,
            cookie,
            cookie_stored,
            next_url,
        }
    }
}
