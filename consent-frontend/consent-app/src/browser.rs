use cookie::Cookie;

use crate::capture::{CookieStore, Navigator};
use crate::config::FrontendConfig;
use crate::error::AppResult;

/// Writes through `document.cookie`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentCookies;

/// Sends the browser elsewhere by setting `window.location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

cfg_if::cfg_if! {
    if #[cfg(feature = "csr")] {
        use wasm_bindgen::JsCast;
        use web_sys::HtmlDocument;

        use crate::config::FRONTEND_URL_META;
        use crate::error::AppError;

        fn js_error(value: wasm_bindgen::JsValue) -> String {
            value.as_string().unwrap_or_else(|| format!("{value:?}"))
        }

        impl CookieStore for DocumentCookies {
            fn set_cookie(&self, cookie: &Cookie<'_>) -> AppResult<()> {
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .ok_or(AppError::NoBrowser)?
                    .dyn_into::<HtmlDocument>()
                    .map_err(|_| AppError::NoBrowser)?;
                document
                    .set_cookie(&cookie.to_string())
                    .map_err(|e| AppError::CookieStore(js_error(e)))
            }
        }

        impl Navigator for WindowNavigator {
            fn navigate(&self, url: &str) -> AppResult<()> {
                web_sys::window()
                    .ok_or(AppError::NoBrowser)?
                    .location()
                    .set_href(url)
                    .map_err(|e| AppError::Navigation(js_error(e)))
            }
        }

        /// Reads `<meta name="frontend-url" content="...">` from the served page.
        pub fn read_frontend_config() -> FrontendConfig {
            let selector = format!("meta[name=\"{FRONTEND_URL_META}\"]");
            let url = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(&selector).ok().flatten())
                .and_then(|meta| meta.get_attribute("content"))
                .filter(|url| !url.trim().is_empty());
            match url {
                Some(url) => FrontendConfig::new(url),
                None => {
                    log::warn!("page has no {FRONTEND_URL_META} meta tag, using the default origin");
                    FrontendConfig::default()
                }
            }
        }
    } else {
        use crate::error::AppError;

        impl CookieStore for DocumentCookies {
            fn set_cookie(&self, cookie: &Cookie<'_>) -> AppResult<()> {
                log::warn!("no document to store {} in", cookie.name());
                Err(AppError::NoBrowser)
            }
        }

        impl Navigator for WindowNavigator {
            fn navigate(&self, url: &str) -> AppResult<()> {
                log::warn!("no window to navigate to {url}");
                Err(AppError::NoBrowser)
            }
        }

        pub fn read_frontend_config() -> FrontendConfig {
            FrontendConfig::default()
        }
    }
}
