use leptos::prelude::*;
use log::debug;

use crate::browser::{DocumentCookies, WindowNavigator};
use crate::capture::{CaptureState, ConsentCapture, ConsentToggles, SystemClock};
use crate::components::consent_checkbox::ConsentCheckbox;
use crate::config::FrontendConfig;

pub const AGREE_TERMS_ID: &str = "agreeTerms";
pub const AGREE_PRIVACY_ID: &str = "agreePrivacy";
pub const NEXT_BUTTON_ID: &str = "nextBtn";

#[component]
pub fn TermsPage(config: FrontendConfig) -> impl IntoView {
    let (agree_terms, set_agree_terms) = signal(false);
    let (agree_privacy, set_agree_privacy) = signal(false);
    let (state, set_state) = signal(CaptureState::Idle);
    let config = StoredValue::new(config);

    let on_next = move |_: leptos::ev::MouseEvent| {
        let toggles = ConsentToggles {
            agree_terms: agree_terms.get_untracked(),
            agree_privacy: agree_privacy.get_untracked(),
        };
        let mut capture = ConsentCapture::new(
            config.get_value(),
            DocumentCookies,
            SystemClock,
            WindowNavigator,
        );
        let submission = capture.capture_and_proceed(toggles);
        debug!("consent submitted {:?}", submission.record);
        set_state.set(capture.state());
    };

    view! {
        <div class="main-content">
            <span class="content-title">"Terms of service"</span>
            <div class="content-well flex flex-col gap-2">
                <ConsentCheckbox id=AGREE_TERMS_ID checked=agree_terms set_checked=set_agree_terms>
                    "I agree to the community terms of service"
                </ConsentCheckbox>
                <ConsentCheckbox id=AGREE_PRIVACY_ID checked=agree_privacy set_checked=set_agree_privacy>
                    "I agree to the collection and use of my personal information"
                </ConsentCheckbox>
                <button
                    id=NEXT_BUTTON_ID
                    class="btn"
                    on:click=on_next
                >
                    {move || match state.get() {
                        CaptureState::Idle => "Next",
                        CaptureState::Submitted => "Continuing...",
                    }}
                </button>
            </div>
        </div>
    }
}
