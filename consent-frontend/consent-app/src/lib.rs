pub mod browser;
pub mod capture;
pub mod components;
pub mod config;
pub mod error;
pub mod record;
pub mod routes;

use leptos::prelude::*;
use leptos_meta::*;

use crate::config::FrontendConfig;
use crate::routes::terms::TermsPage;

#[component]
pub fn App(config: FrontendConfig) -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Signup - Terms" />
        <main>
            <TermsPage config=config />
        </main>
    }
}
