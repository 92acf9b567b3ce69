use wasm_bindgen::prelude::wasm_bindgen;

use consent_app::browser::read_frontend_config;
use consent_app::*;
use leptos::prelude::*;

#[wasm_bindgen]
pub fn mount() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = read_frontend_config();
    log::info!("csr mode - mounting terms page, next step {}", config.signup_input_url());

    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
