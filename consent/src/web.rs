pub mod error;
mod terms_cookie;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use consent_app::config::{FrontendConfig, FRONTEND_URL_META};
use consent_app::record::ConsentRecord;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::config::ServerConfig;

use self::error::WebError;
use self::terms_cookie::TermsAgreement;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) frontend: Arc<FrontendConfig>,
}

const MOUNT_SCRIPT: &str = r#"import init, { mount } from "/pkg/consent_client.js";
init().then(() => mount());"#;

/// The document the wasm client mounts into.
pub(crate) fn render_terms_shell(frontend: &FrontendConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name=(FRONTEND_URL_META) content=(frontend.frontend_url);
                title { "Signup - Terms" }
                script type="module" { (PreEscaped(MOUNT_SCRIPT)) }
            }
            body {}
        }
    }
}

#[instrument(skip(state))]
async fn terms_signup(State(state): State<WebState>) -> Html<String> {
    Html(render_terms_shell(&state.frontend).into_string())
}

#[instrument(skip(agreement))]
async fn get_terms(
    agreement: Result<TermsAgreement, WebError>,
) -> Result<Json<ConsentRecord>, WebError> {
    let TermsAgreement(record) = agreement?;
    tracing::debug!(
        agree_terms = record.agree_terms,
        agree_privacy = record.agree_privacy,
        "read terms agreement"
    );
    Ok(Json(record))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

pub(crate) fn router(config: &ServerConfig) -> Router {
    let state = WebState {
        frontend: Arc::new(config.frontend.clone()),
    };
    tracing::info!("Serving pkg dir: {}", config.pkg_dir.display());
    Router::new()
        .route("/terms/signup", get(terms_signup))
        .route("/api/terms", get(get_terms))
        .nest_service("/pkg", ServeDir::new(&config.pkg_dir))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub(crate) async fn start_web(config: ServerConfig) -> Result<(), WebError> {
    let app = router(&config);
    let addr = config.addr();
    tracing::info!(
        "listening on {}, next step is {}",
        addr,
        config.frontend.signup_input_url()
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
