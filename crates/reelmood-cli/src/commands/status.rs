use crate::app::App;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use serde_json::json;

pub async fn run_status(output: &Output) -> Result<()> {
    let app = App::init()?;
    app.hydrate().await;

    let session = app.store.session().await;
    let watchlist = app.store.watchlist().await.len();
    let ratings = app.store.ratings().await.len();

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "logged_in": session.is_some(),
            "email": session.as_ref().map(|s| s.user.email.clone()),
            "store_configured": app.settings.has_store(),
            "gemini_configured": app.settings.gemini_api_key.is_some(),
            "model": app.settings.model,
            "watchlist": watchlist,
            "ratings": ratings,
        }));
        return Ok(());
    }

    match &session {
        Some(session) => output.success(format!("Logged in as {}", session.user.email)),
        None => output.info("Not logged in"),
    }
    output.println(format!(
        "Data store: {}",
        if app.settings.has_store() {
            "configured"
        } else {
            "not configured"
        }
    ));
    output.println(format!(
        "Generative service: {} ({})",
        if app.settings.gemini_api_key.is_some() {
            "configured"
        } else {
            "not configured"
        },
        app.settings.model
    ));
    if session.is_some() {
        output.println(format!("Watchlist: {} movie(s), ratings: {}", watchlist, ratings));
    }
    Ok(())
}
