use crate::app::App;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_discovery_backends::AuthError;
use tracing::warn;

fn friendly(e: AuthError) -> color_eyre::Report {
    match e {
        AuthError::InvalidCredentials => eyre!("Invalid email or password"),
        AuthError::EmailNotConfirmed => {
            eyre!("Email not confirmed yet. Check your inbox for the confirmation link")
        }
        AuthError::NotConfigured => {
            eyre!("The data store is not configured. Run `reelmood config set --store-url <URL> --store-anon-key <KEY>` first")
        }
        other => eyre!("{}", other),
    }
}

pub async fn run_login(email: &str, output: &Output) -> Result<()> {
    let mut app = App::init()?;

    let password = rpassword::prompt_password("Password: ")?;
    let session = app.session.login(email, &password).await.map_err(friendly)?;

    app.persist_session(&session)?;
    app.hydrate().await;

    let watchlist = app.store.watchlist().await.len();
    let ratings = app.store.ratings().await.len();

    output.success(format!("Logged in as {}", session.user.email));
    output.info(format!(
        "Loaded {} watchlist movie(s) and {} rating(s)",
        watchlist, ratings
    ));
    Ok(())
}

pub async fn run_signup(email: &str, output: &Output) -> Result<()> {
    let app = App::init()?;

    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        return Err(eyre!("Passwords do not match"));
    }

    app.session.signup(email, &password).await.map_err(friendly)?;

    output.success(format!("Account requested for {}", email));
    output.info("Check your email to confirm the account, then run `reelmood login`");
    Ok(())
}

pub async fn run_logout(output: &Output) -> Result<()> {
    let mut app = App::init()?;

    if !app.credentials.has_session() {
        output.info("Not logged in");
        return Ok(());
    }

    // Local session goes first so logout always succeeds from the user's
    // point of view, even when the remote revocation does not.
    app.clear_persisted_session()?;
    if let Err(e) = app.session.logout().await {
        warn!(operation = "logout", error = %e, "Remote sign-out failed");
        output.warn("Could not reach the auth service; the local session was cleared anyway");
    }

    output.success("Logged out");
    Ok(())
}
