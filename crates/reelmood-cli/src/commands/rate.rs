use crate::app::App;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;

pub async fn run_rate(selector: &str, score: u8, output: &Output) -> Result<()> {
    if !(1..=5).contains(&score) {
        return Err(eyre!("Score must be between 1 and 5"));
    }

    let app = App::init()?;
    app.hydrate().await;
    if !app.store.is_logged_in().await {
        return Err(eyre!("Not logged in. Run `reelmood login <email>` first"));
    }

    let mut candidates = app.load_discover_batch();
    for movie in app.store.watchlist().await {
        if !candidates.iter().any(|m| m.id == movie.id) {
            candidates.push(movie);
        }
    }
    let movie = App::select_movie(&candidates, selector)?.clone();

    app.sync.rate_movie(&movie.id, &movie.title, score).await;

    let stuck = app
        .store
        .ratings()
        .await
        .get(&movie.id)
        .map(|r| r.score == score)
        .unwrap_or(false);
    if stuck {
        output.success(format!("Rated {} {}/5", movie.title, score));
    } else {
        output.error(format!("Could not save the rating for {}", movie.title));
    }
    Ok(())
}
