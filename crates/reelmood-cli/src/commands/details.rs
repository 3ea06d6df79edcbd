use crate::app::App;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use movie_discovery_models::Movie;

pub async fn run_details(selector: &str, output: &Output) -> Result<()> {
    let app = App::init()?;
    app.hydrate().await;

    // Positions address the last discovery batch; ids also match the
    // watchlist, so a saved movie can be enriched without rediscovering it.
    let mut candidates = app.load_discover_batch();
    for movie in app.store.watchlist().await {
        if !candidates.iter().any(|m| m.id == movie.id) {
            candidates.push(movie);
        }
    }

    let mut movie = App::select_movie(&candidates, selector)?.clone();

    let details = app.pipeline.deep_dive(&movie.title).await;
    if details.is_empty() {
        output.warn("Could not fetch details right now; try again in a moment");
        return Ok(());
    }

    app.store.absorb_details(&movie.id, details.clone()).await;
    movie.absorb(details);

    // Keep the stashed batch enriched too, so a later invocation sees it.
    let mut batch = app.load_discover_batch();
    if let Some(stashed) = batch.iter_mut().find(|m| m.id == movie.id) {
        *stashed = movie.clone();
        app.save_discover_batch(&batch)?;
    }

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&movie)?);
        return Ok(());
    }

    print_movie(&movie, output);
    Ok(())
}

fn print_movie(movie: &Movie, output: &Output) {
    output.println(format!("{} ({})", movie.title, movie.year));
    if !movie.genre.is_empty() {
        output.println(format!("Genres: {}", movie.genre.join(", ")));
    }
    if let Some(rating) = &movie.rating {
        output.println(format!("Rating: {}", rating));
    }
    if let Some(director) = &movie.director {
        output.println(format!("Director: {}", director));
    }
    if !movie.plot.is_empty() {
        output.println(format!("\n{}", movie.plot));
    }
    if let Some(cast) = &movie.cast {
        output.println(format!("\nCast: {}", cast.join(", ")));
    }
    if let Some(providers) = &movie.watch_providers {
        output.println(format!("Watch on: {}", providers.join(", ")));
    }
    if let Some(reviews) = &movie.critic_reviews {
        output.println("\nCritic reviews:");
        for review in reviews {
            let score = review
                .score
                .as_ref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            output.println(format!("  {}{}: {}", review.source, score, review.snippet));
        }
    }
    if let Some(url) = &movie.image_url {
        output.println(format!("\nPoster: {}", url));
    }
}
