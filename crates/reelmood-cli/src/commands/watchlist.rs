use crate::app::App;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use movie_discovery_models::{Movie, RatedMovie};
use std::collections::HashMap;

async fn logged_in_app() -> Result<App> {
    let app = App::init()?;
    app.hydrate().await;
    if !app.store.is_logged_in().await {
        return Err(eyre!("Not logged in. Run `reelmood login <email>` first"));
    }
    Ok(app)
}

pub async fn run_show(output: &Output) -> Result<()> {
    let app = logged_in_app().await?;

    let watchlist = app.store.watchlist().await;
    let ratings = app.store.ratings().await;

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&watchlist)?);
        return Ok(());
    }

    if watchlist.is_empty() {
        output.info("Your watchlist is empty. Add movies with `reelmood watchlist add <n>`");
        return Ok(());
    }

    output.println(watchlist_table(&watchlist, &ratings));
    Ok(())
}

pub async fn run_add(selector: &str, output: &Output) -> Result<()> {
    let app = logged_in_app().await?;

    let batch = app.load_discover_batch();
    if batch.is_empty() {
        return Err(eyre!(
            "No discovery batch found. Run `reelmood discover <genres>` first"
        ));
    }
    let movie = App::select_movie(&batch, selector)?.clone();

    if app
        .store
        .watchlist()
        .await
        .iter()
        .any(|m| m.id == movie.id)
    {
        output.info(format!("{} is already on your watchlist", movie.title));
        return Ok(());
    }

    let title = movie.title.clone();
    let movie_id = movie.id.clone();
    app.sync.add_to_watchlist(movie).await;

    // The engine reverts the local change when the remote write fails, so
    // the final state tells us whether the add stuck.
    if app.store.watchlist().await.iter().any(|m| m.id == movie_id) {
        output.success(format!("Added {} to your watchlist", title));
    } else {
        output.error(format!("Could not save {}; it was not added", title));
    }
    Ok(())
}

pub async fn run_remove(selector: &str, output: &Output) -> Result<()> {
    let app = logged_in_app().await?;

    let watchlist = app.store.watchlist().await;
    let movie = App::select_movie(&watchlist, selector)?.clone();

    app.sync.remove_from_watchlist(&movie.id).await;

    if app.store.watchlist().await.iter().any(|m| m.id == movie.id) {
        output.error(format!("Could not remove {}; it is still on the list", movie.title));
    } else {
        output.success(format!("Removed {} from your watchlist", movie.title));
    }
    Ok(())
}

fn watchlist_table(watchlist: &[Movie], ratings: &HashMap<String, RatedMovie>) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Title", "Year", "Genres", "My rating"]);
    for (i, movie) in watchlist.iter().enumerate() {
        let my_rating = ratings
            .get(&movie.id)
            .map(|r| format!("{}/5", r.score))
            .unwrap_or_default();
        table.add_row(vec![
            (i + 1).to_string(),
            movie.title.clone(),
            movie.year.clone(),
            movie.genre.join(", "),
            my_rating,
        ]);
    }
    table.to_string()
}
