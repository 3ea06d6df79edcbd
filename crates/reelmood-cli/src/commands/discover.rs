use crate::app::App;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Table;
use movie_discovery_models::{find_genre, Movie};

pub async fn run_discover(genres: &[String], output: &Output) -> Result<()> {
    let mut tags = Vec::with_capacity(genres.len());
    for genre in genres {
        let known = find_genre(genre).ok_or_else(|| {
            eyre!(
                "Unknown genre '{}'. Run `reelmood genres` to list valid tags",
                genre
            )
        })?;
        tags.push(known.id.to_string());
    }

    let app = App::init()?;
    let movies = app.pipeline.recommend(&tags).await;

    if movies.is_empty() {
        if app.settings.gemini_api_key.is_none() {
            output.error(
                "gemini_api_key is not configured. Run `reelmood config set --gemini-api-key <KEY>`",
            );
        } else {
            output.warn("No recommendations this time; try again or adjust the genres");
        }
        return Ok(());
    }

    app.save_discover_batch(&movies)?;

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&movies)?);
        return Ok(());
    }

    output.println(batch_table(&movies));
    output.println("\nNext: reelmood details <n>, reelmood watchlist add <n>, reelmood rate <n> <1-5>");
    Ok(())
}

fn batch_table(movies: &[Movie]) -> String {
    let mut table = Table::new();
    table.set_header(vec!["#", "Title", "Year", "Genres", "Rating"]);
    for (i, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            movie.title.clone(),
            movie.year.clone(),
            movie.genre.join(", "),
            movie.rating.clone().unwrap_or_default(),
        ]);
    }
    table.to_string()
}
