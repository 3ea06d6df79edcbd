use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::Table;
use movie_discovery_models::AVAILABLE_GENRES;
use serde_json::json;

pub fn run_genres(output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        let genres: Vec<_> = AVAILABLE_GENRES
            .iter()
            .map(|g| json!({ "id": g.id, "label": g.label }))
            .collect();
        output.json(&json!(genres));
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Tag", "Genre"]);
    for genre in AVAILABLE_GENRES {
        table.add_row(vec![genre.id, genre.label]);
    }
    output.println(table.to_string());
    output.println("\nExample: reelmood discover scifi thriller");
    Ok(())
}
