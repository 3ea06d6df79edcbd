/// Derive a poster-image reference for a movie title.
///
/// Builds a search query from the title plus fixed qualifier terms and
/// embeds it in an image-proxy URL with fixed portrait dimensions. Purely
/// deterministic in the title; best-effort only, nothing verifies that
/// the proxied result actually depicts the movie, and the reference may
/// resolve to no image at all.
pub fn poster_url(title: &str) -> String {
    let query =
        urlencoding::encode(&format!("{} official movie poster high resolution vertical", title))
            .into_owned();
    format!(
        "https://tse2.mm.bing.net/th?q={}&w=600&h=900&c=7&rs=1&p=0",
        query
    )
}
