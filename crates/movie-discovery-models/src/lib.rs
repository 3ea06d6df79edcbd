pub mod genre;
pub mod movie;
pub mod rating;
pub mod review;
pub mod session;

pub use genre::{find_genre, GenreOption, AVAILABLE_GENRES};
pub use movie::{Movie, MovieDetails};
pub use rating::RatedMovie;
pub use review::Review;
pub use session::{Session, User};
