//! Genre tags are persisted as a single comma-joined string; everywhere
//! else they travel as a list. Splitting and rejoining must reproduce the
//! stored value byte for byte, so tags themselves may not contain commas.

pub fn split(genres: &str) -> Vec<String> {
    genres.split(',').map(str::to_string).collect()
}

pub fn join(genres: &[String]) -> String {
    genres.join(",")
}
