/// Case-insensitive substring match of `query` in `name`. An empty query matches everything.
pub fn matches_query(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}
