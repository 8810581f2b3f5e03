pub mod markup;
pub mod series;

pub use markup::{decode_entities, sanitize_html, strip_markup};
pub use series::{
    SERIES_RULES, SeriesMatcher, SeriesRule, extract_episode_title, extract_series_name,
    extract_year, series_slug,
};
