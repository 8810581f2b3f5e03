pub mod catalog;
pub mod details;
pub mod stream;

pub use catalog::{CatalogEntry, SearchPage};
pub use details::{Episode, VideoDetails, VideoStatus};
pub use stream::{Stream, StreamBundle, StreamType, Subtitle};
