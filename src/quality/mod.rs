pub mod definition;

pub use definition::{DEFAULT_QUALITY_LABEL, FormatBucket, quality_label};

use crate::clients::archive::ArchiveFile;

/// Upper bound on the number of streams offered for one episode.
pub const MAX_STREAM_CANDIDATES: usize = 3;

/// Substrings marking thumbnails, metadata sidecars and torrent descriptors.
const AUXILIARY_MARKERS: &[&str] = &["_thumb", ".xml", ".torrent"];

/// A manifest file that survived filtering and classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedFile {
    pub name: String,
    pub bucket: FormatBucket,
    pub quality: &'static str,
    pub size: u64,
    pub height: Option<u32>,
}

#[must_use]
pub fn is_auxiliary(name: &str) -> bool {
    let lower = name.to_lowercase();
    AUXILIARY_MARKERS.iter().any(|marker| lower.contains(marker))
}

#[must_use]
pub fn classify_file(file: &ArchiveFile) -> Option<RankedFile> {
    if file.name.is_empty() || is_auxiliary(&file.name) {
        return None;
    }

    let bucket = FormatBucket::classify(&file.name, file.format.as_deref())?;

    Some(RankedFile {
        name: file.name.clone(),
        bucket,
        quality: quality_label(file.height, file.format.as_deref()),
        size: file.size.unwrap_or(0),
        height: file.height,
    })
}

/// All playable files, best first: bucket priority ascending, then byte size
/// descending. Ties keep manifest order.
#[must_use]
pub fn rank_files(files: &[ArchiveFile]) -> Vec<RankedFile> {
    let mut ranked: Vec<RankedFile> = files.iter().filter_map(classify_file).collect();

    ranked.sort_by(|a, b| {
        a.bucket
            .priority()
            .cmp(&b.bucket.priority())
            .then_with(|| b.size.cmp(&a.size))
    });

    ranked
}

/// The top [`MAX_STREAM_CANDIDATES`] entries of [`rank_files`].
#[must_use]
pub fn best_candidates(files: &[ArchiveFile]) -> Vec<RankedFile> {
    let mut ranked = rank_files(files);
    ranked.truncate(MAX_STREAM_CANDIDATES);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1_000_000;

    fn file(name: &str, format: &str, size: u64) -> ArchiveFile {
        ArchiveFile {
            name: name.to_string(),
            format: Some(format.to_string()),
            size: Some(size),
            height: None,
        }
    }

    fn names(ranked: &[RankedFile]) -> Vec<&str> {
        ranked.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_bucket_priority_dominates_size() {
        let files = vec![
            file("c.ogv", "Ogg Video", 900 * MB),
            file("b.mp4", "h.264", 200 * MB),
            file("a.mp4", "h.264", 500 * MB),
        ];

        assert_eq!(names(&rank_files(&files)), vec!["a.mp4", "b.mp4", "c.ogv"]);
    }

    #[test]
    fn test_truncates_to_three_best() {
        let files = vec![
            file("e.mpg", "MPEG2", 800 * MB),
            file("d.ogv", "Ogg Video", 50 * MB),
            file("c.mp4", "MPEG4", 10 * MB),
            file("b.mp4", "MPEG4", 30 * MB),
            file("a.mp4", "MPEG4", 20 * MB),
        ];

        let best = best_candidates(&files);
        assert_eq!(best.len(), MAX_STREAM_CANDIDATES);
        assert_eq!(names(&best), vec!["b.mp4", "a.mp4", "c.mp4"]);
    }

    #[test]
    fn test_auxiliary_files_filtered() {
        let files = vec![
            file("cartoon_thumb.mp4", "Thumbnail", 1),
            file("cartoon_meta.xml", "Metadata", 1),
            file("cartoon_archive.torrent", "Archive BitTorrent", 1),
            file("cover.jpg", "JPEG", 1),
        ];

        assert!(rank_files(&files).is_empty());
    }

    #[test]
    fn test_height_drives_label() {
        let mut hd = file("hd.mp4", "h.264", 100);
        hd.height = Some(720);
        let mut low = file("low.mp4", "512Kb MPEG4", 50);
        low.height = Some(0);

        let ranked = rank_files(&[hd, low]);
        assert_eq!(ranked[0].quality, "HD");
        assert_eq!(ranked[1].quality, "320p");
    }

    #[test]
    fn test_missing_size_sorts_last_within_bucket() {
        let mut unknown = file("unknown.mp4", "MPEG4", 0);
        unknown.size = None;
        let files = vec![unknown, file("known.mp4", "MPEG4", 5)];

        assert_eq!(names(&rank_files(&files)), vec!["known.mp4", "unknown.mp4"]);
    }
}
