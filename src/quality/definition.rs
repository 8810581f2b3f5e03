use serde::{Deserialize, Serialize};

/// Container families a file manifest is sorted into. Lower priority is
/// preferred: MP4 plays everywhere, OGV is open but less supported, MPEG is
/// the legacy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormatBucket {
    Mp4,
    Ogv,
    Mpeg,
}

impl FormatBucket {
    pub const ALL: &[Self] = &[Self::Mp4, Self::Ogv, Self::Mpeg];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Ogv => "ogv",
            Self::Mpeg => "mpeg",
        }
    }

    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Mp4 => 1,
            Self::Ogv => 2,
            Self::Mpeg => 3,
        }
    }

    /// Buckets are checked in priority order, so an "MPEG4" format string
    /// lands in `Mp4` rather than `Mpeg`.
    #[must_use]
    pub fn classify(name: &str, format: Option<&str>) -> Option<Self> {
        let name = name.to_lowercase();
        let format = format.unwrap_or_default().to_lowercase();

        Self::ALL
            .iter()
            .copied()
            .find(|bucket| bucket.matches(&name, &format))
    }

    fn matches(self, name: &str, format: &str) -> bool {
        match self {
            Self::Mp4 => {
                format.contains("mp4") || format.contains("mpeg4") || name.ends_with(".mp4")
            }
            Self::Ogv => {
                format.contains("ogv") || format.contains("ogg") || name.ends_with(".ogv")
            }
            Self::Mpeg => {
                format.contains("mpeg") || name.ends_with(".mpeg") || name.ends_with(".mpg")
            }
        }
    }
}

impl std::fmt::Display for FormatBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Height bands, checked top-down.
const HEIGHT_BANDS: &[(u32, &str)] = &[(720, "HD"), (480, "480p"), (360, "360p"), (240, "240p")];

/// Format-string hints used when a file carries no usable height.
const FORMAT_HINTS: &[(&str, &str)] = &[("512kb", "320p"), ("mpeg4", "SD"), ("ogv", "SD")];

pub const DEFAULT_QUALITY_LABEL: &str = "SD";

#[must_use]
pub fn quality_label(height: Option<u32>, format: Option<&str>) -> &'static str {
    let height = height.unwrap_or(0);
    if height > 0 {
        if let Some((_, label)) = HEIGHT_BANDS.iter().find(|(min, _)| height >= *min) {
            return label;
        }
    }

    let format = format.unwrap_or_default().to_lowercase();
    FORMAT_HINTS
        .iter()
        .find(|(hint, _)| format.contains(hint))
        .map_or(DEFAULT_QUALITY_LABEL, |(_, label)| label)
}
