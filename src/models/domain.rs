use serde::{Deserialize, Serialize};
use std::fmt;

/// One outfit as returned by the generator endpoint.
///
/// The `name` is the outfit's identifier, unique within a catalog. Candidates
/// are immutable once returned; the client never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitCandidate {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub vibe: Option<String>,
}

/// Categorical tag used to filter outfit recommendations.
///
/// Weather vibes (sunny, cloudy, cold) and occasion vibes (work, casual,
/// date) share one namespace; the generator takes the lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Sunny,
    Cloudy,
    Cold,
    Work,
    Casual,
    Date,
}

impl Vibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Sunny => "sunny",
            Vibe::Cloudy => "cloudy",
            Vibe::Cold => "cold",
            Vibe::Work => "work",
            Vibe::Casual => "casual",
            Vibe::Date => "date",
        }
    }

    /// Parse a vibe tag, case-insensitively. Returns None for unknown tags.
    pub fn parse(tag: &str) -> Option<Vibe> {
        match tag.to_lowercase().as_str() {
            "sunny" => Some(Vibe::Sunny),
            "cloudy" => Some(Vibe::Cloudy),
            "cold" => Some(Vibe::Cold),
            "work" => Some(Vibe::Work),
            "casual" => Some(Vibe::Casual),
            "date" => Some(Vibe::Date),
            _ => None,
        }
    }

    pub fn all() -> [Vibe; 6] {
        [
            Vibe::Sunny,
            Vibe::Cloudy,
            Vibe::Cold,
            Vibe::Work,
            Vibe::Casual,
            Vibe::Date,
        ]
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grouping of a vibe card on the landing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeGroup {
    Weather,
    Occasion,
}

/// Presentation metadata for one vibe card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibeOption {
    pub vibe: Vibe,
    pub label: String,
    pub title: String,
    pub description: String,
    pub style: String,
    pub occasion: String,
    pub group: VibeGroup,
}

/// The full vibe catalog shown by the landing page UI
pub fn vibe_catalog() -> Vec<VibeOption> {
    vec![
        VibeOption {
            vibe: Vibe::Sunny,
            label: "Sunny Vibes".to_string(),
            title: "Sunny Day Goddess".to_string(),
            description: "Effortless summer elegance with flowing fabrics, radiant colors, \
                          and that golden-hour glow that turns heads everywhere you go."
                .to_string(),
            style: "Casual".to_string(),
            occasion: "Weekend".to_string(),
            group: VibeGroup::Weather,
        },
        VibeOption {
            vibe: Vibe::Cloudy,
            label: "Cloudy Vibes".to_string(),
            title: "Cloudy Chic".to_string(),
            description: "Sophisticated layering, muted tones, and luxe textures for moody days."
                .to_string(),
            style: "Formal".to_string(),
            occasion: "Work".to_string(),
            group: VibeGroup::Weather,
        },
        VibeOption {
            vibe: Vibe::Cold,
            label: "Cold Vibes".to_string(),
            title: "Winter Muse".to_string(),
            description: "Chic cold weather couture with statement coats, cozy knits, and \
                          accessories."
                .to_string(),
            style: "Sporty".to_string(),
            occasion: "Casual".to_string(),
            group: VibeGroup::Weather,
        },
        VibeOption {
            vibe: Vibe::Work,
            label: "Work".to_string(),
            title: "Boardroom Queen".to_string(),
            description: "Power suits, sharp silhouettes, and confidence-boosting pieces."
                .to_string(),
            style: "Formal".to_string(),
            occasion: "Work".to_string(),
            group: VibeGroup::Occasion,
        },
        VibeOption {
            vibe: Vibe::Casual,
            label: "Casual".to_string(),
            title: "Street Style Star".to_string(),
            description: "Effortlessly cool street style that looks like you just stepped out \
                          of a magazine."
                .to_string(),
            style: "Casual".to_string(),
            occasion: "Casual".to_string(),
            group: VibeGroup::Occasion,
        },
        VibeOption {
            vibe: Vibe::Date,
            label: "Date Night".to_string(),
            title: "Date Night Dream".to_string(),
            description: "Romantic elegance meets sultry sophistication.".to_string(),
            style: "Party".to_string(),
            occasion: "Date".to_string(),
            group: VibeGroup::Occasion,
        },
    ]
}

/// One generator response: zero or more candidates plus the server-side
/// exhaustion flag (the catalog for the requested vibe has fully cycled).
#[derive(Debug, Clone, Default)]
pub struct CandidateBatch {
    pub outfits: Vec<OutfitCandidate>,
    pub exhausted: bool,
}

impl CandidateBatch {
    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }
}
