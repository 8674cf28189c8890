//! Static keyword tables shared by the scorers and the explanation builders.
//!
//! Everything here is `&'static` data. Nothing is ever mutated at runtime, so
//! the tables can be read from any number of threads without coordination.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ViralLive,
    Celebrity,
    Platform,
    Emotional,
    Exclusive,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 5] = [
        KeywordCategory::ViralLive,
        KeywordCategory::Celebrity,
        KeywordCategory::Platform,
        KeywordCategory::Emotional,
        KeywordCategory::Exclusive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KeywordCategory::ViralLive => "live/urgent",
            KeywordCategory::Celebrity => "celebrity",
            KeywordCategory::Platform => "platform trend",
            KeywordCategory::Emotional => "emotional",
            KeywordCategory::Exclusive => "exclusive",
        }
    }

    pub fn terms(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::ViralLive => VIRAL_LIVE_TERMS,
            KeywordCategory::Celebrity => CELEBRITY_TERMS,
            KeywordCategory::Platform => PLATFORM_TERMS,
            KeywordCategory::Emotional => EMOTIONAL_TERMS,
            KeywordCategory::Exclusive => EXCLUSIVE_TERMS,
        }
    }
}

const VIRAL_LIVE_TERMS: &[&str] = &[
    "🔴",
    "live",
    "livestream",
    "live stream",
    "breaking",
    "just in",
    "happening now",
    "urgent",
    "viral",
    "trending",
    "🔥",
    "속보",
    "생중계",
    "라이브",
];

const CELEBRITY_TERMS: &[&str] = &[
    "celebrity",
    "superstar",
    "star",
    "idol",
    "famous",
    "actor",
    "actress",
    "singer",
    "rapper",
    "influencer",
    "mrbeast",
    "bts",
    "blackpink",
    "taylor swift",
];

const PLATFORM_TERMS: &[&str] = &[
    "tiktok",
    "#shorts",
    "shorts",
    "reels",
    "challenge",
    "trend",
    "meme",
    "duet",
    "instagram",
];

const EMOTIONAL_TERMS: &[&str] = &[
    "shocking",
    "amazing",
    "unbelievable",
    "insane",
    "emotional",
    "heartbreaking",
    "epic",
    "crazy",
    "omg",
    "tears",
    "😱",
    "😭",
    "❤️",
];

const EXCLUSIVE_TERMS: &[&str] = &[
    "exclusive",
    "first look",
    "official",
    "premiere",
    "leaked",
    "behind the scenes",
    "reveal",
    "teaser",
    "trailer",
    "never before seen",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    Social,
    Regional { region: &'static str },
}

/// A named set of platforms or outlets that count as one mention group.
#[derive(Debug, Clone, Copy)]
pub struct MentionGroup {
    pub kind: MentionKind,
    pub names: &'static [&'static str],
}

impl MentionGroup {
    /// Label used when several groups are joined, e.g. "Korean news".
    pub fn label(&self) -> String {
        match self.kind {
            MentionKind::Social => "Social media".to_string(),
            MentionKind::Regional { region } => format!("{} news", region),
        }
    }
}

pub const MENTION_GROUPS: &[MentionGroup] = &[
    MentionGroup {
        kind: MentionKind::Social,
        names: &[
            "TikTok",
            "Instagram",
            "Twitter",
            "Facebook",
            "Snapchat",
            "Reddit",
            "Twitch",
            "Threads",
            "Discord",
            "Weibo",
        ],
    },
    MentionGroup {
        kind: MentionKind::Regional { region: "Korean" },
        names: &["KBS", "MBC", "SBS", "JTBC", "YTN", "MBN", "TV Chosun", "Yonhap"],
    },
    MentionGroup {
        kind: MentionKind::Regional { region: "US" },
        names: &[
            "CNN",
            "Fox News",
            "NBC",
            "ABC News",
            "CBS",
            "MSNBC",
            "New York Times",
            "Washington Post",
        ],
    },
    MentionGroup {
        kind: MentionKind::Regional { region: "UK" },
        names: &["BBC", "Sky News", "ITV", "The Guardian", "Reuters"],
    },
    MentionGroup {
        kind: MentionKind::Regional { region: "Japanese" },
        names: &["NHK", "Fuji TV", "TV Asahi", "Nikkei"],
    },
    MentionGroup {
        kind: MentionKind::Regional { region: "Indian" },
        names: &["NDTV", "Aaj Tak", "Zee News", "Times of India"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudienceSegment {
    Youth,
    Adult,
    BeautyLifestyle,
    AutoFitness,
    Sports,
    Music,
    Gaming,
    News,
}

impl AudienceSegment {
    pub const ALL: [AudienceSegment; 8] = [
        AudienceSegment::Youth,
        AudienceSegment::Adult,
        AudienceSegment::BeautyLifestyle,
        AudienceSegment::AutoFitness,
        AudienceSegment::Sports,
        AudienceSegment::Music,
        AudienceSegment::Gaming,
        AudienceSegment::News,
    ];

    pub fn clause(self) -> &'static str {
        match self {
            AudienceSegment::Youth => "teens and young adults",
            AudienceSegment::Adult => "adult viewers",
            AudienceSegment::BeautyLifestyle => "beauty and lifestyle enthusiasts",
            AudienceSegment::AutoFitness => "automotive and fitness enthusiasts",
            AudienceSegment::Sports => "sports fans",
            AudienceSegment::Music => "music fans",
            AudienceSegment::Gaming => "gamers",
            AudienceSegment::News => "news followers",
        }
    }

    pub fn terms(self) -> &'static [&'static str] {
        match self {
            AudienceSegment::Youth => &[
                "teen", "teens", "teenager", "student", "students", "school", "gen z", "kpop",
                "k-pop", "idol", "anime", "meme", "fortnite", "roblox",
            ],
            AudienceSegment::Adult => &[
                "parenting", "parents", "finance", "investing", "investment", "stocks",
                "mortgage", "retirement", "career", "economy", "real estate",
            ],
            AudienceSegment::BeautyLifestyle => &[
                "beauty", "makeup", "skincare", "fashion", "outfit", "k-drama", "kdrama",
                "romance", "wedding", "vlog",
            ],
            AudienceSegment::AutoFitness => &[
                "car", "cars", "supercar", "motorsport", "f1", "workout", "gym", "fitness",
                "bodybuilding", "ufc",
            ],
            AudienceSegment::Sports => &[
                "football", "soccer", "nba", "nfl", "baseball", "basketball", "highlights",
                "match", "goal", "league", "olympics", "world cup",
            ],
            AudienceSegment::Music => &[
                "music", "song", "mv", "m/v", "album", "concert", "cover", "official video",
                "lyrics", "performance",
            ],
            AudienceSegment::Gaming => &[
                "game", "games", "gaming", "gameplay", "esports", "minecraft", "speedrun",
                "playthrough",
            ],
            AudienceSegment::News => &[
                "news", "breaking", "report", "election", "president", "government", "interview",
            ],
        }
    }

    /// Segment implied by a resolved category name.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "Music" => Some(AudienceSegment::Music),
            "Sports" => Some(AudienceSegment::Sports),
            "Gaming" => Some(AudienceSegment::Gaming),
            "News & Politics" => Some(AudienceSegment::News),
            "Howto & Style" => Some(AudienceSegment::BeautyLifestyle),
            "Autos & Vehicles" => Some(AudienceSegment::AutoFitness),
            "Education" => Some(AudienceSegment::Youth),
            _ => None,
        }
    }
}

const CATEGORY_NAMES: &[(&str, &str)] = &[
    ("1", "Film & Animation"),
    ("2", "Autos & Vehicles"),
    ("10", "Music"),
    ("15", "Pets & Animals"),
    ("17", "Sports"),
    ("19", "Travel & Events"),
    ("20", "Gaming"),
    ("22", "People & Blogs"),
    ("23", "Comedy"),
    ("24", "Entertainment"),
    ("25", "News & Politics"),
    ("26", "Howto & Style"),
    ("27", "Education"),
    ("28", "Science & Technology"),
    ("29", "Nonprofits & Activism"),
];

/// Resolves numeric platform category ids to display names. Free-text
/// categories pass through trimmed; blank input yields `None`.
pub fn category_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let resolved = CATEGORY_NAMES
        .iter()
        .find(|(id, _)| *id == trimmed)
        .map(|(_, name)| (*name).to_string());
    Some(resolved.unwrap_or_else(|| trimmed.to_string()))
}

/// Case-insensitive term lookup. `haystack` must already be lowercased.
///
/// ASCII terms only match on word boundaries so "live" does not fire on
/// "delivery". Terms with emoji or other scripts match as plain substrings.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    find_term(haystack, term).is_some()
}

/// Byte offset of the first boundary-respecting occurrence of `term`.
pub fn find_term(haystack: &str, term: &str) -> Option<usize> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    if !needle.is_ascii() {
        return haystack.find(&needle);
    }

    let bytes = haystack.as_bytes();
    let mut start = 0usize;
    while let Some(offset) = haystack[start..].find(&needle) {
        let begin = start + offset;
        let end = begin + needle.len();
        let before_ok = begin == 0 || !bytes[begin - 1].is_ascii_alphanumeric();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return Some(begin);
        }
        start = begin + 1;
        while start < haystack.len() && !haystack.is_char_boundary(start) {
            start += 1;
        }
        if start >= haystack.len() {
            break;
        }
    }
    None
}
