/// Lexical marker densities: how often temporal/spatial/affect markers
/// occur per character of input. These feed the concept-weight fusion
/// alongside the taxonomy sub-distributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDensities {
    pub temporal: f64,
    pub spatial: f64,
    pub affect: f64,
}

/// Keeps a single marker hit in a short sentence on the same footing as a
/// scaled taxonomy profile entry.
const DENSITY_GAIN: f64 = 4.0;

static TEMPORAL_MARKERS: &[&str] = &[
    "yesterday", "today", "tomorrow", "morning", "evening", "night",
    "year", "month", "week", "century", "spring", "summer", "autumn",
    "winter", "before", "after", "during",
    "昨日", "今日", "明日", "時間", "時代", "過去", "未来", "朝", "夜",
    "春", "夏", "秋", "冬", "年",
];

static SPATIAL_MARKERS: &[&str] = &[
    "place", "city", "north", "south", "east", "west", "mountain",
    "river", "ocean", "room", "street", "country", "station", "above",
    "below", "near",
    "場所", "都市", "東京", "山", "川", "海", "空", "国", "街", "駅",
    "部屋", "北", "南",
];

static AFFECT_MARKERS: &[&str] = &[
    "happy", "sad", "love", "fear", "angry", "joy", "tears", "smile",
    "laugh", "anxious", "delight", "grief",
    "嬉", "悲", "怒", "楽し", "愛", "恐", "笑", "泣", "喜", "不安", "幸",
];

pub fn marker_densities(text: &str) -> MarkerDensities {
    let folded = text.to_lowercase();
    let chars = folded.chars().count().max(1) as f64;

    let density = |markers: &[&str]| -> f64 {
        let hits: usize = markers.iter().map(|m| folded.matches(m).count()).sum();
        hits as f64 / chars * DENSITY_GAIN
    };

    MarkerDensities {
        temporal: density(TEMPORAL_MARKERS),
        spatial: density(SPATIAL_MARKERS),
        affect: density(AFFECT_MARKERS),
    }
}
