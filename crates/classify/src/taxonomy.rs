use crate::concept::CONCEPT_KEYS;

/// One category of a classification scheme: a name, the keywords that vote
/// for it, and its fixed sub-distribution over concept keys (declaration
/// order of `CONCEPT_KEYS`, rows sum to 1).
pub struct Category {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub concept_profile: [f64; CONCEPT_KEYS.len()],
}

/// A statically-defined classification scheme. Category declaration order
/// is significant: it is the tie-break for ranking.
pub struct Taxonomy {
    pub name: &'static str,
    pub categories: &'static [Category],
}

impl Taxonomy {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Scheme A: subject domains. Keywords are case-folded; the source corpus
/// is Japanese, so each list carries both English and Japanese forms.
pub static SUBJECT_DOMAINS: Taxonomy = Taxonomy {
    name: "subject",
    categories: &[
        Category {
            name: "science_technology",
            keywords: &[
                "technology", "computer", "system", "data", "research",
                "experiment", "energy", "software", "science", "機械",
                "技術", "科学", "研究", "実験", "開発", "データ", "人工知能",
            ],
            concept_profile: [0.05, 0.05, 0.00, 0.35, 0.25, 0.30],
        },
        Category {
            name: "humanities_history",
            keywords: &[
                "history", "culture", "philosophy", "ancient", "war",
                "religion", "century", "empire", "歴史", "文化", "哲学",
                "戦争", "宗教", "時代", "古代",
            ],
            concept_profile: [0.35, 0.15, 0.10, 0.10, 0.10, 0.20],
        },
        Category {
            name: "society_economy",
            keywords: &[
                "economy", "market", "government", "policy", "company",
                "society", "industry", "trade", "経済", "社会", "政治",
                "会社", "市場", "政府", "産業",
            ],
            concept_profile: [0.10, 0.10, 0.05, 0.20, 0.25, 0.30],
        },
        Category {
            name: "arts_culture",
            keywords: &[
                "art", "music", "novel", "film", "poetry", "design",
                "painting", "theater", "芸術", "音楽", "小説", "映画",
                "絵画", "演劇",
            ],
            concept_profile: [0.10, 0.10, 0.35, 0.20, 0.10, 0.15],
        },
        Category {
            name: "nature_environment",
            keywords: &[
                "nature", "animal", "plant", "climate", "forest", "river",
                "ocean", "weather", "自然", "動物", "植物", "気候", "森",
                "猫", "犬", "鳥",
            ],
            concept_profile: [0.10, 0.35, 0.05, 0.30, 0.15, 0.05],
        },
        Category {
            name: "daily_life",
            keywords: &[
                "food", "home", "family", "school", "travel", "cooking",
                "morning", "shopping", "生活", "家族", "料理", "学校",
                "旅行", "買い物",
            ],
            concept_profile: [0.15, 0.20, 0.20, 0.20, 0.20, 0.05],
        },
    ],
};

/// Scheme B: discourse genres.
pub static DISCOURSE_GENRES: Taxonomy = Taxonomy {
    name: "genre",
    categories: &[
        Category {
            name: "narrative",
            keywords: &[
                "story", "tale", "character", "journey", "once", "物語",
                "昔", "彼", "彼女", "った", "いた",
            ],
            concept_profile: [0.30, 0.15, 0.20, 0.10, 0.20, 0.05],
        },
        Category {
            name: "expository",
            keywords: &[
                "because", "therefore", "example", "definition", "method",
                "result", "説明", "方法", "結果", "理由", "つまり",
            ],
            concept_profile: [0.05, 0.05, 0.00, 0.25, 0.20, 0.45],
        },
        Category {
            name: "dialogic",
            keywords: &[
                "said", "asked", "replied", "conversation", "answer",
                "言った", "聞いた", "答え", "会話", "質問",
            ],
            concept_profile: [0.10, 0.05, 0.30, 0.15, 0.25, 0.15],
        },
        Category {
            name: "argumentative",
            keywords: &[
                "should", "must", "argue", "claim", "however", "opinion",
                "主張", "意見", "しかし", "べき", "必要",
            ],
            concept_profile: [0.05, 0.05, 0.10, 0.15, 0.15, 0.50],
        },
        Category {
            name: "descriptive",
            keywords: &[
                "beautiful", "color", "shape", "scene", "landscape",
                "silent", "風景", "様子", "美しい", "静か",
            ],
            concept_profile: [0.05, 0.35, 0.15, 0.30, 0.05, 0.10],
        },
    ],
};
