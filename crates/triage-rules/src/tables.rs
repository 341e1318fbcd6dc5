// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static keyword tables driving the rule classifier.
//!
//! Category rules are ordered: the first rule with any matching term wins,
//! so narrower, more dangerous signals come before broad ones.

use triage_core::{Category, Department};

/// One row of the category table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub terms: &'static [&'static str],
    pub category: Category,
    pub subcategory: &'static str,
    pub confidence: f64,
}

/// Confidence when no category rule matches.
pub const NO_MATCH_CONFIDENCE: f64 = 0.7;

/// Confidence when no rule matches and the text is too short to judge.
pub const INSUFFICIENT_DETAIL_CONFIDENCE: f64 = 0.5;

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        terms: &[
            "electric shock",
            "live wire",
            "exposed wire",
            "hanging wire",
            "electrocuted",
            "sparking",
        ],
        category: Category::Electricity,
        subcategory: "Electrical Hazard",
        confidence: 0.95,
    },
    CategoryRule {
        terms: &["fire", "gas leak", "explosion", "building collapse", "collapsed"],
        category: Category::PublicSafety,
        subcategory: "Emergency Hazard",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &[
            "garbage",
            "trash",
            "waste",
            "rubbish",
            "litter",
            "dustbin",
            "dumping",
            "dumped",
        ],
        category: Category::WasteManagement,
        subcategory: "Garbage Collection",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &[
            "sewage",
            "sewer",
            "drainage",
            "drain",
            "manhole",
            "waterlogging",
            "water logging",
            "gutter",
            "clogged",
        ],
        category: Category::SanitationDrainage,
        subcategory: "Drainage & Sewage",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &["toilet", "restroom", "urinal"],
        category: Category::SanitationDrainage,
        subcategory: "Public Toilets",
        confidence: 0.85,
    },
    CategoryRule {
        terms: &[
            "water supply",
            "no water",
            "water shortage",
            "water pressure",
            "water tanker",
            "tap water",
        ],
        category: Category::WaterSupply,
        subcategory: "Supply Disruption",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &[
            "water leak",
            "leaking pipe",
            "pipeline",
            "pipe burst",
            "burst pipe",
            "contaminated water",
            "dirty water",
            "drinking water",
        ],
        category: Category::WaterSupply,
        subcategory: "Leakage & Quality",
        confidence: 0.85,
    },
    CategoryRule {
        terms: &[
            "power cut",
            "power outage",
            "blackout",
            "no electricity",
            "no power",
            "voltage",
            "transformer",
            "electricity",
        ],
        category: Category::Electricity,
        subcategory: "Power Outage",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &["streetlight", "street light", "street lamp", "lamp post"],
        category: Category::Electricity,
        subcategory: "Street Lighting",
        confidence: 0.85,
    },
    CategoryRule {
        terms: &[
            "pothole",
            "road damage",
            "broken road",
            "damaged road",
            "road repair",
            "speed breaker",
            "footpath",
            "sidewalk",
        ],
        category: Category::RoadsInfrastructure,
        subcategory: "Road Damage",
        confidence: 0.9,
    },
    CategoryRule {
        terms: &["bridge", "flyover", "construction", "crack"],
        category: Category::RoadsInfrastructure,
        subcategory: "Structural Damage",
        confidence: 0.8,
    },
    CategoryRule {
        terms: &[
            "theft",
            "robbery",
            "stolen",
            "harassment",
            "assault",
            "crime",
            "violence",
            "unsafe",
            "chain snatching",
        ],
        category: Category::PublicSafety,
        subcategory: "Crime & Harassment",
        confidence: 0.85,
    },
    CategoryRule {
        terms: &["stray dog", "stray animal", "stray cattle", "dog bite"],
        category: Category::PublicHealth,
        subcategory: "Stray Animals",
        confidence: 0.8,
    },
    CategoryRule {
        terms: &[
            "mosquito", "dengue", "malaria", "disease", "epidemic", "hospital", "clinic",
        ],
        category: Category::PublicHealth,
        subcategory: "Disease Control",
        confidence: 0.8,
    },
    CategoryRule {
        terms: &[
            "bus",
            "bus stop",
            "traffic",
            "traffic signal",
            "parking",
            "metro",
            "auto rickshaw",
            "taxi",
        ],
        category: Category::PublicTransport,
        subcategory: "Traffic & Transit",
        confidence: 0.75,
    },
    CategoryRule {
        terms: &[
            "pollution",
            "smoke",
            "air quality",
            "burning",
            "noise",
            "loudspeaker",
            "dust",
        ],
        category: Category::Environment,
        subcategory: "Pollution",
        confidence: 0.75,
    },
    CategoryRule {
        terms: &["park", "playground", "garden", "tree", "fallen tree"],
        category: Category::Environment,
        subcategory: "Parks & Green Spaces",
        confidence: 0.7,
    },
    CategoryRule {
        terms: &[
            "certificate",
            "license",
            "permit",
            "office",
            "official",
            "staff",
            "bribe",
            "corruption",
            "application",
            "pension",
        ],
        category: Category::AdministrativeServices,
        subcategory: "Service Delivery",
        confidence: 0.65,
    },
];

/// Department table, checked in order. Mirrors the category order so the
/// two tables agree on mixed complaints.
pub const DEPARTMENT_RULES: &[(&[&str], Department)] = &[
    (
        &["electric shock", "live wire", "exposed wire", "hanging wire", "electrocuted"],
        Department::Electricity,
    ),
    (
        &["fire", "gas leak", "explosion", "police", "theft", "robbery", "assault"],
        Department::Police,
    ),
    (
        &[
            "garbage", "trash", "waste", "rubbish", "litter", "dustbin", "sewage", "sewer",
            "drainage", "drain", "manhole", "toilet",
        ],
        Department::Sanitation,
    ),
    (
        &["water supply", "no water", "pipeline", "tap water", "drinking water", "water leak"],
        Department::WaterSupply,
    ),
    (
        &["electricity", "power cut", "no power", "transformer", "voltage", "streetlight", "street light"],
        Department::Electricity,
    ),
    (
        &["pothole", "road", "footpath", "sidewalk", "bridge", "flyover", "construction"],
        Department::PublicWorks,
    ),
    (
        &["harassment", "crime", "violence", "unsafe", "stolen"],
        Department::Police,
    ),
    (
        &["mosquito", "dengue", "malaria", "disease", "hospital", "clinic", "stray dog", "dog bite"],
        Department::Health,
    ),
    (
        &["bus", "traffic", "parking", "metro", "taxi"],
        Department::Transport,
    ),
    (
        &["pollution", "smoke", "noise", "park", "garden", "tree"],
        Department::Environment,
    ),
    (
        &["certificate", "license", "permit", "bribe", "corruption", "pension"],
        Department::Administrative,
    ),
];

pub const URGENT_TERMS: &[&str] = &[
    "emergency",
    "urgent",
    "urgently",
    "immediately",
    "danger",
    "dangerous",
    "life threatening",
    "accident",
    "electric shock",
    "live wire",
    "electrocuted",
    "fire",
    "gas leak",
    "explosion",
    "collapse",
    "collapsed",
    "injured",
    "injury",
    "death",
    "died",
];

pub const HIGH_TERMS: &[&str] = &[
    "serious",
    "severe",
    "major",
    "hazard",
    "overflowing",
    "overflow",
    "blocked",
    "broken",
    "unsafe",
    "sick",
    "disease",
    "dengue",
    "flooding",
    "flooded",
    "contaminated",
    "no water",
    "no electricity",
    "no power",
    "weeks",
];

pub const LOW_TERMS: &[&str] = &[
    "minor",
    "small",
    "slight",
    "suggestion",
    "request",
    "cosmetic",
    "whenever possible",
];

pub const NEGATIVE_TERMS: &[&str] = &[
    "not",
    "no",
    "never",
    "worst",
    "terrible",
    "horrible",
    "angry",
    "frustrated",
    "frustrating",
    "disgusting",
    "pathetic",
    "bad",
    "poor",
    "failed",
    "unacceptable",
    "ignored",
    "useless",
    "fed up",
    "annoyed",
    "careless",
];

pub const POSITIVE_TERMS: &[&str] = &[
    "thank",
    "thanks",
    "good",
    "great",
    "appreciate",
    "appreciated",
    "excellent",
    "happy",
    "resolved",
    "helpful",
    "grateful",
    "pleased",
];
