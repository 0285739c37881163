//! Built-in ranker profiles.
//!
//! A profile names the kind of firm being ranked and the categories (stages) a firm may
//! belong to. `RANKER_TYPE` selects which profile the server runs with.

use std::{fmt, str::FromStr};

use crate::server::config::seed::{SeedFirm, IB_SEED_FIRMS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankerType {
    /// Venture capital funds
    Vc,
    /// Investment banks
    Ib,
    /// Hedge funds
    Hf,
}

impl FromStr for RankerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vc" => Ok(Self::Vc),
            "ib" => Ok(Self::Ib),
            "hf" => Ok(Self::Hf),
            other => Err(format!("unknown ranker type {:?}, expected vc, ib or hf", other)),
        }
    }
}

impl fmt::Display for RankerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vc => "vc",
            Self::Ib => "ib",
            Self::Hf => "hf",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    /// Value stored in `firm.stage`
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RankerProfile {
    pub title: &'static str,
    pub entity_name: &'static str,
    pub entity_name_plural: &'static str,
    pub categories: &'static [Category],
    /// Firms inserted by the seed route; empty when the profile ships without seed data
    pub seed: &'static [SeedFirm],
}

impl RankerProfile {
    pub fn is_valid_category(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c.value == value)
    }

    pub fn category_values(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.value.to_string()).collect()
    }
}

static VC_PROFILE: RankerProfile = RankerProfile {
    title: "VC Fund Ranker",
    entity_name: "fund",
    entity_name_plural: "funds",
    categories: &[
        Category {
            value: "early",
            label: "Early Stage",
        },
        Category {
            value: "multi",
            label: "Multi Stage",
        },
        Category {
            value: "late",
            label: "Late Stage",
        },
    ],
    seed: &[],
};

static IB_PROFILE: RankerProfile = RankerProfile {
    title: "IB Firm Ranker",
    entity_name: "investment bank",
    entity_name_plural: "investment banks",
    categories: &[
        Category {
            value: "bulge bracket",
            label: "Bulge Bracket",
        },
        Category {
            value: "elite boutique",
            label: "Elite Boutique",
        },
        Category {
            value: "middle market",
            label: "Middle Market",
        },
    ],
    seed: IB_SEED_FIRMS,
};

static HF_PROFILE: RankerProfile = RankerProfile {
    title: "Hedge Fund Ranker",
    entity_name: "hedge fund",
    entity_name_plural: "hedge funds",
    categories: &[
        Category {
            value: "multi-strategy",
            label: "Multi-Strategy",
        },
        Category {
            value: "long-short equity",
            label: "Long/Short Equity",
        },
        Category {
            value: "quantitative",
            label: "Quantitative",
        },
    ],
    seed: &[],
};

impl RankerType {
    pub fn profile(&self) -> &'static RankerProfile {
        match self {
            Self::Vc => &VC_PROFILE,
            Self::Ib => &IB_PROFILE,
            Self::Hf => &HF_PROFILE,
        }
    }
}
