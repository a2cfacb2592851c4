use serde::Serialize;

pub const CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TemplateOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: u32,
    pub features: &'static [&'static str],
    pub popular: bool,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FeatureOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: u32,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BundleOffer {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: u32,
    pub includes: &'static [&'static str],
}

pub const TEMPLATES: &[TemplateOffer] = &[
    TemplateOffer {
        id: "template-modern-pro",
        name: "Modern Pro",
        description: "Two-column layout with a bold header, tuned for tech roles",
        price_cents: 499,
        features: &["ATS friendly", "Two-column layout", "Custom accent colours"],
        popular: true,
    },
    TemplateOffer {
        id: "template-executive",
        name: "Executive",
        description: "Conservative single column for senior and management roles",
        price_cents: 699,
        features: &["ATS friendly", "Leadership summary block", "Serif typography"],
        popular: false,
    },
    TemplateOffer {
        id: "template-creative",
        name: "Creative",
        description: "Portfolio-style layout with project highlights",
        price_cents: 599,
        features: &["Project gallery", "Skill bars", "Custom accent colours"],
        popular: false,
    },
];

pub const FEATURES: &[FeatureOffer] = &[
    FeatureOffer {
        id: "feature-ai-suggestions",
        name: "AI Content Suggestions",
        description: "Bullet point suggestions for every section",
        price_cents: 299,
    },
    FeatureOffer {
        id: "feature-cover-letter",
        name: "Cover Letter Builder",
        description: "Matching cover letter generated from your resume",
        price_cents: 399,
    },
    FeatureOffer {
        id: "feature-career-roadmap",
        name: "Career Roadmap",
        description: "Milestone plan toward your selected job role",
        price_cents: 349,
    },
];

pub static BUNDLE: BundleOffer = BundleOffer {
    id: "bundle-complete",
    name: "Complete Bundle",
    description: "Every premium template and feature",
    price_cents: 1999,
    includes: &[
        "template-modern-pro",
        "template-executive",
        "template-creative",
        "feature-ai-suggestions",
        "feature-cover-letter",
        "feature-career-roadmap",
    ],
};

/// Anything that can be unlocked through checkout.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogItem {
    Template(&'static TemplateOffer),
    Feature(&'static FeatureOffer),
    Bundle(&'static BundleOffer),
}

impl CatalogItem {
    pub fn id(&self) -> &'static str {
        match self {
            CatalogItem::Template(t) => t.id,
            CatalogItem::Feature(f) => f.id,
            CatalogItem::Bundle(b) => b.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogItem::Template(t) => t.name,
            CatalogItem::Feature(f) => f.name,
            CatalogItem::Bundle(b) => b.name,
        }
    }

    pub fn price_cents(&self) -> u32 {
        match self {
            CatalogItem::Template(t) => t.price_cents,
            CatalogItem::Feature(f) => f.price_cents,
            CatalogItem::Bundle(b) => b.price_cents,
        }
    }

    /// Ids unlocked by buying this item. A bundle unlocks itself plus its contents.
    pub fn unlocks(&self) -> Vec<&'static str> {
        match self {
            CatalogItem::Bundle(b) => std::iter::once(b.id)
                .chain(b.includes.iter().copied())
                .collect(),
            other => vec![other.id()],
        }
    }
}

pub fn find_item(id: &str) -> Option<CatalogItem> {
    if let Some(t) = TEMPLATES.iter().find(|t| t.id == id) {
        return Some(CatalogItem::Template(t));
    }
    if let Some(f) = FEATURES.iter().find(|f| f.id == id) {
        return Some(CatalogItem::Feature(f));
    }
    (BUNDLE.id == id).then_some(CatalogItem::Bundle(&BUNDLE))
}

/// Sum of the bundled items' individual prices minus the bundle price.
pub fn bundle_savings_cents() -> u32 {
    let individual: u32 = BUNDLE
        .includes
        .iter()
        .filter_map(|id| find_item(id))
        .map(|item| item.price_cents())
        .sum();
    individual.saturating_sub(BUNDLE.price_cents)
}

#[derive(Debug, Serialize)]
pub struct PricingCatalog {
    pub currency: &'static str,
    pub templates: &'static [TemplateOffer],
    pub features: &'static [FeatureOffer],
    pub bundle: BundleOffer,
    pub bundle_savings_cents: u32,
}

pub fn pricing_catalog() -> PricingCatalog {
    PricingCatalog {
        currency: CURRENCY,
        templates: TEMPLATES,
        features: FEATURES,
        bundle: BUNDLE,
        bundle_savings_cents: bundle_savings_cents(),
    }
}
