//! Fixed SEO templates, one per business category.

use crate::config::TemplateKind;

/// Title and description patterns of a business category.
///
/// Patterns use `{businessName}`, `{location}`, `{service}` and `{description}`
/// placeholders, substituted by [`render_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeoTemplate {
    /// Appended to content entry titles
    pub title_suffix: &'static str,

    /// Description of a service with listed benefits
    pub description_template: &'static str,

    pub default_keywords: &'static [&'static str],

    /// schema.org type of the business, used as JSON-LD provider type
    pub business_type: &'static str,

    /// Open Graph image used when nothing more specific applies
    pub default_og_image: &'static str,
}

impl SeoTemplate {
    /// Owned copy of the template keywords.
    pub fn keywords(&self) -> Vec<String> {
        self.default_keywords.iter().map(|k| k.to_string()).collect()
    }
}

pub const THERAPIST: SeoTemplate = SeoTemplate {
    title_suffix: " | {businessName} - Thérapies naturelles",
    description_template:
        "Découvrez notre {service} à {location}. {description} Prenez rendez-vous avec {businessName}.",
    default_keywords: &["thérapie", "bien-être", "soins naturels", "relaxation"],
    business_type: "HealthAndBeautyBusiness",
    default_og_image: "/images/og/therapist-default.jpg",
};

pub const RESTAURANT: SeoTemplate = SeoTemplate {
    title_suffix: " | {businessName} - Restaurant",
    description_template: "{description} Savourez notre {service} chez {businessName} à {location}.",
    default_keywords: &["restaurant", "cuisine", "gastronomie", "réservation"],
    business_type: "Restaurant",
    default_og_image: "/images/og/restaurant-default.jpg",
};

pub const ECOMMERCE: SeoTemplate = SeoTemplate {
    title_suffix: " | {businessName} - Boutique en ligne",
    description_template: "{description} Commandez {service} en ligne sur {businessName}.",
    default_keywords: &["boutique en ligne", "achat", "livraison", "produits"],
    business_type: "Store",
    default_og_image: "/images/og/ecommerce-default.jpg",
};

pub const CONSULTANT: SeoTemplate = SeoTemplate {
    title_suffix: " | {businessName} - Conseil",
    description_template:
        "Accompagnement en {service} : {description} {businessName}, votre partenaire à {location}.",
    default_keywords: &["conseil", "consulting", "accompagnement", "expertise"],
    business_type: "ProfessionalService",
    default_og_image: "/images/og/consultant-default.jpg",
};

impl TemplateKind {
    /// The fixed template record of this kind.
    pub fn template(&self) -> &'static SeoTemplate {
        match self {
            Self::Therapist => &THERAPIST,
            Self::Restaurant => &RESTAURANT,
            Self::Ecommerce => &ECOMMERCE,
            Self::Consultant => &CONSULTANT,
        }
    }
}

/// Substitute `{name}` placeholders in a pattern.
///
/// Placeholders without a matching variable are left as is.
pub fn render_pattern(pattern: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(pattern.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}
