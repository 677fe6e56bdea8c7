//! Site content document
//!
//! The whole editable copy of the site is one nested JSON document per
//! language. The server treats it as opaque: only the top level has to be
//! an object, everything below is owned by the front-end.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

/// Complete site copy for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SiteContent(#[schema(value_type = Object)] pub Map<String, Value>);

impl SiteContent {
    /// Accept any JSON object as a document
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        match default_document() {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }
}

/// Response of a successful content save
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveContentResponse {
    pub success: bool,
}

fn default_document() -> Value {
    json!({
        "navbar": {
            "links": [
                { "label": "Solutions", "href": "/solutions" },
                { "label": "Industries", "href": "/industries" },
                { "label": "Nos Offres", "href": "/offres" },
                { "label": "Blog", "href": "/blog" }
            ],
            "ctaButton": "Demander une démo"
        },
        "home": {
            "hero": {
                "mainTitle": "Tranquillité d'esprit.",
                "description": "Nous transformons votre flotte en actif sécurisé et rentable.",
                "ctaButton": "Demander une démo",
                "heroVideoPath": "/videos/hero.mp4",
                "presentationVideoPath": "/videos/presentation.mp4"
            },
            "hardware": {
                "sectionLabel": "Hardware Gateway",
                "sectionTitle": "Des outils de",
                "sectionTitleHighlight": "prévision.",
                "products": []
            },
            "software": {
                "sectionLabel": "Plateforme",
                "sectionTitle": "Au-delà du simple",
                "sectionTitleHighlight": "suivi GPS",
                "features": [],
                "bottomHook": "",
                "bottomLink": ""
            },
            "tripleImpact": {
                "sectionLabel": "Triple impact",
                "sectionTitle": "Sécurité, économies,",
                "sectionTitleHighlight": "sérénité.",
                "sectionDescription": "",
                "pillars": []
            },
            "roiCalculator": {
                "sectionLabel": "Simulateur",
                "sectionTitle": "Calculez votre",
                "sectionTitleHighlight": "retour sur investissement",
                "sectionDescription": "",
                "sectors": [],
                "labels": {
                    "fleetSize": "Taille de la flotte",
                    "sector": "Secteur",
                    "fuelCost": "Carburant mensuel",
                    "maintenanceCost": "Maintenance mensuelle",
                    "accidents": "Sinistres par an",
                    "calculateButton": "Calculer",
                    "annualSavings": "Économies annuelles",
                    "solutionCost": "Coût de la solution",
                    "netProfit": "Gain net",
                    "payback": "Retour sur investissement",
                    "roiEstimated": "ROI estimé"
                }
            },
            "offres": {
                "sectionLabel": "Nos offres",
                "sectionTitle": "Des packs adaptés à",
                "sectionTitleHighlight": "votre flotte",
                "sectionDescription": "",
                "packs": [],
                "ctaButton": "Voir toutes les offres"
            }
        },
        "solutions": {
            "hero": { "title": "Solutions", "description": "", "ctaSecondary": "" }
        },
        "industries": {
            "hero": { "label": "Industries", "title": "", "titleHighlight": "", "description": "" },
            "sectors": [],
            "otherSectors": [],
            "finalCta": {
                "title": "",
                "titleHighlight": "",
                "description": "",
                "ctaPrimary": "Demander une démo",
                "ctaSecondary": "Nous contacter"
            }
        },
        "offres": {
            "hero": { "label": "Offres", "title": "", "highlight": "", "description": "" },
            "packs": [],
            "comparison": { "title": "", "highlight": "", "description": "", "headers": [], "rows": [] },
            "services": {
                "installation": { "title": "Installation", "description": "" },
                "training": { "title": "Formation", "description": "" },
                "support": { "label": "", "title": "Support", "description": "" },
                "updates": { "title": "Mises à jour", "description": "" }
            },
            "finalCta": { "title": "", "highlight": "", "description": "", "ctaPrimary": "Demander une démo" }
        },
        "contact": {
            "hero": {
                "label": "Contactez-nous",
                "title": "Prêt à transformer votre flotte ?",
                "description": "Parlons de vos besoins",
                "features": []
            },
            "form": {
                "title": "Demander une démo",
                "description": "",
                "labels": {
                    "firstName": "Prénom",
                    "lastName": "Nom",
                    "email": "Email",
                    "company": "Entreprise",
                    "fleetSize": "Taille de la flotte",
                    "fleetOptions": ["1-10", "11-50", "51-200", "200+"],
                    "message": "Message",
                    "privacy": "",
                    "submit": "Envoyer",
                    "sending": "Envoi...",
                    "success": "Merci, nous vous recontactons rapidement.",
                    "error": "Une erreur est survenue."
                },
                "placeholders": {
                    "firstName": "",
                    "lastName": "",
                    "email": "",
                    "company": "",
                    "message": ""
                }
            },
            "info": {
                "address": { "label": "Adresse", "value": "" },
                "email": { "label": "Email", "value": "" },
                "phone": { "label": "Téléphone", "value": "" }
            }
        },
        "footer": {
            "mission": "Notre Mission",
            "description": "",
            "phone": "",
            "address": "",
            "copyright": "Tous droits réservés.",
            "trademark": "",
            "newsletter": {
                "placeholder": "Votre email",
                "buttonText": "S'abonner"
            },
            "navigation": {
                "technology": { "title": "Technologie", "links": [] },
                "sectors": { "title": "Secteurs", "links": [] },
                "company": { "title": "Entreprise", "links": [] }
            },
            "legal": { "links": [] },
            "social": {
                "facebook": "",
                "instagram": "",
                "linkedin": "",
                "twitter": "",
                "youtube": ""
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_every_top_level_section() {
        let content = SiteContent::default();
        for section in ["navbar", "home", "solutions", "industries", "offres", "contact", "footer"] {
            assert!(content.0.contains_key(section), "missing section {section}");
        }
    }

    #[test]
    fn default_footer_carries_newsletter_copy() {
        let content = SiteContent::default();
        assert_eq!(content.0["footer"]["newsletter"]["buttonText"], json!("S'abonner"));
    }

    #[test]
    fn only_objects_are_documents() {
        assert!(SiteContent::from_value(json!({ "footer": {} })).is_some());
        assert!(SiteContent::from_value(json!([1, 2])).is_none());
        assert!(SiteContent::from_value(Value::Null).is_none());
    }
}
