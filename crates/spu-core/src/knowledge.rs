//! Static business facts the assistant answers from.
//!
//! The knowledge base is constructed once at startup (either the built-in
//! RevX corpus or a TOML file named in configuration), wrapped in an `Arc`,
//! and only ever read afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SpuError};

/// Root record of the business-fact corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub name: String,
    /// Name the assistant introduces itself with.
    pub assistant_name: String,
    pub description: String,
    pub services: Vec<String>,
    pub specialization: String,
    pub experience: String,
    #[serde(default)]
    pub blogs: Vec<String>,
    #[serde(default)]
    pub ota_partners: Vec<String>,
    #[serde(default)]
    pub meta_search_platforms: Vec<String>,
    // Tables last so the TOML form stays valid when serialized.
    #[serde(default)]
    pub expertise: Expertise,
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
    pub contact: Contact,
}

/// Expertise areas, each with its own service and benefit lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expertise {
    pub software_development: ExpertiseArea,
    pub digital_marketing: ExpertiseArea,
    pub data_science: ExpertiseArea,
    pub ai_solutions: ExpertiseArea,
    pub ota_solutions: ExpertiseArea,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpertiseArea {
    pub services: Vec<String>,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub title: String,
    pub description: String,
    pub results: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: String,
    pub nepal_office: Office,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub address: String,
    pub phone: String,
    pub mobile: String,
    pub whatsapp: String,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::revx()
    }
}

impl KnowledgeBase {
    /// Load a knowledge base from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let kb: KnowledgeBase = toml::from_str(&content)?;
        kb.validate()?;
        info!(
            path = %path.display(),
            services = kb.services.len(),
            case_studies = kb.case_studies.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Reject a corpus whose identity fields are blank.
    ///
    /// Every answer template interpolates these, so a blank value would
    /// surface as broken sentences rather than an error. Lists may be empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("assistant_name", &self.assistant_name),
            ("description", &self.description),
            ("contact.email", &self.contact.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SpuError::Knowledge(format!("`{}` must not be empty", field)));
            }
        }
        Ok(())
    }

    /// The built-in RevX corpus.
    pub fn revx() -> Self {
        Self {
            name: "RevX".to_string(),
            assistant_name: "Spu".to_string(),
            description: "RevX is a comprehensive technology and digital solutions provider specializing in software development, digital marketing, data science, AI solutions, and OTA (Online Travel Agency) revenue optimization. We help businesses maximize their revenue through strategic partnerships with major OTAs and enhanced digital presence.".to_string(),
            services: strings(&[
                "Software Development",
                "SEO",
                "Digital Marketing",
                "OTA Solutions",
                "Revenue Optimization",
                "Brand Enhancement",
                "Meta Search Optimization",
            ]),
            specialization: "comprehensive digital solutions with a strong focus on OTA partnerships and revenue optimization. We help businesses maximize their presence across major travel platforms while strengthening their brand identity".to_string(),
            experience: "years of experience in the travel and hospitality industry, successfully helping numerous businesses optimize their OTA presence and increase revenue through strategic partnerships and digital optimization".to_string(),
            expertise: Expertise {
                software_development: area(
                    &[
                        "Custom Software Solutions",
                        "Web Applications",
                        "Mobile Apps",
                        "API Development",
                        "Cloud Solutions",
                        "Legacy System Modernization",
                    ],
                    &[
                        "Scalable and maintainable solutions",
                        "Improved operational efficiency",
                        "Enhanced user experience",
                        "Cost-effective development",
                    ],
                ),
                digital_marketing: area(
                    &[
                        "Search Engine Optimization (SEO)",
                        "Social Media Marketing",
                        "Content Marketing",
                        "Email Marketing",
                        "PPC Advertising",
                        "Brand Strategy",
                    ],
                    &[
                        "Increased online visibility",
                        "Higher conversion rates",
                        "Better customer engagement",
                        "Improved brand recognition",
                    ],
                ),
                data_science: area(
                    &[
                        "Data Analytics",
                        "Business Intelligence",
                        "Predictive Modeling",
                        "Performance Analytics",
                        "Market Research",
                        "Competitive Analysis",
                    ],
                    &[
                        "Data-driven decision making",
                        "Improved business insights",
                        "Better market understanding",
                        "Enhanced performance tracking",
                    ],
                ),
                ai_solutions: area(
                    &[
                        "AI Integration",
                        "Machine Learning",
                        "Natural Language Processing",
                        "Computer Vision",
                        "Predictive Analytics",
                        "Automation Solutions",
                    ],
                    &[
                        "Automated processes",
                        "Enhanced efficiency",
                        "Improved accuracy",
                        "Cost reduction",
                    ],
                ),
                ota_solutions: area(
                    &[
                        "OTA Channel Management",
                        "Revenue Optimization",
                        "Rate Parity Management",
                        "Inventory Distribution",
                        "Booking Engine Integration",
                        "Performance Analytics",
                    ],
                    &[
                        "Maximized OTA revenue",
                        "Optimized pricing strategy",
                        "Enhanced market presence",
                        "Improved booking conversion",
                    ],
                ),
            },
            case_studies: vec![
                CaseStudy {
                    title: "OTA Revenue Optimization".to_string(),
                    description: "Successfully helped a hotel chain increase their OTA revenue by 40% through strategic partnerships with major platforms like Booking.com, Agoda, and Expedia".to_string(),
                    results: "40% revenue increase, improved market presence, enhanced brand visibility".to_string(),
                },
                CaseStudy {
                    title: "Digital Transformation".to_string(),
                    description: "Implemented comprehensive digital solutions for a hospitality group, including OTA integration and revenue management systems".to_string(),
                    results: "25% increase in direct bookings, 35% improvement in OTA performance".to_string(),
                },
            ],
            contact: Contact {
                email: "info@revx.pro".to_string(),
                phone: "+1 5107340774".to_string(),
                address: "Richmond California, USA".to_string(),
                website: "https://revx.pro".to_string(),
                nepal_office: Office {
                    address: "Sherpa Mall, Durbarmarg, Kathmandu, Nepal".to_string(),
                    phone: "+9779820151343".to_string(),
                    mobile: "+9779856031513".to_string(),
                    whatsapp: "+977985031513".to_string(),
                },
            },
            blogs: strings(&[
                "OTA Revenue Optimization Strategies",
                "Maximizing Your Presence on Booking.com",
                "Effective Rate Parity Management",
                "Digital Marketing for Hospitality",
                "AI in Travel Industry",
                "Meta Search Optimization",
            ]),
            ota_partners: strings(&[
                "Booking.com",
                "Agoda",
                "Ctrip",
                "Trip.com",
                "MakeMyTrip",
                "Expedia",
            ]),
            meta_search_platforms: strings(&[
                "Google Hotel Ads",
                "TripAdvisor",
                "Kayak",
                "Skyscanner",
                "Trivago",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn area(services: &[&str], benefits: &[&str]) -> ExpertiseArea {
    ExpertiseArea {
        services: strings(services),
        benefits: strings(benefits),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_revx() {
        let kb = KnowledgeBase::default();
        assert_eq!(kb.name, "RevX");
        assert_eq!(kb.assistant_name, "Spu");
        assert_eq!(kb.services.len(), 7);
        assert_eq!(kb.services[0], "Software Development");
        assert_eq!(kb.case_studies.len(), 2);
        assert_eq!(kb.contact.email, "info@revx.pro");
    }

    #[test]
    fn test_toml_round_trip_preserves_order() {
        let kb = KnowledgeBase::revx();
        let text = toml::to_string_pretty(&kb).unwrap();
        let back: KnowledgeBase = toml::from_str(&text).unwrap();
        assert_eq!(back.services, kb.services);
        assert_eq!(back.ota_partners, kb.ota_partners);
        assert_eq!(back, kb);
    }

    #[test]
    fn test_builtin_corpus_is_valid() {
        assert!(KnowledgeBase::revx().validate().is_ok());
    }

    #[test]
    fn test_load_rejects_blank_name() {
        let mut kb = KnowledgeBase::revx();
        kb.name = "  ".to_string();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml::to_string_pretty(&kb).unwrap().as_bytes())
            .unwrap();

        let err = KnowledgeBase::load(file.path()).unwrap_err();
        assert!(matches!(err, SpuError::Knowledge(_)));
        assert!(err.to_string().contains("`name`"));
    }

    #[test]
    fn test_validate_reports_contact_email() {
        let mut kb = KnowledgeBase::revx();
        kb.contact.email.clear();
        let err = kb.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Knowledge base error: `contact.email` must not be empty"
        );
    }

    #[test]
    fn test_load_minimal_file_defaults_lists() {
        let content = r#"
name = "Acme"
assistant_name = "Ada"
description = "Acme builds things."
services = ["Widgets", "Gadgets"]
specialization = "widgets"
experience = "a decade"

[contact]
email = "hi@acme.test"
phone = "+1 555"
address = "Springfield"
website = "https://acme.test"

[contact.nepal_office]
address = "Kathmandu"
phone = "+977 1"
mobile = "+977 2"
whatsapp = "+977 3"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let kb = KnowledgeBase::load(file.path()).unwrap();
        assert_eq!(kb.name, "Acme");
        assert_eq!(kb.services, vec!["Widgets", "Gadgets"]);
        assert!(kb.case_studies.is_empty());
        assert!(kb.blogs.is_empty());
        assert!(kb.expertise.data_science.services.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = KnowledgeBase::load(Path::new("/nonexistent/kb.toml")).unwrap_err();
        assert!(matches!(err, crate::error::SpuError::Io(_)));
    }
}
