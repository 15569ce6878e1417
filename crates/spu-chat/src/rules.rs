//! The built-in rule table.
//!
//! Declaration order is precedence: earlier rules shadow later ones for any
//! input both accept. Short keywords ("hi", "yo", "ai", "ui", "qa", "ci")
//! are anchored on word boundaries so they do not fire inside longer words.

use std::sync::LazyLock;

use regex::Regex;

use crate::classifier::{Matcher, Rule, Template};
use crate::templates as t;

// =============================================================================
// Compiled table (compiled once, cloned per classifier)
// =============================================================================

static RULE_TABLE: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let pattern = |p: &str| Matcher::Pattern(Regex::new(p).expect("Invalid rule regex"));
    let rule = |name: &'static str, matcher: Matcher, template: Template| {
        Rule::new(name, matcher, template)
    };

    vec![
        // Conversational openers and closers come first so "hi, thanks" style
        // chatter is not mistaken for a topic question.
        rule(
            "greeting",
            pattern(r"\b(hello|hi|hey|greetings|howdy|yo|sup|good (morning|afternoon|evening|day))\b"),
            t::greeting,
        ),
        rule(
            "small_talk",
            pattern(r"how are you|how're you|how you doing|how's it going|what's up|what is up|what are you up to"),
            t::small_talk,
        ),
        rule(
            "thanks",
            Matcher::Contains(&["thank you", "thanks", "appreciate it", "grateful"]),
            t::thanks,
        ),
        rule(
            "farewell",
            pattern(r"\b(bye|goodbye)\b|see you|talk to you later|take care"),
            t::farewell,
        ),
        rule(
            "about",
            Matcher::Contains(&[
                "who is revx",
                "what is revx",
                "about revx",
                "tell me about",
                "what does revx do",
                "revx company",
            ]),
            t::about,
        ),
        rule(
            "services",
            Matcher::Contains(&["services", "what do you offer", "offer", "provide", "what can you do"]),
            t::services,
        ),
        rule(
            "specialization",
            Matcher::Contains(&["specialization", "specialize", "specialty", "expertise", "industry"]),
            t::specialization,
        ),
        rule(
            "experience",
            pattern(r"experience|how long|how many years|track record"),
            t::experience,
        ),
        rule(
            "case_studies",
            Matcher::Contains(&[
                "case stud",
                "success stor",
                "client success",
                "testimonial",
                "portfolio",
                "projects",
                "previous work",
            ]),
            t::case_studies,
        ),
        rule(
            "contact",
            pattern(r"contact|\breach\b|get in touch|\bcall\b|\bphone\b|\be-?mail\b|where are you"),
            t::contact,
        ),
        rule(
            "us_office",
            pattern(r"\busa\b|\bus office\b|united states|america|california|richmond"),
            t::us_office,
        ),
        rule(
            "nepal_office",
            Matcher::Contains(&["nepal", "kathmandu", "durbarmarg"]),
            t::nepal_office,
        ),
        rule(
            "blog",
            pattern(r"\bblogs?\b|insight|article|thought leadership|publication"),
            t::blog,
        ),
        // Must precede the broad "revenue" rule.
        rule(
            "revenue_optimization",
            pattern(r"revenue (maximization|optimization|management)|(increase|boost|improve|maximize) (my |our |the )?revenue|pricing strateg"),
            t::revenue_optimization,
        ),
        rule(
            "website",
            pattern(r"\bwebsite\b|\burl\b|web address"),
            t::website,
        ),
        rule(
            "digital_marketing",
            pattern(r"digital marketing|marketing services|\bseo\b|social media|online marketing|digital advertising|content marketing|\bppc\b"),
            t::digital_marketing,
        ),
        rule(
            "ecommerce",
            Matcher::Contains(&[
                "ecommerce",
                "e-commerce",
                "online store",
                "online shop",
                "online retail",
                "digital commerce",
            ]),
            t::ecommerce,
        ),
        rule(
            "development",
            pattern(r"development|programming|coding|software"),
            t::development,
        ),
        // Must precede "ai_solutions" so analytics questions stay here.
        rule(
            "data_science",
            pattern(r"data science|data analytics|big data|predictive analytics|business intelligence|market research"),
            t::data_science,
        ),
        rule(
            "ai_solutions",
            pattern(r"\bai\b|artificial intelligence|machine learning|deep learning|\bnlp\b|natural language|computer vision|automation"),
            t::ai_solutions,
        ),
        rule(
            "revenue",
            pattern(r"revenue|profit|income|earnings|monetiz"),
            t::revenue,
        ),
        rule(
            "ota",
            pattern(r"\botas?\b|online travel|booking\.com|\bagoda\b|\bctrip\b|trip\.com|makemytrip|expedia|travel platform|channel manag|rate parity"),
            t::ota,
        ),
        rule(
            "meta_search",
            pattern(r"meta ?search|google hotel|tripadvisor|\bkayak\b|skyscanner|trivago"),
            t::meta_search,
        ),
        rule(
            "brand",
            pattern(r"\bbrand(ing)?\b"),
            t::brand,
        ),
        rule(
            "mobile_app",
            pattern(r"mobile app|\bapps?\b|\bios\b|android|cross.platform"),
            t::mobile_app,
        ),
        rule(
            "it_consulting",
            pattern(r"\bit consult|consulting|technology advice|tech advice"),
            t::it_consulting,
        ),
        rule(
            "architecture",
            pattern(r"architecture|system design|scalab"),
            t::architecture,
        ),
        rule(
            "cloud",
            pattern(r"\bcloud\b|\baws\b|azure|google cloud|hosting"),
            t::cloud,
        ),
        rule(
            "api",
            pattern(r"\bapis?\b|\brest\b|graphql|web services|integration"),
            t::api,
        ),
        rule(
            "ui_ux",
            pattern(r"\bui\b|\bux\b|user interface|interface design|\bdesign\b|usability"),
            t::ui_ux,
        ),
        rule(
            "quality_assurance",
            pattern(r"\bqa\b|quality assurance|testing|\bbugs?\b"),
            t::quality_assurance,
        ),
        rule(
            "devops",
            pattern(r"devops|\bci\b|\bcd\b|continuous (integration|deployment|delivery)|pipeline|deploy"),
            t::devops,
        ),
        rule(
            "business_intelligence",
            pattern(r"\bbi\b|analytics|reporting|dashboard|data visuali"),
            t::business_intelligence,
        ),
        rule(
            "machine_learning",
            pattern(r"\bml\b|neural net|predictive model|forecast"),
            t::machine_learning,
        ),
        rule(
            "big_data",
            pattern(r"data processing|data warehouse|data lake|large datasets?"),
            t::big_data,
        ),
        rule(
            "digital_transformation",
            pattern(r"digital transformation|digital strategy|moderniz|digitiz"),
            t::digital_transformation,
        ),
    ]
});

/// A fresh copy of the built-in table.
pub fn default_rules() -> Vec<Rule> {
    RULE_TABLE.clone()
}

/// The catch-all rule returned when nothing in the table matches.
pub fn fallback_rule() -> Rule {
    Rule::new("fallback", Matcher::Never, t::fallback)
}
