//! Response templates, one per rule.
//!
//! Every template reads only from the knowledge base and the compose
//! context. List-valued fields may be empty; the affected clause is dropped
//! rather than rendering a dangling "including ." fragment.

use spu_core::knowledge::ExpertiseArea;
use spu_core::KnowledgeBase;

use crate::composer::ComposeContext;

// =============================================================================
// Helpers
// =============================================================================

fn join(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}

fn join_lower(items: &[String]) -> Option<String> {
    join(items).map(|s| s.to_lowercase())
}

/// "`lead` including a, b, c. `benefit_lead` x, y." with empty lists omitted.
fn area_answer(lead: String, area: &ExpertiseArea, benefit_lead: &str) -> String {
    let mut out = lead;
    if let Some(services) = join(&area.services) {
        out.push_str(" including ");
        out.push_str(&services);
    }
    out.push('.');
    if let Some(benefits) = join_lower(&area.benefits) {
        out.push_str(&format!(" {} {}.", benefit_lead, benefits));
    }
    out
}

// =============================================================================
// Conversational
// =============================================================================

pub(crate) fn greeting(kb: &KnowledgeBase, ctx: &ComposeContext) -> String {
    format!(
        "{}! I'm {}, {}'s AI assistant. How can I help you today? Feel free to ask about our services, success stories, or how to get in touch with us.",
        ctx.salutation(),
        kb.assistant_name,
        kb.name
    )
}

pub(crate) fn small_talk(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "I'm doing great, thank you for asking! I'm here to help you learn more about {}. What would you like to know?",
        kb.name
    )
}

pub(crate) fn thanks(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "You're welcome! Is there anything else you'd like to know about {}?",
        kb.name
    )
}

pub(crate) fn farewell(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "Thank you for your interest in {}! If you need any further assistance, don't hesitate to reach out. Have a great day!",
        kb.name
    )
}

pub(crate) fn fallback(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "I'm not sure I understand your question. You can ask me about {}'s services, case studies, contact information, or specific topics like digital marketing, e-commerce, development, or revenue optimization. How else can I assist you?",
        kb.name
    )
}

// =============================================================================
// Company facts
// =============================================================================

pub(crate) fn about(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    kb.description.clone()
}

pub(crate) fn services(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    match join(&kb.services) {
        Some(list) => format!(
            "{} offers a comprehensive suite of services including: {}.",
            kb.name, list
        ),
        None => format!("{} offers a comprehensive suite of services.", kb.name),
    }
}

pub(crate) fn specialization(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!("{} specializes in {}.", kb.name, kb.specialization)
}

pub(crate) fn experience(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!("{} has {}.", kb.name, kb.experience)
}

pub(crate) fn case_studies(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    if kb.case_studies.is_empty() {
        return format!("{} has not published any success stories yet.", kb.name);
    }
    let stories = kb
        .case_studies
        .iter()
        .map(|c| format!("{}: {}. Results: {}.", c.title, c.description, c.results))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Here are some of {}'s success stories:\n\n{}", kb.name, stories)
}

pub(crate) fn contact(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    let c = &kb.contact;
    let nepal = &c.nepal_office;
    format!(
        "You can contact {} at:\n\nHeadquarters:\nEmail: {}\nPhone: {}\nAddress: {}\n\nNepal Office:\nPhone: {}\nMobile: {}\nWhatsApp: {}\nAddress: {}",
        kb.name, c.email, c.phone, c.address, nepal.phone, nepal.mobile, nepal.whatsapp, nepal.address
    )
}

pub(crate) fn us_office(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{}'s headquarters is located in {}. You can reach the team at {} or {}.",
        kb.name, kb.contact.address, kb.contact.phone, kb.contact.email
    )
}

pub(crate) fn nepal_office(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    let nepal = &kb.contact.nepal_office;
    format!(
        "{}'s Nepal office is located at {}. You can reach them at {}, on mobile at {}, or on WhatsApp at {}.",
        kb.name, nepal.address, nepal.phone, nepal.mobile, nepal.whatsapp
    )
}

pub(crate) fn blog(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    if kb.blogs.is_empty() {
        return format!("{} shares insights through their blog.", kb.name);
    }
    let topics = kb
        .blogs
        .iter()
        .map(|b| format!("- {}", b))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "{} shares insights through their blog, covering topics such as:\n\n{}",
        kb.name, topics
    )
}

pub(crate) fn website(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "You can visit {}'s website at {} to learn more about our services and solutions.",
        kb.name, kb.contact.website
    )
}

// =============================================================================
// Expertise areas
// =============================================================================

pub(crate) fn revenue_optimization(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} specializes in revenue optimization through strategic OTA partnerships and digital solutions. We help businesses maximize their revenue by optimizing pricing strategies, managing rate parity, and enhancing their presence across major travel platforms.",
        kb.name
    )
}

pub(crate) fn digital_marketing(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    area_answer(
        format!("{} offers comprehensive digital marketing services", kb.name),
        &kb.expertise.digital_marketing,
        "These services help businesses achieve",
    )
}

pub(crate) fn ecommerce(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} provides comprehensive e-commerce solutions including custom online store development, payment gateway integration, inventory management systems, and digital marketing strategies to drive sales and enhance customer experience.",
        kb.name
    )
}

pub(crate) fn development(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    area_answer(
        format!("{} provides comprehensive development services", kb.name),
        &kb.expertise.software_development,
        "These solutions offer",
    )
}

pub(crate) fn data_science(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    area_answer(
        format!("{} delivers data science solutions", kb.name),
        &kb.expertise.data_science,
        "These services help businesses achieve",
    )
}

pub(crate) fn ai_solutions(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    area_answer(
        format!("{} offers AI solutions", kb.name),
        &kb.expertise.ai_solutions,
        "These services provide",
    )
}

pub(crate) fn revenue(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{}'s revenue maximization strategies focus on optimizing your OTA presence, implementing dynamic pricing, managing rate parity, and leveraging data analytics to increase bookings and revenue across all channels.",
        kb.name
    )
}

pub(crate) fn ota(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    let area = &kb.expertise.ota_solutions;
    let mut out = format!("{} offers OTA solutions", kb.name);
    if let Some(services) = join(&area.services) {
        out.push_str(" including ");
        out.push_str(&services);
    }
    out.push('.');
    if let Some(partners) = join(&kb.ota_partners) {
        out.push_str(&format!(
            " We work with major platforms including {}.",
            partners
        ));
    }
    if let Some(benefits) = join_lower(&area.benefits) {
        out.push_str(&format!(" These services help you achieve {}.", benefits));
    }
    out
}

pub(crate) fn meta_search(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    match join(&kb.meta_search_platforms) {
        Some(platforms) => format!(
            "{} provides meta search optimization across platforms such as {}, helping properties increase visibility and drive direct bookings.",
            kb.name, platforms
        ),
        None => format!(
            "{} provides meta search optimization to help properties increase visibility and drive direct bookings.",
            kb.name
        ),
    }
}

pub(crate) fn brand(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} helps strengthen your brand through consistent positioning across OTAs, meta search, and your own channels, improving brand visibility and recognition with travelers.",
        kb.name
    )
}

// =============================================================================
// Technology topics
// =============================================================================

pub(crate) fn mobile_app(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} develops native and cross-platform mobile applications for iOS and Android, with a focus on performance, usability, and seamless integration with your existing systems.",
        kb.name
    )
}

pub(crate) fn it_consulting(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} offers IT consulting services that help businesses align technology with their goals, from technology assessments and roadmaps to vendor selection and implementation guidance.",
        kb.name
    )
}

pub(crate) fn architecture(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} designs scalable software architectures built for reliability and growth, covering system design, integration patterns, and modernization of legacy platforms.",
        kb.name
    )
}

pub(crate) fn cloud(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} provides cloud solutions including migration, cloud-native development, and infrastructure management on leading platforms such as AWS, Azure, and Google Cloud.",
        kb.name
    )
}

pub(crate) fn api(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} builds and integrates APIs, including REST and GraphQL services, to connect your systems with booking engines, channel managers, and third-party platforms.",
        kb.name
    )
}

pub(crate) fn ui_ux(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} offers UI/UX design services focused on intuitive interfaces and engaging user experiences that turn visitors into customers.",
        kb.name
    )
}

pub(crate) fn quality_assurance(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} provides quality assurance and testing services, including manual and automated testing, to make sure your software is reliable and performs as expected.",
        kb.name
    )
}

pub(crate) fn devops(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} implements DevOps practices including continuous integration and continuous deployment pipelines, infrastructure automation, and monitoring to speed up delivery.",
        kb.name
    )
}

pub(crate) fn business_intelligence(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} delivers business intelligence solutions with dashboards, reporting, and data visualization that turn your booking and revenue data into actionable insights.",
        kb.name
    )
}

pub(crate) fn machine_learning(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} applies machine learning to problems such as demand forecasting, dynamic pricing, and predictive modeling to help you make smarter decisions.",
        kb.name
    )
}

pub(crate) fn big_data(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} helps businesses manage large volumes of data with data processing pipelines, data warehouses, and data lakes that support analytics at scale.",
        kb.name
    )
}

pub(crate) fn digital_transformation(kb: &KnowledgeBase, _: &ComposeContext) -> String {
    format!(
        "{} guides digital transformation initiatives, modernizing processes and systems so your business can compete effectively in a digital-first market.",
        kb.name
    )
}

// =============================================================================
// Tests
// =============================================================================
