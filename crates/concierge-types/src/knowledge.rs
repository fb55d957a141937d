//! Knowledge profile: the structured record behind the system prompt.
//!
//! The assembled prompt is the sole steering mechanism for the completion
//! gateway. The profile is a fixed record with named, typed fields rather
//! than an open-ended field bag; every replacement supplies the whole
//! record, with omitted fields falling back to the defaults below.

use serde::{Deserialize, Serialize};

const DEFAULT_WELCOME: &str = "Hi there! How can I help you today?";
const DEFAULT_PERSONA: &str = "Riley, a friendly support assistant on the company website";
const DEFAULT_JOB: &str = "You answer visitor questions and help them find the right product.";
const DEFAULT_COMPANY: &str = "The company is a small consumer goods business.";
const DEFAULT_PRODUCT: &str = "It sells everyday household products.";
const DEFAULT_CONTACT: &str = "support@example.com";

/// The mutable template of persona/company/contact facts flattened into the
/// system prompt for every completion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeProfile {
    /// Greeting shown to a visitor when the widget opens.
    pub welcome_message: String,
    /// Who the assistant claims to be.
    pub persona: String,
    pub job_description: String,
    pub company_description: String,
    pub product_description: String,
    /// How a visitor can reach a human.
    pub contact_details: String,
}

impl Default for KnowledgeProfile {
    fn default() -> Self {
        Self {
            welcome_message: DEFAULT_WELCOME.to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            job_description: DEFAULT_JOB.to_string(),
            company_description: DEFAULT_COMPANY.to_string(),
            product_description: DEFAULT_PRODUCT.to_string(),
            contact_details: DEFAULT_CONTACT.to_string(),
        }
    }
}

impl KnowledgeProfile {
    /// Flatten the profile into the system prompt consumed by every
    /// completion call.
    ///
    /// The template order is fixed: persona, job description, company
    /// description, product description, welcome message, contact details.
    pub fn assemble(&self) -> String {
        format!(
            "You are {persona}. {job} {company} {product} \
             Greet new visitors with: \"{welcome}\" \
             If the visitor asks for a human or another way to get in touch, share: {contact} \
             Keep your answers short, friendly, and grounded in the details above.",
            persona = self.persona,
            job = self.job_description,
            company = self.company_description,
            product = self.product_description,
            welcome = self.welcome_message,
            contact = self.contact_details,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> KnowledgeProfile {
        KnowledgeProfile {
            welcome_message: "Welcome to Lumen Soap!".to_string(),
            persona: "Dara, the marketing manager of Lumen".to_string(),
            job_description: "You field product questions.".to_string(),
            company_description: "Lumen is a soap company.".to_string(),
            product_description: "It produces bar soap and detergent.".to_string(),
            contact_details: "call 555-0100".to_string(),
        }
    }

    #[test]
    fn test_assemble_contains_all_fields_verbatim() {
        let profile = sample_profile();
        let prompt = profile.assemble();
        assert!(prompt.contains(&profile.welcome_message));
        assert!(prompt.contains(&profile.persona));
        assert!(prompt.contains(&profile.job_description));
        assert!(prompt.contains(&profile.company_description));
        assert!(prompt.contains(&profile.product_description));
        assert!(prompt.contains(&profile.contact_details));
    }

    #[test]
    fn test_assemble_field_order_is_fixed() {
        let profile = sample_profile();
        let prompt = profile.assemble();
        let positions = [
            prompt.find(&profile.persona).unwrap(),
            prompt.find(&profile.job_description).unwrap(),
            prompt.find(&profile.company_description).unwrap(),
            prompt.find(&profile.product_description).unwrap(),
            prompt.find(&profile.welcome_message).unwrap(),
            prompt.find(&profile.contact_details).unwrap(),
        ];
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_default_profile_assembles() {
        let prompt = KnowledgeProfile::default().assemble();
        assert!(!prompt.is_empty());
        assert!(prompt.contains("Riley"));
    }

    #[test]
    fn test_omitted_fields_fall_back_to_defaults() {
        let profile: KnowledgeProfile =
            serde_json::from_str(r#"{"persona":"Kai, a concierge"}"#).unwrap();
        assert_eq!(profile.persona, "Kai, a concierge");
        assert_eq!(profile.welcome_message, DEFAULT_WELCOME);
        assert_eq!(profile.contact_details, DEFAULT_CONTACT);
    }

    #[test]
    fn test_profile_uses_camel_case_keys() {
        let json = serde_json::to_string(&KnowledgeProfile::default()).unwrap();
        assert!(json.contains("\"welcomeMessage\""));
        assert!(json.contains("\"jobDescription\""));
        assert!(!json.contains("\"welcome_message\""));
    }
}
