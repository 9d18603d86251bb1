//! Prompt construction for case extraction and summarization

use crate::config::InputMode;
use casefile_domain::Unit;
use serde_json::{json, Value};

/// The nested case record the model is asked to fill in
///
/// Every leaf is `null`. In pages mode the record leads with `page_number`
/// and `file_name` so replies can be traced back to their source page.
pub fn case_template(mode: InputMode) -> Value {
    let sections = json!({
        "Clients": {"name": null, "birth_date": null, "section": null},
        "PersonalIdentifyingInformation": {
            "name": null, "birth_date": null, "address": null,
            "phone_number": null, "email": null, "social_security_number": null
        },
        "MedicalHistory": {
            "diagnosis": null, "treatment": null, "medications": null,
            "allergies": null, "surgeries": null, "hospitalizations": null,
            "physicians": null, "therapists": null, "lab_results": null,
            "imaging_results": null, "mental_health_evaluations": null,
            "functional_assessments": null
        },
        "MedicalVisits": [
            {
                "date": null, "physician": null, "location": null,
                "reason_for_visit": null, "notes": null, "recommendations": null
            }
        ],
        "WorkHistory": {
            "employer": null, "job_title": null, "start_date": null, "end_date": null,
            "reason_for_leaving": null, "job_duties": null, "supervisors": null,
            "colleagues": null, "work_environment": null, "performance_reviews": null
        },
        "FamilyHistory": {
            "family_member_name": null, "relationship": null, "health_conditions": null,
            "medications": null, "allergies": null, "surgeries": null,
            "hospitalizations": null, "physicians": null, "therapists": null
        },
        "EducationHistory": {
            "institution": null, "degree": null, "field_of_study": null,
            "graduation_date": null, "courses_taken": null, "academic_achievements": null
        },
        "LegalHistory": {
            "case_number": null, "court": null, "case_type": null,
            "case_status": null, "judge": null, "attorneys": null, "outcome": null
        },
        "FinancialInformation": {
            "income_source": null, "income_amount": null, "expenses": null,
            "assets": null, "liabilities": null, "bank_statements": null, "tax_returns": null
        }
    });

    match (mode, sections) {
        (InputMode::Pages, Value::Object(sections)) => {
            let mut template = serde_json::Map::new();
            template.insert("page_number".to_string(), Value::Null);
            template.insert("file_name".to_string(), Value::Null);
            template.extend(sections);
            Value::Object(template)
        }
        (_, sections) => sections,
    }
}

/// Builds one prompt per unit for a given input mode
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    mode: InputMode,
    template: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            template: format!("{:#}", case_template(mode)),
        }
    }

    /// Input mode this builder renders prompts for
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Build the complete extraction prompt for one unit
    ///
    /// `file_name` is only used in pages mode, where the prompt names the
    /// page and document being read.
    pub fn build(&self, unit: &Unit, file_name: &str) -> String {
        match self.mode {
            InputMode::Html => format!(
                "{}\n\n{}\n\nBegin parsing the HTML content below:\n\n{}",
                HTML_INSTRUCTIONS, self.template, unit.text
            ),
            InputMode::Text => format!(
                "{}\n\n{}\n\nBegin parsing the text content below:\n\n{}",
                TEXT_INSTRUCTIONS, self.template, unit.text
            ),
            InputMode::Pages => format!(
                "You are a disability lawyer reviewing raw text from a client document. \
                 The text was extracted with OCR and PDF tools from **page {page}** of the file **{file}**.\n\n\
                 {instructions}\n\n\
                 This JSON **must include the fields** \"page_number\" and \"file_name\" at the top level \
                 to indicate the source of the information.\n\n\
                 Here is the expected format:\n\n{template}\n\n\
                 Begin parsing the content from page {page} of {file} below:\n\n{text}",
                page = unit.index,
                file = file_name,
                instructions = PAGE_INSTRUCTIONS,
                template = self.template,
                text = unit.text,
            ),
        }
    }
}

/// Build the bullet-point summary prompt over all extracted contents
pub fn build_summary_prompt(contents: &[Value]) -> String {
    format!(
        "{}\n\nHere is the input JSON:\n\n{:#}",
        SUMMARY_INSTRUCTIONS,
        Value::Array(contents.to_vec())
    )
}

const HTML_INSTRUCTIONS: &str = concat!(
    "You will be given an HTML document containing client information. ",
    "Your task is to extract and return a structured JSON object using the following template.\n\n",
    "Each section should be filled out as completely as possible based on the content provided. ",
    "If a field is not present, return it as null. Do not include any commentary or explanation; only return the raw JSON.\n\n",
    "In addition to general structured information (medical history, education, work, legal and financial data), ",
    "you must also extract **detailed medical visit records**.\n\n",
    "Each entry in `MedicalVisits` should include:\n",
    "- `date`: when the visit occurred\n",
    "- `physician`: who was seen (name and credentials if available)\n",
    "- `location`: clinic or facility, if mentioned\n",
    "- `reason_for_visit`: the primary complaint or purpose of the visit\n",
    "- `notes`: observations, symptoms, or other descriptive information from the visit\n",
    "- `recommendations`: instructions, treatments, or next steps advised\n\n",
    "Include all medical visits, even if some fields are missing. Do not guess missing data; ",
    "only extract what is explicitly stated.\n\n",
    "Here is the JSON structure to follow:"
);

const TEXT_INSTRUCTIONS: &str = concat!(
    "You will be given plain text extracted from a client document. ",
    "The text was produced by an OCR model, so spelling may be slightly off and similar symbols may be swapped. ",
    "Your task is to extract and return a structured JSON object using the following template.\n\n",
    "Each section should be filled out as completely as possible based on the content provided. ",
    "If a field is not present, return it as null. Do not include any commentary or explanation; only return the raw JSON.\n\n",
    "Here is the JSON structure to follow:"
);

const PAGE_INSTRUCTIONS: &str = concat!(
    "This text may contain misspellings or formatting issues. Despite that, extract all structured information ",
    "that may be relevant to evaluating a disability case. Document anything related to medical history, ",
    "financial status, legal situations and family context that could help establish eligibility ",
    "or clarify the client's background.\n\n",
    "Your output must be a single structured JSON object in the format below. Fill in as much as you can. ",
    "If a field is missing, set it to null. Do **not** add extra commentary; return valid JSON only."
);

const SUMMARY_INSTRUCTIONS: &str = concat!(
    "You are a summarization assistant. You will receive structured JSON records extracted from a document. ",
    "Summarize the key information from all fields into clear, concise bullet points. ",
    "Focus on the most relevant and unique information and truncate repetitive or verbose entries. ",
    "Do not include any metadata or commentary. Only output bullet points."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sections() {
        let template = case_template(InputMode::Text);
        let obj = template.as_object().unwrap();

        assert_eq!(obj.len(), 9);
        assert!(obj.contains_key("MedicalVisits"));
        assert!(!obj.contains_key("page_number"));
        assert!(template["MedicalVisits"].is_array());
        assert!(template["LegalHistory"]["case_number"].is_null());
    }

    #[test]
    fn test_pages_template_leads_with_provenance() {
        let template = case_template(InputMode::Pages);
        let keys: Vec<_> = template.as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys[0], "page_number");
        assert_eq!(keys[1], "file_name");
        assert_eq!(keys.len(), 11);
    }

    #[test]
    fn test_text_prompt_contains_template_and_unit() {
        let builder = PromptBuilder::new(InputMode::Text);
        let prompt = builder.build(&Unit::chunk(0, "Patient seen on 3/4"), "ignored.pdf");

        assert!(prompt.contains("plain text extracted"));
        assert!(prompt.contains("\"FinancialInformation\""));
        assert!(prompt.ends_with("Patient seen on 3/4"));
        assert!(!prompt.contains("ignored.pdf"));
    }

    #[test]
    fn test_html_prompt_asks_for_visits() {
        let builder = PromptBuilder::new(InputMode::Html);
        let prompt = builder.build(&Unit::chunk(1, "<p>visit</p>"), "x.pdf");

        assert!(prompt.contains("detailed medical visit records"));
        assert!(prompt.contains("reason_for_visit"));
        assert!(prompt.ends_with("<p>visit</p>"));
    }

    #[test]
    fn test_pages_prompt_names_page_and_file() {
        let builder = PromptBuilder::new(InputMode::Pages);
        let prompt = builder.build(&Unit::page(12, "page body"), "records.pdf");

        assert!(prompt.contains("**page 12**"));
        assert!(prompt.contains("**records.pdf**"));
        assert!(prompt.contains("from page 12 of records.pdf"));
        assert!(prompt.contains("\"page_number\""));
        assert_eq!(builder.mode(), InputMode::Pages);
    }

    #[test]
    fn test_summary_prompt_embeds_contents() {
        let contents = vec![json!({"Clients": {"name": "Jane Roe"}})];
        let prompt = build_summary_prompt(&contents);

        assert!(prompt.contains("bullet points"));
        assert!(prompt.contains("\"Jane Roe\""));
        assert!(prompt.trim_end().ends_with(']'));
    }
}
