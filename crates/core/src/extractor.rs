use crate::{ContentKind, ExtractedData, FetchedContent};
use regex::Regex;

pub const PDF_NOT_IMPLEMENTED_NOTE: &str = "PDF parsing not implemented yet";

const CARBON_EMISSIONS_PATTERN: &str =
    r"(?i)carbon emissions(?:[^0-9]*)([0-9,]+) (metric tons|MT|tCO2e)";
const NET_ZERO_PATTERN: &str = r"(?i)net-zero by ([0-9]{4})";

/// Pulls emissions figures and net-zero targets out of fetched content.
#[derive(Debug, Clone)]
pub struct EsgExtractor {
    carbon_emissions: Regex,
    net_zero: Regex,
}

impl EsgExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            carbon_emissions: Regex::new(CARBON_EMISSIONS_PATTERN)?,
            net_zero: Regex::new(NET_ZERO_PATTERN)?,
        })
    }

    pub fn extract(&self, content: &FetchedContent) -> ExtractedData {
        match content.kind {
            ContentKind::Html => self.extract_text(&content.payload),
            ContentKind::Pdf => ExtractedData {
                note: Some(PDF_NOT_IMPLEMENTED_NOTE.to_string()),
                ..Default::default()
            },
        }
    }

    /// First match only for each field; matched text is kept verbatim.
    pub fn extract_text(&self, text: &str) -> ExtractedData {
        let carbon_emissions = self
            .carbon_emissions
            .captures(text)
            .map(|captures| format!("{} {}", &captures[1], &captures[2]));

        let net_zero_target = self
            .net_zero
            .captures(text)
            .map(|captures| captures[1].to_string());

        ExtractedData {
            carbon_emissions,
            net_zero_target,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EsgExtractor {
        match EsgExtractor::new() {
            Ok(extractor) => extractor,
            Err(error) => panic!("patterns should compile: {error}"),
        }
    }

    #[test]
    fn carbon_emissions_keeps_number_and_unit_formatting() {
        let data = extractor().extract(&FetchedContent::html(
            "In 2022 our carbon emissions skyrocketed to 1,234 metric tons across sites.",
        ));

        assert_eq!(data.carbon_emissions.as_deref(), Some("1,234 metric tons"));
        assert_eq!(data.net_zero_target, None);
    }

    #[test]
    fn carbon_emissions_matches_case_insensitively_and_keeps_unit_case() {
        let data = extractor().extract_text("CARBON EMISSIONS: 52,000 tco2e (scope 1)");
        assert_eq!(data.carbon_emissions.as_deref(), Some("52,000 tco2e"));

        let data = extractor().extract_text("Carbon emissions were 870 MT last year");
        assert_eq!(data.carbon_emissions.as_deref(), Some("870 MT"));
    }

    #[test]
    fn only_first_carbon_mention_is_used() {
        let data = extractor().extract_text(
            "carbon emissions fell to 900 tCO2e. Later, carbon emissions reached 1,500 metric tons.",
        );
        assert_eq!(data.carbon_emissions.as_deref(), Some("900 tCO2e"));
    }

    #[test]
    fn carbon_figure_without_known_unit_is_ignored() {
        let data = extractor().extract_text("carbon emissions totalled 4,000 kilograms");
        assert_eq!(data.carbon_emissions, None);
    }

    #[test]
    fn net_zero_year_is_a_string() {
        let data = extractor().extract_text("The company aims to be NET-ZERO BY 2045 and beyond.");
        assert_eq!(data.net_zero_target.as_deref(), Some("2045"));
    }

    #[test]
    fn both_fields_are_extracted_together() {
        let data = extractor().extract_text(
            "the company aims to be net-zero by 2045. carbon emissions skyrocketed to 1,234 metric tons",
        );
        assert_eq!(data.carbon_emissions.as_deref(), Some("1,234 metric tons"));
        assert_eq!(data.net_zero_target.as_deref(), Some("2045"));
        assert_eq!(data.note, None);
        assert!(data.errors.is_empty());
    }

    #[test]
    fn text_without_phrases_yields_empty_data() {
        let data = extractor().extract(&FetchedContent::html("Quarterly revenue grew by 4%."));
        assert!(data.is_empty());
    }

    #[test]
    fn pdf_yields_only_the_note() {
        let content = FetchedContent::pdf("downloads/carbon emissions 1,000 MT net-zero by 2030.pdf");
        let data = extractor().extract(&content);

        assert_eq!(
            data,
            ExtractedData {
                note: Some(PDF_NOT_IMPLEMENTED_NOTE.to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = extractor();
        let content = FetchedContent::html("carbon emissions of 12 MT; net-zero by 2050");
        assert_eq!(extractor.extract(&content), extractor.extract(&content));
    }
}
