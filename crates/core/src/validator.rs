use crate::ExtractedData;

pub const MISSING_CARBON_EMISSIONS: &str = "Missing carbon emissions data";
pub const MISSING_NET_ZERO_TARGET: &str = "Missing net-zero target";

/// Appends one error per missing required field. Presence only; values are not checked.
pub fn validate(mut data: ExtractedData) -> ExtractedData {
    if data.carbon_emissions.is_none() {
        data.errors.push(MISSING_CARBON_EMISSIONS.to_string());
    }
    if data.net_zero_target.is_none() {
        data.errors.push(MISSING_NET_ZERO_TARGET.to_string());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::PDF_NOT_IMPLEMENTED_NOTE;

    #[test]
    fn empty_data_gets_both_errors_in_order() {
        let validated = validate(ExtractedData::default());
        assert_eq!(
            validated.errors,
            vec![MISSING_CARBON_EMISSIONS, MISSING_NET_ZERO_TARGET]
        );
    }

    #[test]
    fn complete_data_has_no_errors() {
        let validated = validate(ExtractedData {
            carbon_emissions: Some("1,234 metric tons".to_string()),
            net_zero_target: Some("2045".to_string()),
            ..Default::default()
        });
        assert!(validated.errors.is_empty());
    }

    #[test]
    fn note_does_not_suppress_checks() {
        let validated = validate(ExtractedData {
            note: Some(PDF_NOT_IMPLEMENTED_NOTE.to_string()),
            ..Default::default()
        });
        assert_eq!(validated.note.as_deref(), Some(PDF_NOT_IMPLEMENTED_NOTE));
        assert_eq!(validated.errors.len(), 2);
    }

    #[test]
    fn nonsensical_values_are_accepted() {
        let validated = validate(ExtractedData {
            carbon_emissions: Some(",,, MT".to_string()),
            ..Default::default()
        });
        assert_eq!(validated.errors, vec![MISSING_NET_ZERO_TARGET]);
    }
}
