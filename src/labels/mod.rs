//! Classifier label to display record mapping.
//!
//! The classifier answers with a raw label from a small closed vocabulary.
//! This module turns that label into what the history shows: a readable
//! name, a severity tier and a fixed description. The mapping is total:
//! labels outside the vocabulary keep their raw text, get the "Unknown"
//! severity and a generic description.
//!
//! # Example
//!
//! ```
//! use skinscan::labels::map_label;
//!
//! let diagnosis = map_label("Bruises");
//! assert_eq!(diagnosis.name, "Bruise");
//! assert_eq!(diagnosis.severity, "Normal Wound");
//!
//! let unknown = map_label("Wart");
//! assert_eq!(unknown.name, "Wart");
//! assert_eq!(unknown.severity, "Unknown");
//! ```

mod table;
mod types;

pub use table::{default_table, LabelTable};
pub use types::*;

/// Map a raw classifier label with the embedded label table.
pub fn map_label(raw_label: &str) -> Diagnosis {
    default_table().map(raw_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mapping(raw: &str, name: &str, severity: &str, description: &str) {
        let d = map_label(raw);
        assert_eq!(d.name, name, "name for {:?}", raw);
        assert_eq!(d.severity, severity, "severity for {:?}", raw);
        assert_eq!(d.description, description, "description for {:?}", raw);
    }

    #[test]
    fn test_known_vocabulary() {
        assert_mapping(
            "Normal Skin",
            "Healthy Skin",
            "No severity",
            "Skin appears to be healthy and normal.",
        );
        assert_mapping(
            "Bruises",
            "Bruise",
            "Normal Wound",
            "A bruise detected; mild and manageable.",
        );
        assert_mapping(
            "Abrasions",
            "Abrasion",
            "Moderate Wound",
            "Detected abrasion with moderate severity.",
        );
        assert_mapping(
            "Cuts",
            "Cut",
            "Moderate Wound",
            "Detected cut with moderate severity.",
        );
        assert_mapping(
            "Diabetic Wounds",
            "Diabetic Wound",
            "Dangerous Wound",
            "A diabetic wound detected; needs immediate care.",
        );
    }

    #[test]
    fn test_unknown_label_passes_through() {
        assert_mapping("Wart", "Wart", "Unknown", "No detailed description available.");
    }

    #[test]
    fn test_match_is_case_sensitive_and_exact() {
        assert_eq!(map_label("bruises").severity, "Unknown");
        assert_eq!(map_label("bruises").name, "bruises");
        assert_eq!(map_label(" Cuts").severity, "Unknown");
        assert_eq!(map_label("Cuts ").name, "Cuts ");
    }

    #[test]
    fn test_empty_label_is_unknown() {
        assert_mapping("", "", "Unknown", "No detailed description available.");
    }
}
