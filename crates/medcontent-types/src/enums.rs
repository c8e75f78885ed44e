//! Closed enumerations used by content records.
//!
//! Records keep the authored string for every coded field (category, status,
//! relationship, ...). The enums in this module are the typed view of those
//! strings: `parse` returns `None` for values outside the enumeration, which
//! is how validation detects them.

/// Declares a closed string enumeration with `ALL`, `parse`, `as_str`,
/// `Display` and (with the `serde` feature) string serialization.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every value of the enumeration, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            /// Parses the authored string form.
            ///
            /// Returns `None` if the value is not part of the enumeration.
            /// Matching is exact (case-sensitive).
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Returns the authored string form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&value).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} '{}'",
                        stringify!($name),
                        value
                    ))
                })
            }
        }
    };
}

string_enum! {
    /// Discriminator of the content family a record belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use medcontent_types::ContentKind;
    ///
    /// assert_eq!(ContentKind::parse("pain-management"), Some(ContentKind::PainManagement));
    /// assert_eq!(ContentKind::Condition.as_str(), "condition");
    /// ```
    pub enum ContentKind {
        /// Autoimmune condition entry.
        Condition => "condition",
        /// Pain-management entry (acute, chronic, interventional, ...).
        PainManagement => "pain-management",
        /// Medical ethics topic.
        Ethics => "ethics",
        /// Leveled educational content.
        Educational => "educational",
        /// Medication monograph.
        Medication => "medication",
        /// Pain-assessment scale.
        AssessmentScale => "assessment-scale",
    }
}

string_enum! {
    /// Category of an autoimmune condition entry.
    pub enum AutoimmuneCategory {
        /// Multisystem disease (SLE, APS, MCTD).
        Systemic => "systemic",
        /// Disease targeting a single organ.
        OrganSpecific => "organ-specific",
        /// Connective tissue disease.
        ConnectiveTissue => "connective-tissue",
        /// Inflammatory joint disease.
        Rheumatologic => "rheumatologic",
        /// Vasculitis.
        Vasculitic => "vasculitic",
        /// Neurologic autoimmunity.
        Neurologic => "neurologic",
        /// Endocrine autoimmunity.
        Endocrine => "endocrine",
        /// Gastrointestinal autoimmunity.
        Gastrointestinal => "gastrointestinal",
        /// Cutaneous autoimmunity.
        Dermatologic => "dermatologic",
    }
}

string_enum! {
    /// Category of a pain-management entry.
    pub enum PainCategory {
        /// Acute pain.
        AcutePain => "acute-pain",
        /// Chronic pain.
        ChronicPain => "chronic-pain",
        /// Neuropathic pain.
        Neuropathic => "neuropathic",
        /// Cancer-related pain.
        CancerPain => "cancer-pain",
        /// Musculoskeletal pain.
        MusculoskeletalPain => "musculoskeletal-pain",
        /// Headache disorders.
        Headache => "headache",
        /// Interventional procedures.
        Interventional => "interventional",
        /// Pharmacologic management.
        Pharmacologic => "pharmacologic",
        /// Non-pharmacologic management.
        NonPharmacologic => "non-pharmacologic",
    }
}

string_enum! {
    /// Category of a medical ethics topic.
    pub enum EthicsCategory {
        /// Core principles (autonomy, beneficence, ...).
        Principles => "principles",
        /// Informed consent and capacity.
        InformedConsent => "informed-consent",
        /// End-of-life decision making.
        EndOfLife => "end-of-life",
        /// Research ethics.
        ResearchEthics => "research-ethics",
        /// Confidentiality and privacy.
        Confidentiality => "confidentiality",
        /// Allocation of scarce resources.
        ResourceAllocation => "resource-allocation",
        /// Professionalism.
        Professionalism => "professionalism",
        /// Reproductive ethics.
        ReproductiveEthics => "reproductive-ethics",
        /// Pediatric ethics.
        PediatricEthics => "pediatric-ethics",
    }
}

string_enum! {
    /// Type of a leveled educational content record.
    pub enum ContentType {
        /// Anatomical structure.
        Structure => "structure",
        /// Body system.
        System => "system",
        /// Physiological pathway.
        Pathway => "pathway",
        /// Physiological process.
        Process => "process",
        /// Clinical condition.
        Condition => "condition",
        /// Abstract concept.
        Concept => "concept",
        /// General topic.
        Topic => "topic",
    }
}

string_enum! {
    /// Therapeutic area of a medication.
    pub enum TherapeuticArea {
        /// Cardiovascular drugs.
        Cardiovascular => "cardiovascular",
        /// Endocrine and metabolic drugs.
        Endocrine => "endocrine",
        /// Respiratory drugs.
        Respiratory => "respiratory",
        /// Neurologic drugs.
        Neurologic => "neurologic",
        /// Psychiatric drugs.
        Psychiatric => "psychiatric",
        /// Gastrointestinal drugs.
        Gastrointestinal => "gastrointestinal",
        /// Anti-infectives.
        InfectiousDisease => "infectious-disease",
        /// Analgesics.
        Analgesic => "analgesic",
        /// Antineoplastics.
        Oncology => "oncology",
        /// Renal drugs.
        Renal => "renal",
        /// Hematologic drugs.
        Hematologic => "hematologic",
        /// Immunomodulators.
        Immunologic => "immunologic",
    }
}

string_enum! {
    /// Category of a pain-assessment scale.
    pub enum ScaleCategory {
        /// Single-dimension intensity scale (NRS, VAS, FACES).
        Unidimensional => "unidimensional",
        /// Multidimensional instrument (Brief Pain Inventory, McGill).
        Multidimensional => "multidimensional",
        /// Observational scale for non-verbal patients (FLACC, PAINAD).
        Behavioral => "behavioral",
        /// Neuropathic pain screening (DN4, LANSS).
        NeuropathicScreening => "neuropathic-screening",
        /// Functional impact questionnaire (Oswestry).
        Functional => "functional",
    }
}

string_enum! {
    /// Editorial lifecycle status of a record.
    pub enum ContentStatus {
        /// Being authored.
        Draft => "draft",
        /// Awaiting review.
        Review => "review",
        /// Published.
        Published => "published",
    }
}

string_enum! {
    /// Relationship named by a cross-reference.
    pub enum RelationshipType {
        /// The target is broader than this record.
        Parent => "parent",
        /// The target is narrower than this record.
        Child => "child",
        /// The target shares a parent with this record.
        Sibling => "sibling",
        /// Loosely related content.
        Related => "related",
        /// Further reading.
        SeeAlso => "see-also",
    }
}

string_enum! {
    /// Clinical relevance tag.
    pub enum ClinicalRelevance {
        /// Low relevance.
        Low => "low",
        /// Medium relevance.
        Medium => "medium",
        /// High relevance.
        High => "high",
        /// Critical relevance.
        Critical => "critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_conversion() {
        assert_eq!(ContentKind::parse("condition"), Some(ContentKind::Condition));
        assert_eq!(
            ContentKind::parse("assessment-scale"),
            Some(ContentKind::AssessmentScale)
        );
        assert_eq!(ContentKind::parse("Condition"), None);
        assert_eq!(ContentKind::Ethics.as_str(), "ethics");
    }

    #[test]
    fn test_category_enumerations() {
        assert_eq!(
            AutoimmuneCategory::parse("rheumatologic"),
            Some(AutoimmuneCategory::Rheumatologic)
        );
        assert_eq!(PainCategory::parse("cancer-pain"), Some(PainCategory::CancerPain));
        assert_eq!(EthicsCategory::parse("end-of-life"), Some(EthicsCategory::EndOfLife));
        assert_eq!(ContentType::parse("pathway"), Some(ContentType::Pathway));
        assert_eq!(PainCategory::parse("acute"), None);
    }

    #[test]
    fn test_all_round_trips_through_parse() {
        for value in TherapeuticArea::ALL {
            assert_eq!(TherapeuticArea::parse(value.as_str()), Some(*value));
        }
        for value in ScaleCategory::ALL {
            assert_eq!(ScaleCategory::parse(value.as_str()), Some(*value));
        }
    }

    #[test]
    fn test_display_uses_authored_form() {
        assert_eq!(RelationshipType::SeeAlso.to_string(), "see-also");
        assert_eq!(ClinicalRelevance::Critical.to_string(), "critical");
        assert_eq!(ContentStatus::Published.to_string(), "published");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&ContentStatus::Review).unwrap();
        assert_eq!(json, "\"review\"");
        let parsed: ContentStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(parsed, ContentStatus::Draft);
        assert!(serde_json::from_str::<ContentStatus>("\"archived\"").is_err());
    }
}
