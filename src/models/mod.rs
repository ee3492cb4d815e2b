use std::fmt;

/// Fixed text stored in place of a field the page did not yield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    CouncilReference,
    Address,
    Description,
    DateReceived,
    SupportingDocuments,
    OnNoticeTo,
}

impl Missing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CouncilReference => "Council Reference not found",
            Self::Address => "Address not found",
            Self::Description => "Description not found",
            Self::DateReceived => "Date not found",
            Self::SupportingDocuments => "Supporting documents not found",
            Self::OnNoticeTo => "On notice date not found",
        }
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One planning application as stored in the database
///
/// `council_reference` is the natural key. Absent primary fields hold the
/// matching [`Missing`] text, never an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationRecord {
    pub council_reference: String,
    pub address: String,
    pub description: String,
    pub date_received: String,
    pub on_notice_to: String,
    /// Link to (or caption of) the supporting documents
    pub document_description: String,
    /// ISO date of the run that first stored the record
    pub date_scraped: String,
    // Columns kept in the schema; nothing populates them yet.
    pub applicant: Option<String>,
    pub owner: Option<String>,
    pub stage_description: Option<String>,
    pub stage_status: Option<String>,
    pub title_reference: Option<String>,
}

impl ApplicationRecord {
    /// Whether the reference is a real value rather than the placeholder
    pub fn has_reference(&self) -> bool {
        self.council_reference != Missing::CouncilReference.as_str()
    }
}
