// ********* Input data structures ***********

use serde::{Deserialize, Serialize};

/// The survey campaigns currently handled by the pipeline.
///
/// Every campaign ran its own revisions of the collection form, so the
/// country selects the set of candidate field paths tried during extraction
/// as well as the structural shape of the land-cover answers.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Country {
    Guatemala,
    Honduras,
    Tunisia,
}

impl Country {
    /// The ISO-3 code written in the `country_code` output column.
    pub fn code(&self) -> &'static str {
        match self {
            Country::Guatemala => "GTM",
            Country::Honduras => "HND",
            Country::Tunisia => "TUN",
        }
    }

    pub fn from_code(code: &str) -> Option<Country> {
        match code.to_ascii_uppercase().as_str() {
            "GTM" => Some(Country::Guatemala),
            "HND" => Some(Country::Honduras),
            "TUN" => Some(Country::Tunisia),
            _ => None,
        }
    }
}

/// One stored binary answer, as listed under the `_attachments` key of a raw
/// submission. The `question_xpath` identifies which field path the binary
/// answers.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub question_xpath: String,
    pub download_url: String,
}

/// One land-cover sub-area: a classification label, its coverage percentage
/// (0 when unknown or not applicable) and a pipe-delimited human-readable
/// detail string.
#[derive(PartialEq, Debug, Clone)]
pub struct LandCoverComponent {
    pub classification: String,
    pub percentage: f64,
    pub details: String,
}

// ******** Output data structures *********

/// Initial state of the `validation_status` column. The review dashboard
/// later moves records out of this state; the pipeline never does.
pub const VALIDATION_PENDING: &str = "PENDING";

/// The flat, country-agnostic record appended downstream.
///
/// The field declaration order is the column order of the destination sheet
/// and may not be changed. Only the first four land-cover components get
/// dedicated columns; further components are still counted in
/// `component_count` but are not exposed positionally.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatRecord {
    pub uuid: String,
    pub country_code: String,
    pub site_id: String,
    pub psu_id: String,
    pub province: String,
    pub surveyor: String,
    pub survey_date: String,
    pub submission_time: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub landform: String,

    /// Level-1 (site-level) classification, independent of the component
    /// breakdown.
    pub land_cover_types: String,
    pub unique_classifications: String,
    pub classification_count: u32,
    /// Sum of all component percentages. Overlapping cover categories are
    /// expected, so this may legitimately exceed 100.
    pub total_percentage: f64,
    pub component_count: u32,

    pub comp1_classification: String,
    pub comp1_percentage: String,
    pub comp1_details: String,

    pub comp2_classification: String,
    pub comp2_percentage: String,
    pub comp2_details: String,

    pub comp3_classification: String,
    pub comp3_percentage: String,
    pub comp3_details: String,

    pub comp4_classification: String,
    pub comp4_percentage: String,
    pub comp4_details: String,

    pub download_url_north: String,
    pub download_url_east: String,
    pub download_url_south: String,
    pub download_url_west: String,

    pub filename_north: String,
    pub filename_east: String,
    pub filename_south: String,
    pub filename_west: String,

    pub comments: String,
    pub surveyor_comments: String,

    pub validation_status: String,
    pub is_correct: String,
    pub final_classification: String,
    pub main_crop_type: String,
    pub validator_comments: String,
    pub validator_name: String,
    pub validation_date: String,
    pub workflow_date: String,
}

impl FlatRecord {
    /// Column headers, in the order the destination sheet expects.
    pub const COLUMNS: [&'static str; 47] = [
        "uuid",
        "country_code",
        "site_id",
        "psu_id",
        "province",
        "surveyor",
        "survey_date",
        "submission_time",
        "latitude",
        "longitude",
        "elevation",
        "landform",
        "land_cover_types",
        "unique_classifications",
        "classification_count",
        "total_percentage",
        "component_count",
        "comp1_classification",
        "comp1_percentage",
        "comp1_details",
        "comp2_classification",
        "comp2_percentage",
        "comp2_details",
        "comp3_classification",
        "comp3_percentage",
        "comp3_details",
        "comp4_classification",
        "comp4_percentage",
        "comp4_details",
        "download_url_north",
        "download_url_east",
        "download_url_south",
        "download_url_west",
        "filename_north",
        "filename_east",
        "filename_south",
        "filename_west",
        "comments",
        "surveyor_comments",
        "validation_status",
        "is_correct",
        "final_classification",
        "main_crop_type",
        "validator_comments",
        "validator_name",
        "validation_date",
        "workflow_date",
    ];

    /// Renders the record as one append-ready sheet row, in [`COLUMNS`] order.
    ///
    /// [`COLUMNS`]: FlatRecord::COLUMNS
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.country_code.clone(),
            self.site_id.clone(),
            self.psu_id.clone(),
            self.province.clone(),
            self.surveyor.clone(),
            self.survey_date.clone(),
            self.submission_time.clone(),
            self.latitude.clone(),
            self.longitude.clone(),
            self.elevation.clone(),
            self.landform.clone(),
            self.land_cover_types.clone(),
            self.unique_classifications.clone(),
            self.classification_count.to_string(),
            fmt_number(self.total_percentage),
            self.component_count.to_string(),
            self.comp1_classification.clone(),
            self.comp1_percentage.clone(),
            self.comp1_details.clone(),
            self.comp2_classification.clone(),
            self.comp2_percentage.clone(),
            self.comp2_details.clone(),
            self.comp3_classification.clone(),
            self.comp3_percentage.clone(),
            self.comp3_details.clone(),
            self.comp4_classification.clone(),
            self.comp4_percentage.clone(),
            self.comp4_details.clone(),
            self.download_url_north.clone(),
            self.download_url_east.clone(),
            self.download_url_south.clone(),
            self.download_url_west.clone(),
            self.filename_north.clone(),
            self.filename_east.clone(),
            self.filename_south.clone(),
            self.filename_west.clone(),
            self.comments.clone(),
            self.surveyor_comments.clone(),
            self.validation_status.clone(),
            self.is_correct.clone(),
            self.final_classification.clone(),
            self.main_crop_type.clone(),
            self.validator_comments.clone(),
            self.validator_name.clone(),
            self.validation_date.clone(),
            self.workflow_date.clone(),
        ]
    }
}

/// Renders a percentage the way the sheet shows it: whole values without a
/// decimal point.
pub(crate) fn fmt_number(x: f64) -> String {
    if x == x.trunc() && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}
