//! Normalization of raw field-survey submissions into flat validation
//! records.
//!
//! Raw payloads come from the collection server's export API as nested,
//! country-specific JSON. The library turns each submission into a
//! [`FlatRecord`]: one row of fixed, country-agnostic columns ready for the
//! validation sheet. See the [`manual`] module for the payload shapes and
//! the column schema.
//!
//! Extraction never fails on malformed or incomplete submissions; missing
//! answers resolve to empty columns. Only the caller's file and JSON I/O can
//! produce errors, which is why the whole transformation surface returns
//! plain values.

mod components;
pub mod config;
mod fields;
pub mod manual;
mod percent;
mod photos;
mod value;

use chrono::{SecondsFormat, Utc};
use log::debug;
use serde_json::Value as JSValue;

pub use crate::components::LandCover;
pub use crate::config::{Attachment, Country, FlatRecord, LandCoverComponent, VALIDATION_PENDING};
pub use crate::percent::{parse_percentage, resolve_range_pair};
pub use crate::photos::{attachment_url, image_file_name, Direction};

use crate::components::extract_land_cover;
use crate::config::fmt_number;
use crate::fields::{country_fields, CountryFields, PsuRule};
use crate::photos::{photo_field, read_attachments, resolve_photo_prefix};
use crate::value::{first_string, get_string};

/// Flattens the export API's payload shapes into a sequence of raw records.
///
/// Accepts a paginated envelope (object with a `results` array), a bare
/// array, or a single submission object. Anything else yields no records.
pub fn collect_records(payload: Option<&JSValue>) -> Vec<&JSValue> {
    let payload = match payload {
        Some(p) => p,
        None => return Vec::new(),
    };
    if let Some(JSValue::Array(results)) = payload.get("results") {
        return results.iter().collect();
    }
    match payload {
        JSValue::Array(arr) => arr.iter().collect(),
        JSValue::Object(_) => vec![payload],
        _ => Vec::new(),
    }
}

/// Normalizes a full export payload. All records of one batch share a single
/// workflow timestamp.
pub fn transform_payload(payload: Option<&JSValue>, country: Country) -> Vec<FlatRecord> {
    let workflow_date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let records = collect_records(payload);
    debug!("normalizing {} record(s) for {}", records.len(), country.code());
    records
        .into_iter()
        .map(|data| transform_record(data, country, &workflow_date))
        .collect()
}

/// Normalizes one raw submission. Pure: the caller supplies the workflow
/// timestamp, so the same input always produces the same record.
pub fn transform_record(data: &JSValue, country: Country, workflow_date: &str) -> FlatRecord {
    let table = country_fields(country);

    let identity = extract_identity(data, table);
    let (latitude, longitude, elevation) = extract_geolocation(data, table);
    let land_cover = extract_land_cover(data, table);
    let photos = resolve_photos(data, table, &identity.uuid);

    assemble(identity, latitude, longitude, elevation, land_cover, photos, workflow_date)
}

struct Identity {
    uuid: String,
    country_code: String,
    site_id: String,
    psu_id: String,
    province: String,
    surveyor: String,
    survey_date: String,
    submission_time: String,
    landform: String,
    comments: String,
    surveyor_comments: String,
}

fn extract_identity(data: &JSValue, table: &CountryFields) -> Identity {
    let uuid = first_string(data, &["meta/instanceID", "_uuid"]).unwrap_or_default();
    let site_id =
        first_string(data, table.site_id).unwrap_or_else(|| "UNKNOWN_SITE".to_string());
    let psu_id = match table.psu {
        // The parent sampling unit is the leading segment of the site id.
        PsuRule::SplitSiteId => site_id
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_string(),
        PsuRule::PrefixedField(path) => match get_string(data, path) {
            Some(psu) => format!("{}{}", table.code, psu),
            None => "N/A".to_string(),
        },
    };
    let survey_date = get_string(data, "today").unwrap_or_else(|| {
        get_string(data, "start")
            .map(|s| s.split('T').next().unwrap_or("").to_string())
            .unwrap_or_default()
    });

    Identity {
        uuid,
        country_code: table.code.to_string(),
        site_id,
        psu_id,
        province: first_string(data, table.province).unwrap_or_default(),
        surveyor: first_string(data, table.surveyor).unwrap_or_default(),
        survey_date,
        submission_time: get_string(data, "_submission_time").unwrap_or_default(),
        landform: first_string(data, table.landform).unwrap_or_default(),
        comments: first_string(data, table.comments).unwrap_or_default(),
        surveyor_comments: first_string(data, table.surveyor_comments).unwrap_or_default(),
    }
}

/// Coordinates come either from the form's geopoint answer
/// (space-delimited `lat lon elev ...`) or from the server-computed
/// `_geolocation` pair, which carries no elevation. The two sources are
/// never mixed.
fn extract_geolocation(data: &JSValue, table: &CountryFields) -> (String, String, String) {
    if let Some(geopoint) = get_string(data, table.geopoint) {
        let mut parts = geopoint.split_whitespace();
        let lat = parts.next().unwrap_or("").to_string();
        let lon = parts.next().unwrap_or("").to_string();
        let elev = parts.next().unwrap_or("").to_string();
        return (lat, lon, elev);
    }
    if let Some(JSValue::Array(pair)) = data.get("_geolocation") {
        let coord = |v: Option<&JSValue>| match v {
            Some(JSValue::Number(n)) => n.to_string(),
            Some(JSValue::String(s)) => s.clone(),
            _ => String::new(),
        };
        return (coord(pair.first()), coord(pair.get(1)), String::new());
    }
    (String::new(), String::new(), String::new())
}

struct PhotoFields {
    urls: [String; 4],
    filenames: [String; 4],
}

fn resolve_photos(data: &JSValue, table: &CountryFields, uuid: &str) -> PhotoFields {
    let prefix = resolve_photo_prefix(data, table.photo_paths);
    let attachments = read_attachments(data);

    let mut urls: [String; 4] = Default::default();
    let mut filenames: [String; 4] = Default::default();
    for (i, dir) in Direction::ALL.iter().enumerate() {
        let original = get_string(data, &photo_field(prefix, *dir));
        filenames[i] = image_file_name(uuid, *dir, original.as_deref());
        urls[i] = attachment_url(&attachments, prefix, *dir);
    }
    PhotoFields { urls, filenames }
}

/// The sheet shows an unknown component percentage as an empty cell, not 0.
fn comp_percentage(c: Option<&LandCoverComponent>) -> String {
    match c {
        Some(c) if c.percentage != 0.0 => fmt_number(c.percentage),
        _ => String::new(),
    }
}

fn assemble(
    identity: Identity,
    latitude: String,
    longitude: String,
    elevation: String,
    land_cover: LandCover,
    photos: PhotoFields,
    workflow_date: &str,
) -> FlatRecord {
    let LandCover {
        level1_class,
        components,
    } = land_cover;

    // The unique classification list only reflects the level-1 answer; the
    // component breakdown is summarized by its own count and total.
    let unique: Vec<&str> = if level1_class.is_empty() {
        Vec::new()
    } else {
        vec![level1_class.as_str()]
    };
    let total_percentage: f64 = components.iter().map(|c| c.percentage).sum();

    let comp = |i: usize| components.get(i);
    let [url_north, url_east, url_south, url_west] = photos.urls;
    let [file_north, file_east, file_south, file_west] = photos.filenames;

    FlatRecord {
        uuid: identity.uuid,
        country_code: identity.country_code,
        site_id: identity.site_id,
        psu_id: identity.psu_id,
        province: identity.province,
        surveyor: identity.surveyor,
        survey_date: identity.survey_date,
        submission_time: identity.submission_time,
        latitude,
        longitude,
        elevation,
        landform: identity.landform,

        land_cover_types: level1_class.clone(),
        unique_classifications: unique.join(", "),
        classification_count: unique.len() as u32,
        total_percentage,
        component_count: components.len() as u32,

        comp1_classification: comp(0).map(|c| c.classification.clone()).unwrap_or_default(),
        comp1_percentage: comp_percentage(comp(0)),
        comp1_details: comp(0).map(|c| c.details.clone()).unwrap_or_default(),

        comp2_classification: comp(1).map(|c| c.classification.clone()).unwrap_or_default(),
        comp2_percentage: comp_percentage(comp(1)),
        comp2_details: comp(1).map(|c| c.details.clone()).unwrap_or_default(),

        comp3_classification: comp(2).map(|c| c.classification.clone()).unwrap_or_default(),
        comp3_percentage: comp_percentage(comp(2)),
        comp3_details: comp(2).map(|c| c.details.clone()).unwrap_or_default(),

        comp4_classification: comp(3).map(|c| c.classification.clone()).unwrap_or_default(),
        comp4_percentage: comp_percentage(comp(3)),
        comp4_details: comp(3).map(|c| c.details.clone()).unwrap_or_default(),

        download_url_north: url_north,
        download_url_east: url_east,
        download_url_south: url_south,
        download_url_west: url_west,

        filename_north: file_north,
        filename_east: file_east,
        filename_south: file_south,
        filename_west: file_west,

        comments: identity.comments,
        surveyor_comments: identity.surveyor_comments,

        validation_status: VALIDATION_PENDING.to_string(),
        is_correct: String::new(),
        final_classification: String::new(),
        main_crop_type: String::new(),
        validator_comments: String::new(),
        validator_name: String::new(),
        validation_date: String::new(),
        workflow_date: workflow_date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SITE: &str = "soilFER_collect/soil_description_sampling/Site_identification";
    const ELEM: &str = "soilFER_collect/landcover_description/dominant_landcover";
    const STAMP: &str = "2024-05-01T12:00:00.000Z";

    fn gtm_array_record() -> JSValue {
        json!({
            "meta/instanceID": "uuid:0a1b2c3d",
            "_submission_time": "2024-04-30T15:04:05",
            "today": "2024-04-30",
            (format!("{SITE}/site_id")): "GT01-023",
            (format!("{SITE}/selected_province")): "Chimaltenango",
            (format!("{SITE}/geopoint")): "14.61 -90.52 1530.2 4.8",
            "soilFER_collect/section0_general_Info/surveyor_name": "Ana",
            "soilFER_collect/landscape_description/landform_classification": "plateau",
            "soilFER_collect/landcover_description": [
                {
                    (format!("{ELEM}/landcover")): "vegetated",
                    (format!("{ELEM}/Maximum")): "60",
                },
                {
                    (format!("{ELEM}/landcover")): "vegetated",
                    (format!("{ELEM}/Maximum")): "45",
                    (format!("{ELEM}/land_cover_types")): "cropland",
                },
            ],
            "soilFER_collect/landscape_description/land_feature_photos/photo_north": "1650000000000.jpg",
            "_attachments": [
                {
                    "question_xpath": "soilFER_collect/landscape_description/land_feature_photos/photo_north",
                    "download_url": "https://kc.example.org/attachments/55/?format=json"
                }
            ],
        })
    }

    #[test]
    fn array_record_end_to_end() {
        let r = transform_record(&gtm_array_record(), Country::Guatemala, STAMP);
        assert_eq!(r.uuid, "uuid:0a1b2c3d");
        assert_eq!(r.country_code, "GTM");
        assert_eq!(r.site_id, "GT01-023");
        assert_eq!(r.psu_id, "GT01");
        assert_eq!(r.survey_date, "2024-04-30");
        assert_eq!(r.latitude, "14.61");
        assert_eq!(r.longitude, "-90.52");
        assert_eq!(r.elevation, "1530.2");
        assert_eq!(r.landform, "plateau");

        assert_eq!(r.land_cover_types, "cropland");
        assert_eq!(r.unique_classifications, "cropland");
        assert_eq!(r.classification_count, 1);
        assert_eq!(r.component_count, 2);
        assert_eq!(r.total_percentage, 105.0);
        assert_eq!(r.comp1_percentage, "60");
        assert_eq!(r.comp2_percentage, "45");
        assert_eq!(r.comp3_classification, "");
        assert_eq!(r.comp3_percentage, "");

        assert_eq!(
            r.download_url_north,
            "https://kc.example.org/attachments/55/"
        );
        assert_eq!(r.filename_north, "0a1b2c3d-north.jpg");
        // No answer for the other directions.
        assert_eq!(r.filename_east, "");
        assert_eq!(r.download_url_east, "");

        assert_eq!(r.validation_status, "PENDING");
        assert_eq!(r.is_correct, "");
        assert_eq!(r.workflow_date, STAMP);
    }

    #[test]
    fn transformation_is_deterministic_for_a_fixed_stamp() {
        let data = gtm_array_record();
        let a = transform_record(&data, Country::Guatemala, STAMP);
        let b = transform_record(&data, Country::Guatemala, STAMP);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_submission_still_yields_a_record() {
        let r = transform_record(&json!({}), Country::Tunisia, STAMP);
        assert_eq!(r.country_code, "TUN");
        assert_eq!(r.site_id, "UNKNOWN_SITE");
        assert_eq!(r.psu_id, "UNKNOWN");
        assert_eq!(r.component_count, 0);
        assert_eq!(r.total_percentage, 0.0);
        assert_eq!(r.comp1_classification, "");
        assert_eq!(r.validation_status, "PENDING");
    }

    #[test]
    fn honduras_psu_is_prefixed_or_na() {
        let with_psu = json!({
            (format!("{SITE}/psu")): "042",
        });
        let r = transform_record(&with_psu, Country::Honduras, STAMP);
        assert_eq!(r.psu_id, "HND042");

        let without = transform_record(&json!({}), Country::Honduras, STAMP);
        assert_eq!(without.psu_id, "N/A");
    }

    #[test]
    fn server_geolocation_is_the_fallback_and_has_no_elevation() {
        let data = json!({"_geolocation": [14.5, -87.2]});
        let r = transform_record(&data, Country::Honduras, STAMP);
        assert_eq!(r.latitude, "14.5");
        assert_eq!(r.longitude, "-87.2");
        assert_eq!(r.elevation, "");
    }

    #[test]
    fn survey_date_falls_back_to_the_start_timestamp() {
        let data = json!({"start": "2024-04-29T08:30:00.000-06:00"});
        let r = transform_record(&data, Country::Guatemala, STAMP);
        assert_eq!(r.survey_date, "2024-04-29");
    }

    #[test]
    fn payload_shapes_are_all_accepted() {
        let rec = json!({"_uuid": "u1"});
        let envelope = json!({"count": 1, "results": [rec.clone(), rec.clone()]});
        assert_eq!(collect_records(Some(&envelope)).len(), 2);

        let bare = json!([rec.clone()]);
        assert_eq!(collect_records(Some(&bare)).len(), 1);

        assert_eq!(collect_records(Some(&rec)).len(), 1);
        assert_eq!(collect_records(Some(&json!(42))).len(), 0);
        assert_eq!(collect_records(None).len(), 0);
    }

    #[test]
    fn batch_records_share_one_workflow_stamp() {
        let rec = json!({"_uuid": "u1"});
        let envelope = json!({"results": [rec.clone(), rec.clone()]});
        let out = transform_payload(Some(&envelope), Country::Guatemala);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].workflow_date, out[1].workflow_date);
        assert!(!out[0].workflow_date.is_empty());
    }

    #[test]
    fn photo_path_fallback_uses_the_older_convention() {
        let old = "soilFER_collect/soil_description_sampling/erosion_status/land_feature_photos";
        let data = json!({
            "_uuid": "u9",
            (format!("{old}/photo_south")): "1650000000001.jpg",
            "_attachments": [{
                "question_xpath": format!("{old}/photo_south"),
                "download_url": "https://kc.example.org/attachments/9/"
            }],
        });
        let r = transform_record(&data, Country::Guatemala, STAMP);
        assert_eq!(r.filename_south, "u9-south.jpg");
        assert_eq!(r.download_url_south, "https://kc.example.org/attachments/9/");
    }
}
