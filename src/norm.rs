use std::fs;

use log::{info, warn};
use serde_json::Value as JSValue;
use snafu::{prelude::*, Snafu};
use text_diff::print_diff;

use survey_normalize::{transform_payload, Country, FlatRecord};

use crate::args::Args;

#[derive(Debug, Snafu)]
pub enum NormError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON in {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display(""))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Unknown country code {code}"))]
    UnknownCountry { code: String },
    #[snafu(display("Error writing output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    WritingCsv { source: csv::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type NormResult<T> = Result<T, NormError>;

pub fn run_normalize(args: &Args) -> NormResult<()> {
    let country = Country::from_code(&args.country).context(UnknownCountrySnafu {
        code: args.country.clone(),
    })?;

    let payload = read_payload(&args.input)?;
    let records = transform_payload(Some(&payload), country);
    info!(
        "normalized {} record(s) from {}",
        records.len(),
        args.input
    );

    let rendered = match args.format.as_deref().unwrap_or("json") {
        "json" => render_json(&records)?,
        "csv" => render_csv(&records)?,
        other => whatever!("Unknown output format {:?}", other),
    };

    match &args.out {
        Some(path) if path != "stdout" => {
            fs::write(path, &rendered).context(WritingOutputSnafu { path: path.clone() })?
        }
        _ => println!("{}", rendered),
    }

    if let Some(reference) = &args.reference {
        check_reference(&records, reference)?;
    }
    Ok(())
}

fn read_payload(path: &str) -> NormResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    serde_json::from_str(&contents).context(ParsingJsonSnafu {
        path: path.to_string(),
    })
}

fn render_json(records: &[FlatRecord]) -> NormResult<String> {
    serde_json::to_string_pretty(records).context(SerializingJsonSnafu {})
}

fn render_csv(records: &[FlatRecord]) -> NormResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(FlatRecord::COLUMNS)
        .context(WritingCsvSnafu {})?;
    for record in records {
        writer
            .write_record(record.to_row())
            .context(WritingCsvSnafu {})?;
    }
    let buf = match writer.into_inner() {
        Ok(buf) => buf,
        Err(e) => whatever!("Failed to flush the CSV buffer: {:?}", e),
    };
    match String::from_utf8(buf) {
        Ok(s) => Ok(s),
        Err(e) => whatever!("CSV output is not valid UTF-8: {:?}", e),
    }
}

/// Compares freshly normalized records against a reference file. Workflow
/// timestamps are stamped at run time, so they are blanked on both sides
/// before comparing.
fn check_reference(records: &[FlatRecord], path: &str) -> NormResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let reference: Vec<FlatRecord> = serde_json::from_str(&contents).context(ParsingJsonSnafu {
        path: path.to_string(),
    })?;

    let ours = render_json(&mask_workflow_dates(records))?;
    let theirs = render_json(&mask_workflow_dates(&reference))?;
    if ours != theirs {
        warn!("Found differences with the reference records");
        print_diff(theirs.as_str(), ours.as_str(), "\n");
        whatever!("Difference detected between normalized records and the reference")
    }
    Ok(())
}

fn mask_workflow_dates(records: &[FlatRecord]) -> Vec<FlatRecord> {
    records
        .iter()
        .cloned()
        .map(|mut r| {
            r.workflow_date = String::new();
            r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_output_has_the_full_header() {
        let records = vec![FlatRecord {
            uuid: "uuid:1".to_string(),
            ..FlatRecord::default()
        }];
        let out = render_csv(&records).unwrap();
        let mut lines = out.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("uuid,country_code,site_id"));
        assert!(header.ends_with("validation_date,workflow_date"));
        assert_eq!(header.split(',').count(), FlatRecord::COLUMNS.len());
        assert!(lines.next().unwrap().starts_with("uuid:1,"));
    }

    #[test]
    fn masking_only_touches_the_workflow_stamp() {
        let records = vec![FlatRecord {
            uuid: "uuid:1".to_string(),
            workflow_date: "2024-05-01T12:00:00.000Z".to_string(),
            ..FlatRecord::default()
        }];
        let masked = mask_workflow_dates(&records);
        assert_eq!(masked[0].workflow_date, "");
        assert_eq!(masked[0].uuid, "uuid:1");
        // The input is untouched.
        assert_eq!(records[0].workflow_date, "2024-05-01T12:00:00.000Z");
    }
}
