//! Integration tests for report assembly and export.

use chrono::NaiveDate;
use tally_data::edgar::{FilingDescriptor, FormType};
use tally_extract::extract_html;
use tally_output::{ExportFormat, Exporter, FilingReport};

const STATEMENT: &str = "<table>\
    <tr><td>Total net sales</td><td>$</td><td>211,915</td></tr>\
    <tr><td>Total cost of sales</td><td>65,863</td></tr>\
    <tr><td>Total operating expenses</td><td>57,529</td></tr>\
    <tr><td>Basic</td><td>$</td><td>9.72</td></tr>\
    <tr><td>Diluted</td><td>$</td><td>9.68</td></tr>\
    </table>";

fn filing() -> FilingDescriptor {
    FilingDescriptor {
        form: FormType::TenK,
        filing_date: NaiveDate::from_ymd_opt(2023, 7, 27).unwrap(),
        accession_number: "0000950170-23-035122".to_string(),
        report_date: NaiveDate::from_ymd_opt(2023, 6, 30),
        primary_document: "msft-20230630.htm".to_string(),
    }
}

#[test]
fn test_extracted_report_round_trips_through_json() {
    let records = extract_html(STATEMENT.as_bytes()).unwrap();
    let reports = vec![FilingReport::new(filing(), records)];

    let json = reports.export_to_string(ExportFormat::PrettyJson).unwrap();
    let parsed: Vec<FilingReport> = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, reports);
    let record = parsed[0].record().unwrap();
    assert_eq!(record.total_net_sales, Some(211_915_000_000));
    assert_eq!(record.diluted_earnings_per_share, Some(9.68));
}

#[test]
fn test_export_to_file() {
    let records = extract_html(STATEMENT.as_bytes()).unwrap();
    let report = FilingReport::new(filing(), records);

    let path = std::env::temp_dir().join(format!("tally-export-{}.csv", std::process::id()));
    report.export_to_file(&path, ExportFormat::Csv).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(content.starts_with("form,filingDate,accessionNo"));
    assert!(content.contains(
        "10-K,2023-07-27,0000950170-23-035122,2023-06-30,msft-20230630.htm,\
         211915000000,65863000000,57529000000,9.72,9.68"
    ));
}
