use std::io::Write;

use sanctions_refiner::domain::Grouped;
use sanctions_refiner::infra::{read_raw_records, CsvDatasetWriter, JsonSummaryWriter};
use sanctions_refiner::pipeline::orchestrator::PipelineOrchestrator;
use tempfile::tempdir;

const HEADER: &str = "Name 1,Name 2,Name 3,Name 4,Name 5,Name 6,Alias Type,Country,Country of Birth,Address 1,Address 2,Address 3,Address 4,Address 5,Address 6,Post/Zip Code,DOB,Listed On,Regime,Group Type,Group ID,Last Updated";

/// Four rows: two alias rows of the same entity, plus two standalone
/// entities. Mirrors the shape of the real consolidated-list export,
/// including the metadata banner on the first line.
fn sample_export() -> String {
    let mut content = String::new();
    content.push_str("Last Updated 29/08/2026\n");
    content.push_str(HEADER);
    content.push('\n');
    content.push_str(
        "jane,,doe,,,,Primary name,Iran,(1) Iran (2) Iraq,1 High St,,,,,,SW1A 1AA,01/01/1990,23/07/2014,Regime X,Individual,1,29/08/2026\n",
    );
    content.push_str(
        "j,doe,,,,,Good quality a.k.a.,,,,,,,,,,01/01/1990,23/07/2014,Regime X,Individual,1,29/08/2026\n",
    );
    content.push_str(
        "acme,corp,,,,,Primary name,Syria,,,,,,,,,,15/01/2010,Regime Y,Entity,2,29/08/2026\n",
    );
    content.push_str(
        "john,smith,,,,,Primary name,,,,,,,,,,circa 1962,2011/03/02,Regime Z,Individual,3,29/08/2026\n",
    );
    content
}

#[test]
fn full_pipeline_consolidates_and_reports() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("ConList.csv");
    let dataset_path = dir.path().join("outputs").join("sanctions_dataset.csv");
    let summary_path = dir.path().join("outputs").join("data_quality_assessment.json");

    let mut input = std::fs::File::create(&input_path)?;
    input.write_all(sample_export().as_bytes())?;

    let rows = read_raw_records(&input_path)?;
    assert_eq!(rows.len(), 4);

    let mut orchestrator = PipelineOrchestrator::new(
        Box::new(CsvDatasetWriter::new(&dataset_path)),
        Box::new(JsonSummaryWriter::new(&summary_path)),
    );
    let outcome = orchestrator.run(rows)?;

    // one entity per distinct group id
    assert_eq!(outcome.entities.len(), 3);

    let jane = &outcome.entities[0];
    assert_eq!(jane.group_id, "1");
    assert_eq!(jane.primary_name, Grouped::One("Jane Doe".to_string()));
    assert_eq!(jane.name_variations, Grouped::One("J Doe".to_string()));
    assert_eq!(jane.dob, Grouped::One("1990-01-01".to_string()));
    assert_eq!(jane.listed_on, Some("2014-07-23".to_string()));
    assert!(jane.associated_countries.contains("Iran"));
    assert!(jane.associated_countries.contains("Iraq"));
    assert_eq!(
        jane.full_address,
        Grouped::One("1 High St, SW1A 1AA, Iran".to_string())
    );

    let acme = &outcome.entities[1];
    assert_eq!(acme.group_id, "2");
    assert_eq!(acme.primary_name, Grouped::One("Acme Corp".to_string()));
    assert!(acme.name_variations.is_absent());
    assert!(acme.dob.is_absent());

    let john = &outcome.entities[2];
    assert_eq!(john.group_id, "3");
    // lossy year-only fallback
    assert_eq!(john.dob, Grouped::One("1962-01-01".to_string()));
    assert_eq!(john.listed_on, Some("2011-03-02".to_string()));

    // quality summary: three non-ISO raw DOB values, no exact duplicates,
    // one group id spanning two rows
    let summary = &outcome.summary;
    assert_eq!(summary.record_count, 4);
    assert_eq!(summary.processed_entries, 4);
    assert_eq!(summary.data_quality.date_format_issues, 3);
    assert_eq!(summary.duplicates.exact_duplicates, 0);
    assert_eq!(summary.duplicates.group_id_duplicate_ids, 1);
    assert_eq!(summary.duplicates.group_id_duplicate_rows, 2);

    // both artifacts exist and carry the expected shape
    let dataset = std::fs::read_to_string(&dataset_path)?;
    let mut lines = dataset.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Group ID,Primary Name,Name Variations,Country,Regime,Standardised Date of Birth,Associated Countries,Full Address,Listed On,Group Type,Last Updated"
    );
    assert_eq!(lines.clone().count(), 3);
    assert!(lines.next().unwrap().starts_with("1,Jane Doe,J Doe,"));

    let summary_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path)?)?;
    assert_eq!(summary_json["record_count"], 4);
    assert_eq!(summary_json["data_quality"]["date_format_issues"], 3);
    assert_eq!(summary_json["duplicates"]["group_id_duplicate_rows"], 2);

    Ok(())
}

#[test]
fn exact_duplicate_rows_are_counted_once_per_pair() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("ConList.csv");

    let duplicate_row = "jane,,doe,,,,Primary name,Iran,,,,,,,,,1990-01-01,2014-07-23,Regime X,Individual,1,29/08/2026\n";
    let mut content = format!("metadata\n{HEADER}\n");
    content.push_str(duplicate_row);
    content.push_str(duplicate_row);

    std::fs::write(&input_path, content)?;

    let rows = read_raw_records(&input_path)?;
    let outcome = sanctions_refiner::pipeline::orchestrator::run_pipeline(rows);

    assert_eq!(outcome.summary.duplicates.exact_duplicates, 1);
    assert_eq!(outcome.entities.len(), 1);
    // both rows are ISO already, nothing to flag
    assert_eq!(outcome.summary.data_quality.date_format_issues, 0);

    Ok(())
}
