use std::io::Write;
use std::sync::Arc;
use survey_pareto::workflows::pareto::{
    analyze, analyze_records, DriverClassification, RiskLevel, SurveyRecord,
};
use survey_pareto::workflows::sheets::SheetRecordImporter;

fn record(pairs: &[(&str, &str)]) -> SurveyRecord {
    pairs.iter().copied().collect()
}

#[test]
fn worked_example_matches_expected_classification() {
    let analysis = analyze_records(vec![record(&[
        ("Impact", "high"),
        ("Cost", "low"),
        ("Timestamp", "2024-01-01"),
    ])]);

    let report = &analysis.reports[0];
    assert_eq!(report.identifier, "Row 2");
    assert!((report.total_impact - 1.79).abs() < 1e-9);
    assert_eq!(report.risk_level, RiskLevel::High);

    let classes: Vec<_> = report
        .drivers
        .iter()
        .map(|driver| (driver.question.as_str(), driver.classification))
        .collect();
    assert_eq!(
        classes,
        vec![
            ("Impact", DriverClassification::Vital),
            ("Cost", DriverClassification::Review),
        ]
    );
    assert!((report.drivers[0].share - 0.6648).abs() < 1e-3);

    assert!((analysis.aggregate.average_impact - 1.79).abs() < 1e-9);
    assert_eq!(analysis.aggregate.recurrent_drivers.len(), 1);
    assert_eq!(analysis.aggregate.recurrent_drivers[0].question, "Impact");
}

#[test]
fn empty_run_serializes_to_empty_collections() {
    let analysis = analyze(&[]);
    let json = serde_json::to_value(&analysis).expect("analysis serializes");

    assert_eq!(
        json,
        serde_json::json!({
            "reports": [],
            "aggregate": {
                "averageImpact": 0.0,
                "highestRiskRows": [],
                "recurrentDrivers": []
            }
        })
    );
}

#[test]
fn repeated_runs_are_identical() {
    let records: Vec<Arc<SurveyRecord>> = (0..40)
        .map(|index| {
            Arc::new(record(&[
                ("Impact", ["high", "low", "medium", "7", "critical"][index % 5]),
                ("Cost", ["low", "high", "3"][index % 3]),
                ("Frequency", ["often", "2", "very high", ""][index % 4]),
            ]))
        })
        .collect();

    let first = serde_json::to_string(&analyze(&records)).expect("serializes");
    let second = serde_json::to_string(&analyze(&records)).expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn report_json_uses_dashboard_field_names() {
    let analysis = analyze_records(vec![record(&[
        ("ID", "R-1"),
        ("Impact", "high"),
        ("Cost", "low"),
    ])]);
    let json = serde_json::to_value(&analysis.reports[0]).expect("report serializes");

    assert_eq!(json["rowIndex"], 0);
    assert_eq!(json["identifier"], "R-1");
    assert_eq!(json["riskLevel"], "high");
    assert_eq!(json["raw"]["ID"], "R-1");
    let driver = &json["drivers"][0];
    assert_eq!(driver["question"], "Impact");
    assert_eq!(driver["classification"], "vital");
    assert!(driver["cumulativeShare"].is_number());
}

#[test]
fn spanish_form_export_is_analyzed_end_to_end() {
    let data = include_bytes!("fixtures/survey_responses.csv");
    let records = SheetRecordImporter::from_reader(&data[..]).expect("fixture imports");
    assert_eq!(records.len(), 6);

    let analysis = analyze(&records);
    let reports = &analysis.reports;

    assert_eq!(reports[0].identifier, "ana@example.com");
    assert_eq!(reports[1].identifier, "Luis Pérez");
    assert_eq!(reports[2].identifier, "Row 4");
    assert!(reports
        .iter()
        .flat_map(|report| report.drivers.iter())
        .all(|driver| !matches!(
            driver.question.as_str(),
            "Marca temporal" | "Nombre" | "Correo" | "Comentarios"
        )));

    // An unanswered row still scores: empty answers to the inverted cost
    // and satisfaction questions count as worst case.
    let blank = &reports[4];
    assert_eq!(blank.identifier, "Row 6");
    let blank_questions: Vec<_> = blank
        .drivers
        .iter()
        .map(|driver| driver.question.as_str())
        .collect();
    assert_eq!(
        blank_questions,
        vec!["Satisfacción actual", "Coste de implementación"]
    );
    assert!((blank.total_impact - 1.9).abs() < 1e-9);
    assert_eq!(blank.risk_level, RiskLevel::High);

    // Customer impact is vital in every answered row.
    let recurrent: Vec<_> = analysis
        .aggregate
        .recurrent_drivers
        .iter()
        .map(|driver| (driver.question.as_str(), driver.count))
        .collect();
    assert_eq!(
        recurrent,
        vec![
            ("Impacto en el cliente", 5),
            ("Frecuencia del problema", 4),
            ("Satisfacción actual", 4),
            ("Área", 1),
        ]
    );

    let top = &analysis.aggregate.highest_risk_rows;
    let top_identifiers: Vec<_> = top.iter().map(|row| row.identifier.as_str()).collect();
    assert_eq!(
        top_identifiers,
        vec![
            "marta@example.com",
            "ana@example.com",
            "Luis Pérez",
            "jorge@example.com",
            "Row 6",
        ]
    );
}

#[test]
fn csv_export_on_disk_imports() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "ID,Impact,Satisfaction").expect("write header");
    writeln!(file, "A-1,very high,1").expect("write row");
    writeln!(file, "A-2,low,5").expect("write row");

    let records = SheetRecordImporter::from_path(file.path()).expect("csv imports");
    let analysis = analyze(&records);

    assert_eq!(analysis.reports[0].identifier, "A-1");
    assert_eq!(analysis.reports[0].risk_level, RiskLevel::High);
    assert_eq!(analysis.aggregate.highest_risk_rows[0].identifier, "A-1");
}
