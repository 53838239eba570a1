//! End-to-end conversion of synthetic comparison workbooks.
//!
//! Workbooks are assembled in memory with `zip`, so no fixture files
//! are needed.

use sheetjson::render::{to_json, write_output, JsonFormat, OutputMode};
use sheetjson::{
    convert_bytes, convert_file, ConvertOptions, Error, FailurePolicy, SheetResult, Value,
    Workbook, WorkbookReader,
};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Cell content for fixture sheets.
enum C {
    S(&'static str),
    N(f64),
    E,
}

use C::{E, N, S};

fn column_letter(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        letters.push(b'A' + ((n - 1) % 26) as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Build an XLSX package from named sheets of rows.
fn build_workbook(sheets: &[(&str, Vec<Vec<C>>)]) -> Vec<u8> {
    let mut shared: Vec<String> = Vec::new();
    let mut sheet_xml = Vec::new();

    for (_, rows) in sheets {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (r, row) in rows.iter().enumerate() {
            xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
            for (c, cell) in row.iter().enumerate() {
                let reference = format!("{}{}", column_letter(c), r + 1);
                match cell {
                    S(text) => {
                        let idx = shared.iter().position(|s| s == text).unwrap_or_else(|| {
                            shared.push(text.to_string());
                            shared.len() - 1
                        });
                        xml.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, idx));
                    }
                    N(n) => xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, reference, n)),
                    E => {}
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        sheet_xml.push(xml);
    }

    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();

        let mut overrides = String::new();
        for i in 0..sheets.len() {
            overrides.push_str(&format!(
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
                overrides
            )
            .as_bytes(),
        )
        .unwrap();

        let mut sheet_entries = String::new();
        let mut rels = String::new();
        for (i, (name, _)) in sheets.iter().enumerate() {
            sheet_entries.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                i + 1,
                i + 1
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
                sheet_entries
            )
            .as_bytes(),
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                rels
            )
            .as_bytes(),
        )
        .unwrap();

        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        let items: String = shared
            .iter()
            .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s)))
            .collect();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
                shared.len(),
                items
            )
            .as_bytes(),
        )
        .unwrap();

        for (i, xml) in sheet_xml.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }
    buffer
}

fn tandem_sheet() -> Vec<Vec<C>> {
    vec![
        vec![S("Comparativa"), E, E, E],
        vec![E, S("BW 120 AD-5"), S(" CC 1200 "), S("nan")],
        vec![S("Máquina"), S("Tándem"), S("Tándem"), S("x")],
        vec![S("Peso (kg)"), N(2700.0), N(2650.5), N(1.0)],
        vec![S("Ancho"), E, N(1200.0), E],
        vec![E, N(99.0), E, E],
        vec![S("Peso (kg)"), N(2750.0), E, E],
    ]
}

fn ltr_sheet() -> Vec<Vec<C>> {
    vec![
        vec![E, S("BW 120"), S("DV 90")],
        vec![S("Machine"), S("LTR"), S("LTR")],
        vec![S("Potencia"), N(33.5), N(55.0)],
        vec![S("Tiempo"), E, E],
        vec![S("Carga"), N(3.0), E],
        vec![S("Descarga"), N(2.5), E],
        vec![E, E, E],
        vec![S("Precio"), N(100.0), N(120.0)],
    ]
}

fn sdr_sheet() -> Vec<Vec<C>> {
    vec![
        vec![E, S("Bomag BW120"), S("Hamm HD12"), S("Bomag BW100"), S("Ammann")],
        vec![S("Máquina"), S("SDR"), S("SDR"), S("SDR"), S("SDR")],
        vec![S("Peso"), N(2700.0), N(2600.0), N(2100.0), N(1900.5)],
    ]
}

#[test]
fn test_flat_sheet_conversion() {
    let data = build_workbook(&[("Tándem", tandem_sheet())]);
    let conversion = convert_bytes(data, &ConvertOptions::default()).unwrap();
    assert!(conversion.is_complete());

    let sheet = conversion.workbook.get("Tándem").unwrap();
    assert_eq!(sheet.keys(), vec!["BW 120 AD-5", "CC 1200"]);

    let bw = sheet.machine("BW 120 AD-5").unwrap();
    // The later duplicate "Peso (kg)" row wins
    assert_eq!(bw.get("Peso (kg)"), Some(&Value::Integer(2750)));
    assert!(!bw.contains("Ancho"));
    assert_eq!(bw.len(), 2);

    let cc = sheet.machine("CC 1200").unwrap();
    assert_eq!(cc.get("Peso (kg)"), Some(&Value::Float(2650.5)));
    assert_eq!(cc.get("Ancho"), Some(&Value::Integer(1200)));
}

#[test]
fn test_ltr_sheet_nests_tiempo() {
    let data = build_workbook(&[("LTR", ltr_sheet())]);
    let conversion = convert_bytes(data, &ConvertOptions::default()).unwrap();
    let sheet = conversion.workbook.get("LTR").unwrap();

    let bw = sheet.machine("BW 120").unwrap();
    assert_eq!(
        bw.labels().collect::<Vec<_>>(),
        vec!["Machine", "Potencia", "Precio", "Tiempo"]
    );
    let tiempo = bw.get("Tiempo").and_then(Value::as_record).unwrap();
    assert_eq!(tiempo.get("Carga"), Some(&Value::Integer(3)));
    assert_eq!(tiempo.get("Descarga"), Some(&Value::Float(2.5)));

    let dv = sheet.machine("DV 90").unwrap();
    assert!(!dv.contains("Tiempo"));
    assert_eq!(dv.get("Potencia"), Some(&Value::Integer(55)));
}

#[test]
fn test_sdr_sheet_groups_by_brand() {
    let data = build_workbook(&[("SDR", sdr_sheet())]);
    let conversion = convert_bytes(data, &ConvertOptions::default()).unwrap();
    let sheet = conversion.workbook.get("SDR").unwrap();

    assert!(matches!(sheet, SheetResult::Brands(_)));
    assert_eq!(sheet.keys(), vec!["Bomag", "Hamm", "Ammann"]);
    let bomag = sheet.brand("Bomag").unwrap();
    assert_eq!(bomag.len(), 2);
    assert_eq!(bomag[0].get("Peso"), Some(&Value::Integer(2700)));
    assert_eq!(bomag[1].get("Peso"), Some(&Value::Integer(2100)));
}

#[test]
fn test_abort_on_missing_header() {
    let data = build_workbook(&[
        ("Tándem", tandem_sheet()),
        ("Notas", vec![vec![S("Sin cabecera"), N(1.0)]]),
        ("LTR", ltr_sheet()),
    ]);
    let err = convert_bytes(data, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Layout { ref sheet, .. } if sheet == "Notas"));
}

#[test]
fn test_skip_policy_keeps_other_sheets() {
    let data = build_workbook(&[
        ("Tándem", tandem_sheet()),
        ("Notas", vec![vec![S("Sin cabecera"), N(1.0)]]),
        ("LTR", ltr_sheet()),
    ]);
    let options = ConvertOptions::new().with_failure_policy(FailurePolicy::Skip);
    let conversion = convert_bytes(data, &options).unwrap();

    assert_eq!(
        conversion.workbook.iter().map(|(n, _)| n).collect::<Vec<_>>(),
        vec!["Tándem", "LTR"]
    );
    assert_eq!(conversion.skipped.len(), 1);
    assert_eq!(conversion.skipped[0].name, "Notas");
    assert_eq!(conversion.skipped[0].error.sheet_name(), Some("Notas"));
}

#[test]
fn test_reader_sheet_order_and_grid() {
    let data = build_workbook(&[("SDR", sdr_sheet()), ("LTR", ltr_sheet())]);
    let reader = WorkbookReader::from_bytes(data).unwrap();
    assert_eq!(reader.sheet_names(), vec!["SDR", "LTR"]);

    let grid = reader.read_grid("LTR").unwrap();
    assert_eq!(grid.height(), 8);
    assert_eq!(grid.width(), 3);
    assert!(matches!(reader.read_grid("Missing"), Err(Error::SheetNotFound(_))));
}

#[test]
fn test_json_round_trip() {
    let data = build_workbook(&[
        ("Tándem", tandem_sheet()),
        ("LTR", ltr_sheet()),
        ("SDR", sdr_sheet()),
    ]);
    let conversion = convert_bytes(data, &ConvertOptions::default()).unwrap();

    let json = to_json(&conversion.workbook, JsonFormat::Pretty).unwrap();
    assert!(json.contains("\"Tándem\""));
    assert!(!json.contains("\\u"));

    let parsed: Workbook = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, conversion.workbook);
}

#[test]
fn test_file_round_trip_split() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("comparison.xlsx");
    std::fs::write(
        &input,
        build_workbook(&[("Tándem", tandem_sheet()), ("SDR", sdr_sheet())]),
    )
    .unwrap();

    let conversion = convert_file(&input, &ConvertOptions::default()).unwrap();
    let out = dir.path().join("json");
    let written = write_output(
        &conversion.workbook,
        &OutputMode::Split(out.clone()),
        JsonFormat::Pretty,
    )
    .unwrap();
    assert_eq!(written, vec![out.join("Tándem.json"), out.join("SDR.json")]);

    let sdr = std::fs::read_to_string(out.join("SDR.json")).unwrap();
    assert!(sdr.starts_with("{\n  \"Bomag\": [\n"));
}

#[test]
fn test_unreadable_workbook_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, b"definitely not a zip").unwrap();

    let err = convert_file(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Workbook { .. }));
    assert!(err.to_string().contains("broken.xlsx"));
}
