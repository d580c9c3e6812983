// End-to-end: workbook exports in, reconciliation, discrepancy workbook out.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use shipmatch_io::{export, read_rows};
use shipmatch_recon::engine::{run, ReconInput};
use shipmatch_recon::{CellValue, ReconConfig};

const CARRIER_HEADER: [&str; 12] = [
    "出貨日期", "貨運單號", "單據別", "品號", "品名", "規格",
    "單位", "倉庫", "出庫數量", "箱數", "備註", "客戶單號",
];

const WAREHOUSE_HEADER: [&str; 12] = [
    "出庫日期", "客戶", "單號", "品號", "品名", "規格",
    "批號", "儲位", "單位", "箱數", "備註", "數量(副)",
];

fn write_carrier(path: &Path, rows: &[(&str, &str, f64)]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (col, h) in CARRIER_HEADER.iter().enumerate() {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    for (i, (kind, order, qty)) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        ws.write_string(r, 0, "2026/03/02").unwrap();
        ws.write_string(r, 2, *kind).unwrap();
        ws.write_number(r, 8, *qty).unwrap();
        if !order.is_empty() {
            ws.write_string(r, 11, *order).unwrap();
        }
    }
    wb.save(path).unwrap();
}

fn write_warehouse(path: &Path, rows: &[(f64, f64)]) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (col, h) in WAREHOUSE_HEADER.iter().enumerate() {
        ws.write_string(0, col as u16, *h).unwrap();
    }
    // Order numbers stored as numbers, as some exports do
    for (i, (order, qty)) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        ws.write_number(r, 2, *order).unwrap();
        ws.write_number(r, 11, *qty).unwrap();
    }
    wb.save(path).unwrap();
}

#[test]
fn workbooks_reconcile_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let carrier = dir.path().join("carrier.xlsx");
    let warehouse = dir.path().join("warehouse.xlsx");
    let out = dir.path().join("diff.xlsx");

    write_carrier(
        &carrier,
        &[
            ("出庫", "10045-1", 2.0),
            ("出庫", "10045-2", 1.0),
            ("出庫", "10046", 4.0),
            ("入庫", "10047", 9.0),
            ("出庫", "", 3.0),
        ],
    );
    write_warehouse(&warehouse, &[(10045.0, 3.0), (10046.0, 5.0), (10048.0, 1.0)]);

    let input = ReconInput {
        source_a: Some(read_rows(&carrier).unwrap()),
        source_b: Some(read_rows(&warehouse).unwrap()),
    };
    let config = ReconConfig::default();
    let result = run(&config, &input).unwrap();

    let keys: Vec<&str> = result.discrepancies.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["10046", "10048"]);
    assert_eq!(result.discrepancies[0].difference, 1.0);

    export(&result, &config.labels, &out).unwrap();
    let rows = read_rows(&out).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][1], CellValue::text("全日物流數量"));
    assert_eq!(rows[1][0], CellValue::text("10046"));
    assert_eq!(rows[1][1], CellValue::Number(4.0));
    assert_eq!(rows[1][2], CellValue::Number(5.0));
    assert_eq!(rows[2][3], CellValue::Number(1.0));
}

#[test]
fn csv_and_json_exports() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    std::fs::write(&a, "h,h,type,h,h,h,h,h,qty,h,h,order\n,,出庫,,,,,,5,,,ORD1-1\n").unwrap();
    std::fs::write(&b, "h,h,order,h,h,h,h,h,h,h,h,qty\n,,ORD1,,,,,,,,,7\n").unwrap();

    let input = ReconInput {
        source_a: Some(read_rows(&a).unwrap()),
        source_b: Some(read_rows(&b).unwrap()),
    };
    let config = ReconConfig::default();
    let result = run(&config, &input).unwrap();

    let csv_out = dir.path().join("diff.csv");
    export(&result, &config.labels, &csv_out).unwrap();
    let text = std::fs::read_to_string(&csv_out).unwrap();
    assert!(text.ends_with("ORD1,5,7,2\n"));

    let json_out = dir.path().join("diff.json");
    export(&result, &config.labels, &json_out).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_out).unwrap()).unwrap();
    assert_eq!(parsed["discrepancies"][0]["difference"], 2.0);

    let bad = dir.path().join("diff.pdf");
    assert!(export(&result, &config.labels, &bad).is_err());
}
