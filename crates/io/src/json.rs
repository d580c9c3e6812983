// JSON export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use shipmatch_recon::ReconResult;

use crate::error::ExportError;

/// Export the whole run result (meta, summary, discrepancies) as pretty JSON.
pub fn export(result: &ReconResult, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)
        .map_err(|e| ExportError::Write(format!("{}: {e}", path.display())))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, result).map_err(|e| ExportError::Write(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use shipmatch_recon::engine::{run, ReconInput};
    use shipmatch_recon::{CellValue, ReconConfig};

    #[test]
    fn test_json_export() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");

        let mut a = vec![CellValue::Empty; 12];
        a[2] = CellValue::text("出庫");
        a[8] = CellValue::Number(5.0);
        a[11] = CellValue::text("ORD1-1");
        let input = ReconInput {
            source_a: Some(vec![vec![], a]),
            source_b: Some(vec![vec![]]),
        };
        let result = run(&ReconConfig::default(), &input).unwrap();

        export(&result, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["summary"]["discrepancies"], 1);
        let rec = &parsed["discrepancies"][0];
        assert_eq!(rec["key"], "ORD1");
        assert_eq!(rec["quantity_a"], 5.0);
        assert_eq!(rec["quantity_b"], 0.0);
        assert_eq!(rec["difference"], -5.0);
        assert_eq!(rec["presence"], "only_a");
    }
}
