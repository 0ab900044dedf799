//! Rendering similarity results.

use std::io::{self, Write};

use matcher::{SimilarPair, SimilarityReport};

/// Write one CSV line per report row: the document id followed by the ids of
/// every similar document.
///
/// Ids containing a comma, quote or line break are quoted.
pub fn write_csv<W: Write>(mut writer: W, report: &SimilarityReport) -> io::Result<()> {
    for row in &report.rows {
        write!(writer, "{}", csv_field(&row.doc_id))?;
        for other in &row.similar {
            write!(writer, ",{}", csv_field(other))?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

/// Write the pairs as a pretty-printed JSON array.
pub fn write_pairs_json<W: Write>(mut writer: W, pairs: &[SimilarPair]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, pairs)?;
    writeln!(writer)?;
    writer.flush()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
