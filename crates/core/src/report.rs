//! Tab-separated gene/disease report

use crate::gene::{GeneMetadata, HgncId};
use crate::mention::GeneMentions;
use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Report columns, in output order
pub const HEADER: [&str; 11] = [
    "chrom", "start", "end", "strand", "assembly", "hgnc_id", "symbol", "name", "alias",
    "ensembl", "disease",
];

/// Separator for multi-valued columns (alias, disease)
pub const LIST_SEPARATOR: &str = ";";

/// One report line: a gene on one assembly plus its associated diseases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub metadata: GeneMetadata,
    pub diseases: Vec<String>,
}

impl ReportRow {
    pub fn hgnc_id(&self) -> &HgncId {
        &self.metadata.hgnc_id
    }

    /// Column values in `HEADER` order.
    pub fn fields(&self) -> [String; 11] {
        let m = &self.metadata;
        [
            clean(&m.chrom),
            m.start.to_string(),
            m.end.to_string(),
            m.strand.to_string(),
            m.assembly.to_string(),
            m.hgnc_id.to_string(),
            clean(&m.symbol),
            clean(&m.name),
            join_list(&m.alias),
            m.ensembl.as_deref().map(clean).unwrap_or_default(),
            join_list(&self.diseases),
        ]
    }
}

/// Join metadata with mentions; metadata whose gene was never mentioned yields no row.
///
/// Rows come out ordered by identifier, then assembly (hg38 before hg19).
pub fn build_rows(mentions: &GeneMentions, metadata: &[GeneMetadata]) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = metadata
        .iter()
        .filter_map(|m| {
            let mention = mentions.get(&m.hgnc_id)?;
            Some(ReportRow {
                metadata: m.clone(),
                diseases: mention.diseases.iter().cloned().collect(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.metadata
            .hgnc_id
            .cmp(&b.metadata.hgnc_id)
            .then(a.metadata.assembly.cmp(&b.metadata.assembly))
    });
    rows
}

/// Write the header and one line per row.
pub fn write_report<W: Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    tsv.write_record(HEADER)?;
    for row in rows {
        tsv.write_record(row.fields())?;
    }
    tsv.flush()?;
    Ok(())
}

/// Write the report to `path`, creating parent directories; `-` writes to stdout.
pub fn write_report_file(path: &Path, rows: &[ReportRow]) -> Result<()> {
    if path.as_os_str() == "-" {
        return write_report(io::stdout().lock(), rows);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_report(file, rows)?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut values: Vec<String> = items
        .iter()
        .map(|s| clean(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values.join(LIST_SEPARATOR)
}

/// Tabs and line breaks would shift columns; fold them into spaces.
fn clean(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::{Assembly, Strand};
    use crate::mention::GeneMention;

    fn col4a3(assembly: Assembly, start: u64, end: u64) -> GeneMetadata {
        GeneMetadata {
            chrom: "2".into(),
            start,
            end,
            strand: Strand::Forward,
            assembly,
            hgnc_id: HgncId::parse("HGNC:2204").unwrap(),
            symbol: "COL4A3".into(),
            name: "collagen type IV alpha 3 chain".into(),
            alias: vec!["Tumstatin".into()],
            ensembl: Some("ENSG00000169031".into()),
        }
    }

    fn alport_mentions() -> GeneMentions {
        let mut mentions = GeneMentions::new();
        mentions.record_sentence(&[HgncId::parse("HGNC:2204").unwrap()], ["Alport syndrome"]);
        mentions
    }

    fn render(rows: &[ReportRow]) -> String {
        let mut out = Vec::new();
        write_report(&mut out, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_two_assemblies_give_two_rows() {
        let metadata = vec![
            col4a3(Assembly::Hg19, 228029281, 228179508),
            col4a3(Assembly::Hg38, 227164565, 227314792),
        ];
        let rows = build_rows(&alport_mentions(), &metadata);
        assert_eq!(rows.len(), 2);

        let output = render(&rows);
        let lines: Vec<Vec<&str>> = output
            .lines()
            .skip(1)
            .map(|l| l.split('\t').collect())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][4], "hg38");
        assert_eq!(lines[1][4], "hg19");

        for col in 0..HEADER.len() {
            if matches!(HEADER[col], "assembly" | "start" | "end") {
                assert_ne!(lines[0][col], lines[1][col]);
            } else {
                assert_eq!(lines[0][col], lines[1][col], "column {}", HEADER[col]);
            }
        }
        assert_eq!(
            lines[0],
            vec![
                "2", "227164565", "227314792", "1", "hg38", "HGNC:2204", "COL4A3",
                "collagen type IV alpha 3 chain", "Tumstatin", "ENSG00000169031", "Alport syndrome"
            ]
        );
    }

    #[test]
    fn test_header_with_no_rows() {
        let output = render(&[]);
        assert_eq!(output, format!("{}\n", HEADER.join("\t")));
    }

    #[test]
    fn test_metadata_without_mention_is_dropped() {
        let mut other = col4a3(Assembly::Hg38, 1, 2);
        other.hgnc_id = HgncId::parse("HGNC:1").unwrap();
        let rows = build_rows(&alport_mentions(), &[other]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_multi_valued_columns_and_cleaning() {
        let mut meta = col4a3(Assembly::Hg38, 1, 2);
        meta.alias = vec!["B".into(), "A".into(), "".into()];
        meta.name = "name\twith tab".into();
        meta.ensembl = None;
        meta.strand = Strand::Reverse;

        let mention: GeneMentions = [GeneMention {
            hgnc_id: meta.hgnc_id.clone(),
            diseases: ["nephritis".to_string(), "Alport syndrome".to_string()].into(),
        }]
        .into_iter()
        .collect();

        let rows = build_rows(&mention, &[meta]);
        let fields = rows[0].fields();
        assert_eq!(fields[3], "-1");
        assert_eq!(fields[7], "name with tab");
        assert_eq!(fields[8], "A;B");
        assert_eq!(fields[9], "");
        assert_eq!(fields[10], "Alport syndrome;nephritis");

        let output = render(&rows);
        for line in output.lines() {
            assert_eq!(line.split('\t').count(), HEADER.len());
        }
    }

    #[test]
    fn test_write_report_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.tsv");

        write_report_file(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("chrom\tstart\tend"));
    }

    #[test]
    fn test_write_report_file_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_report_file(dir.path(), &[]).unwrap_err();
        assert!(matches!(err, crate::CoreError::Io(_)));
    }
}
