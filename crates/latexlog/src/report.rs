use crate::ir::{DiagnosticRecord, FileNode, Level, ParseReport};
use std::collections::HashSet;
use std::sync::Arc;

/// Builds the final report from records in log order.
///
/// With `ignore_duplicates`, a record whose `raw` text was already kept is
/// dropped. The first occurrence wins and order is preserved.
pub fn assemble(
    records: Vec<DiagnosticRecord>,
    files: Vec<FileNode>,
    ignore_duplicates: bool,
) -> ParseReport {
    let mut report = ParseReport {
        files,
        ..ParseReport::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for record in records {
        if ignore_duplicates && !seen.insert(record.raw.clone()) {
            log::trace!("dropping duplicate {} record", record.level);
            continue;
        }

        let record = Arc::new(record);
        let bucket = match record.level {
            Level::Error => &mut report.errors,
            Level::Warning => &mut report.warnings,
            Level::Typesetting => &mut report.typesetting,
        };
        bucket.push(Arc::clone(&record));
        report.all.push(record);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: Level, raw: &str) -> DiagnosticRecord {
        DiagnosticRecord {
            line: None,
            file: None,
            level,
            message: raw.to_string(),
            raw: raw.to_string(),
            content: None,
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let records = vec![
            record(Level::Warning, "w1"),
            record(Level::Error, "e1"),
            record(Level::Typesetting, "t1"),
            record(Level::Warning, "w2"),
        ];
        let report = assemble(records, Vec::new(), false);
        let raws: Vec<_> = report.all.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raws, vec!["w1", "e1", "t1", "w2"]);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[1].raw, "w2");
        assert!(Arc::ptr_eq(&report.errors[0], &report.all[1]));
    }

    #[test]
    fn test_dedup_first_wins() {
        let mut second = record(Level::Warning, "same");
        second.line = Some(9);
        let records = vec![record(Level::Warning, "same"), second, record(Level::Warning, "other")];

        let deduped = assemble(records.clone(), Vec::new(), true);
        assert_eq!(deduped.all.len(), 2);
        assert_eq!(deduped.warnings.len(), 2);
        assert_eq!(deduped.all[0].line, None);

        let kept = assemble(records, Vec::new(), false);
        assert_eq!(kept.all.len(), 3);
    }

    #[test]
    fn test_dedup_across_levels() {
        let records = vec![record(Level::Warning, "x"), record(Level::Typesetting, "x")];
        let report = assemble(records, Vec::new(), true);
        assert_eq!(report.all.len(), 1);
        assert!(report.typesetting.is_empty());
    }
}
