use crate::descriptor::CompileUnitRecord;
use std::cmp::Ordering;

/// Report order: project name, then project path, then build order.
#[must_use]
pub fn compare_records(a: &CompileUnitRecord, b: &CompileUnitRecord) -> Ordering {
    a.project
        .cmp(&b.project)
        .then_with(|| a.project_path.cmp(&b.project_path))
        .then_with(|| a.build_order.cmp(&b.build_order))
}

/// Sort collected records into report order.
#[must_use]
pub fn aggregate(mut records: Vec<CompileUnitRecord>) -> Vec<CompileUnitRecord> {
    records.sort_by(compare_records);
    records
}
