// src/extractors/mod.rs
pub mod classify;
pub mod header;
pub mod record;
pub mod report;
pub mod timestamp;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use classify::{LineKind, RawLine};
#[allow(unused_imports)]
pub use header::ColumnLayout;
#[allow(unused_imports)]
pub use record::{build_record, ContractType, Record, RowContext};
#[allow(unused_imports)]
pub use report::{ParsedReport, ProductFilter, ReportParser};
#[allow(unused_imports)]
pub use timestamp::SettlementTime;
