pub mod export_service;
pub mod filter_service;
pub mod summary_service;
pub mod transaction_builder;
pub mod view_service;

pub use export_service::{ExportCell, ExportService, ExportSink, ExportTable};
pub use filter_service::{FilterCriteria, FilterOptions, FilterService, SortState};
pub use summary_service::{CategoryTotal, ChartData, LedgerSummary, SummaryService};
pub use transaction_builder::{parse_amount, TransactionBuilder, TransactionDraft};
pub use view_service::LedgerView;
