pub mod chart_renderer;
pub mod ledger_view;
pub mod table_renderer;
