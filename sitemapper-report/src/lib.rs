pub mod render;

pub use render::{
    ReportFormat, generate_html_report, generate_json_report, generate_text_report, save_report,
};
