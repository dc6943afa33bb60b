pub mod error;
pub mod figure;
pub mod gen_html;

pub use error::Error;
pub use figure::Figure;
pub use gen_html::{export_dashboard, render_dashboard, DashboardLayout};

pub type Result<T> = std::result::Result<T, Error>;
