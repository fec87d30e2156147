mod edit;
mod home;
mod lifecycle;
mod list;
mod logs;

pub use edit::run_edit;
pub use home::run_home;
pub use lifecycle::{run_bounce, run_down, run_status, run_up};
pub use list::run_list;
pub use logs::{run_logs, LogsMode};
