pub mod notify;
pub mod page;
pub mod render;
pub mod view;

pub use notify::{Notifier, TerminalNotifier, ToastKind};
#[cfg(any(test, feature = "test-util"))]
pub use notify::RecordingNotifier;
pub use page::{PageContent, SchedulePage};
pub use render::{build_table, render_actions, render_text, Table};
pub use view::{Column, ColumnVisibility, ViewState};
