pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod fields;
pub mod index;
pub mod logging;
pub mod model;
pub mod pager;
pub mod pages;
pub mod row;
pub mod sheet;
pub mod state;

pub use config::{CliArgs, Command, ServiceConfig};
pub use error::ServiceError;
pub use logging::{LoggingConfig, init_logging};
pub use model::{CommandReply, Difficulty, Field, Page, PageView, PagerHandle, Row};
pub use sheet::{SheetBackend, XlsxBackend};
pub use state::ServiceState;
