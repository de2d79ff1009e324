pub mod download;
pub mod error;
pub mod index;
pub mod titledb;

pub use download::{DEFAULT_TITLEDB_URL, fetch_titledb, http_get};
pub use error::DatError;
pub use index::{MetadataIndex, ResolvedTitle, TitleInfo, UNKNOWN_NAME};
pub use titledb::{TitleDbEntry, parse_line, parse_titledb};
