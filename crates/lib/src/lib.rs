//! # Versioned kickstart directives
//!
//! This crate parses kickstart directive lines such as
//! `part / --ondisk=sda --size=500` into typed records and renders
//! records back into canonical directive text.  Each directive family
//! has a lineage of schemas, one per kickstart version, each derived
//! from its predecessor by a declared delta of added, removed, altered
//! and deprecated options.

pub mod commands;
pub mod errors;
pub mod handler;
pub mod lineage;
mod parser;
pub mod record;
pub mod render;
pub mod rule;
pub mod schema;
pub mod table;
pub mod value;
pub mod version;

pub use commands::{Catalog, Family};
pub use errors::{ErrorKind, ParseError, RecordError, SchemaError};
pub use handler::Handler;
pub use record::{DirectiveList, Record};
pub use version::Version;
