//! In-Memory RPC Runtime
//!
//! Implements trellis-core's RPC root and procedure-builder ports with
//! executable in-process procedures. Useful for tests and demos; not a
//! transport.

pub mod procedure;
pub mod root;
pub mod router;
pub mod schema;

pub use procedure::{MemoryProcedure, MemoryProcedureBuilder};
pub use root::MemoryRpcRoot;
pub use router::{MemoryEntry, MemoryRouter};
pub use schema::JsonKindSchema;
