// Trellis Core - Declarative RPC metadata & routing
// NO transport, NO request serialization - only the declarative procedure tree

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{RegistryError, RpcError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
