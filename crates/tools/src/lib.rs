//! DocGen tool surfaces.
//!
//! Exposes the generation pipeline as named, remotely callable operations.
//! Two surfaces exist: the docs surface (generate, list, show, package) and
//! the orchestrator surface (profile-driven generation). Either is served
//! over line-delimited JSON-RPC by [`ToolServer`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Handlers decode arguments, call into [`nodes`] and
//! [`artifacts`], and wrap domain failures in an [`Envelope`]. Only protocol
//! problems become JSON-RPC errors.

pub mod docs;
pub mod envelope;
pub mod errors;
pub mod orchestrator;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod surface;

pub use docs::{docs_registry, DOCS_TOOLS};
pub use envelope::Envelope;
pub use errors::ToolError;
pub use orchestrator::{orchestrator_registry, ORCHESTRATOR_TOOLS};
pub use protocol::{RpcError, RpcRequest, RpcResponse};
pub use registry::{Handler, ToolRegistry};
pub use server::ToolServer;
pub use surface::{SurfaceContext, DEFAULT_ARCHIVE};
