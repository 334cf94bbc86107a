//! The BCL (base class library) table: a static registry mapping standard
//! library signatures to their asymptotic cost (§4.2).
//!
//! Depends only on `asymptote-algebra`, so a downstream consumer that only
//! wants to know "what does `List.Contains` cost" can link this crate
//! without pulling in the full extractor.

mod defaults;
mod mapping;
mod registry;

pub use mapping::{ComplexityMapping, NoteFlag, Source};
pub use registry::{Registry, RegistryBuilder, ANY_ARITY, DEFAULT_REGISTRY};
