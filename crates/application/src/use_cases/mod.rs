pub mod redirect;

// Re-export use cases
pub use redirect::{HandleRedirectUseCase, UpstreamResolver, ZoneResolver};
