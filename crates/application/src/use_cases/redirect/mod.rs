mod handle_redirect;
mod upstream_resolver;
mod zone_resolver;

pub use handle_redirect::HandleRedirectUseCase;
pub use upstream_resolver::UpstreamResolver;
pub use zone_resolver::ZoneResolver;
