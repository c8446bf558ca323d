use std::sync::Arc;
use txtdirect_application::use_cases::HandleRedirectUseCase;

#[derive(Clone)]
pub struct AppState {
    pub redirect: Arc<HandleRedirectUseCase>,
}

impl AppState {
    pub fn new(redirect: Arc<HandleRedirectUseCase>) -> Self {
        Self { redirect }
    }
}
