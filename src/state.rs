// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{catalogue::Catalogue, config::Config, exam::store::SessionStore, tutor::Tutor};

#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<Catalogue>,
    pub sessions: SessionStore,
    pub tutor: Arc<dyn Tutor>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<Catalogue> {
    fn from_ref(state: &AppState) -> Self {
        state.catalogue.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Tutor> {
    fn from_ref(state: &AppState) -> Self {
        state.tutor.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
