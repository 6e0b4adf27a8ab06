use crate::config::Config;
use crate::store::SharedStore;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Arc<Config>,
    pub tera: Arc<Tera>,
}
