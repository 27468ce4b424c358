use meetings_model::{State, Ui};
use serde_json::Value;
use std::sync::Arc;

pub(crate) fn select_ui(state: &State) -> Arc<Ui> {
    state.ui.clone()
}

pub(crate) fn select_snackbar(state: &State) -> Arc<Value> {
    state.ui.snackbar.clone()
}

pub(crate) fn select_nav_drawer(state: &State) -> Arc<Value> {
    state.ui.nav_drawer.clone()
}

pub(crate) fn select_header(state: &State) -> Arc<Value> {
    state.ui.header.clone()
}
