use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct GraphView { pub(crate) inner: wiregraph::GraphView }

impl GraphView {
    pub fn rs_new() -> GraphView { GraphView { inner: wiregraph::GraphView::new() } }
    pub fn rs_data_version(&self) -> u64 { self.inner.data_version() }
}
