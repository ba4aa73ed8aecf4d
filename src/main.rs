#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod contact;
mod content;
mod hover_preview;
mod pointer;
mod scroll_spy;
mod section;
mod theme;
mod transition;
mod view_state;

#[cfg(not(target_arch = "wasm32"))]
mod backend;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    backend::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
