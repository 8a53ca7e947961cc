#[cfg(target_arch = "wasm32")]
fn main() {
    listovki::wasm::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("listovki is a browser application; serve it with `trunk serve`");
}
