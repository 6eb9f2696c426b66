//! UniFFI binding generator binary
//!
//! This binary is used to generate Swift/Kotlin/Python bindings from the Rust library.
//! Run with: cargo run --features uniffi --bin uniffi-bindgen generate --library <path> --language python --out-dir <dir>

fn main() {
    uniffi::uniffi_bindgen_main()
}
