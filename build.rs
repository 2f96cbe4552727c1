fn main() {
    let building_python_module = std::env::var_os("CARGO_FEATURE_PYTHON").is_some();
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // The extension module resolves libpython symbols from the host
    // interpreter at import time, so macOS must not demand them at link time.
    if building_python_module && target_os == "macos" {
        println!("cargo:rustc-cdylib-link-arg=-undefined");
        println!("cargo:rustc-cdylib-link-arg=dynamic_lookup");
    }
}
