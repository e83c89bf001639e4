fn main() {
    // Forward ESP-IDF build/link environment when producing firmware images.
    // Host builds (no `espidf` feature) have nothing to forward.
    espidf_sysenv();
}

#[cfg(feature = "espidf")]
fn espidf_sysenv() {
    embuild::espidf::sysenv::output();
}

#[cfg(not(feature = "espidf"))]
fn espidf_sysenv() {}
