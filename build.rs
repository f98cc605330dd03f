fn main() {
    // The vendor driver is loaded at runtime, so only the Node linkage is set up here
    napi_build::setup();
}
