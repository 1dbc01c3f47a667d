const COMMANDS: &[&str] = &[
    "attach_bridge",
    "detach_bridge",
    "invoke_method",
    "get_shared_text",
    "get_pending_share",
    "clear_pending_share",
];

fn main() {
    // The Kotlin plugin only buffers `onNewIntent`; the launch intent is read
    // over JNI from Rust.
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .build();
}
