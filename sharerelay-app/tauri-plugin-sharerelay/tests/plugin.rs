use tauri::test::{mock_builder, mock_context, noop_assets, MockRuntime};
use tauri::{App, Manager};
use tauri_plugin_sharerelay::{
    default_channel_name, DeliveryPolicy, ShareIntent, ShareRelayExt, METHOD_GET_SHARED_TEXT,
};

fn mock_app() -> App<MockRuntime> {
    mock_builder()
        .plugin(tauri_plugin_sharerelay::init())
        .build(mock_context(noop_assets()))
        .expect("build mock app")
}

#[test]
fn plugin_serves_identifier_channel() {
    let app = mock_app();
    let relay = app.share_relay();

    assert_eq!(relay.channel(), default_channel_name(&app.config().identifier));
    assert!(relay.channel().ends_with("/share"));
    assert_eq!(relay.delivery_policy(), DeliveryPolicy::QueryOnly);
    assert!(!relay.is_bridge_attached());
}

#[test]
fn share_is_taken_once_through_app_handle() {
    let app = mock_app();
    let handle = app.handle();

    handle
        .share_relay()
        .on_share_received(ShareIntent::plain_text("shared from another app"));

    let response = handle.share_relay().handle_method(METHOD_GET_SHARED_TEXT);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "status": "success", "value": "shared from another app" })
    );
    assert_eq!(handle.share_relay().query_pending_share(), None);
}

#[test]
fn relay_state_is_shared_across_handles() {
    let app = mock_app();
    app.handle()
        .share_relay()
        .on_share_received(ShareIntent::plain_text("one relay"));

    let peek = app.state::<tauri_plugin_sharerelay::ShareRelay>().peek_pending_share();
    assert!(peek.has_pending);
    assert_eq!(peek.content.as_deref(), Some("one relay"));
}
