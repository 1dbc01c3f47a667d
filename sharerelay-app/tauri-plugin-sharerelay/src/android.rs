//! Android intent sources.
//!
//! The cold-start intent is read from the activity over JNI during plugin
//! setup. Intents delivered to the running activity arrive in
//! `onNewIntent`, which only a registered Kotlin plugin can observe; it holds
//! the latest one until the relay takes it on resume.

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use tauri::{
    plugin::{PluginApi, PluginHandle},
    AppHandle, Manager, Runtime,
};

use crate::models::{NewIntentResponse, ShareIntent};
use crate::relay::ShareRelay;
use crate::{Result, ShareRelayExt};

const EXTRA_TEXT: &str = "android.intent.extra.TEXT";

/// Local references created while reading one intent.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// Register the Kotlin side that captures `onNewIntent`.
pub(crate) fn init<R: Runtime, C: DeserializeOwned>(
    api: &PluginApi<R, C>,
) -> Result<NewIntents<R>> {
    let handle =
        api.register_android_plugin("com.sharerelay.plugins.sharerelay", "ShareRelayPlugin")?;
    Ok(NewIntents(handle))
}

/// Handle to the Kotlin plugin buffering intents delivered while running.
pub(crate) struct NewIntents<R: Runtime>(PluginHandle<R>);

impl<R: Runtime> NewIntents<R> {
    fn take(&self) -> Result<Option<ShareIntent>> {
        self.0
            .run_mobile_plugin::<NewIntentResponse>("takeNewIntent", ())
            .map(|response| response.intent)
            .map_err(Into::into)
    }
}

/// Feed an intent delivered to the running activity to the relay.
pub(crate) fn deliver_new_intent<R: Runtime>(app: &AppHandle<R>) {
    let Some(intents) = app.try_state::<NewIntents<R>>() else {
        return;
    };
    match intents.take() {
        Ok(Some(intent)) => app.share_relay().on_share_received(intent),
        Ok(None) => debug!("share-relay: no new intent since last resume"),
        Err(e) => warn!("share-relay: {}", e),
    }
}

/// Feed the activity's launch intent to the relay, if it is a share.
pub(crate) fn deliver_launch_intent(relay: &ShareRelay) {
    match take_launch_intent() {
        Ok(Some(intent)) => relay.on_share_received(intent),
        Ok(None) => debug!("share-relay: launch intent is not a share"),
        Err(e) => warn!("share-relay: {}", e),
    }
}

fn take_launch_intent() -> Result<Option<ShareIntent>> {
    let ctx = ndk_context::android_context();
    // SAFETY: the NDK glue stores a valid `JavaVM*` for the process lifetime.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }?;
    let mut env = vm.attach_current_thread()?;
    // SAFETY: the context pointer is a global reference to the activity.
    let activity = unsafe { JObject::from_raw(ctx.context().cast()) };

    // The main thread stays attached, so local refs are freed with the frame.
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| read_share_intent(env, &activity))
}

fn read_share_intent(env: &mut JNIEnv, activity: &JObject) -> Result<Option<ShareIntent>> {
    let intent = env
        .call_method(activity, "getIntent", "()Landroid/content/Intent;", &[])?
        .l()?;
    if intent.is_null() {
        return Ok(None);
    }

    let Some(action) = string_method(env, &intent, "getAction")? else {
        return Ok(None);
    };
    let share = ShareIntent::new(
        action,
        string_method(env, &intent, "getType")?,
        string_extra(env, &intent, EXTRA_TEXT)?,
    );
    if !share.is_send() {
        return Ok(None);
    }

    // Keep a recreated activity from replaying the consumed share.
    let blank = env.new_object("android/content/Intent", "()V", &[])?;
    env.call_method(
        activity,
        "setIntent",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(&blank)],
    )?;

    Ok(Some(share))
}

fn string_method(env: &mut JNIEnv, target: &JObject, name: &str) -> Result<Option<String>> {
    let value = env
        .call_method(target, name, "()Ljava/lang/String;", &[])?
        .l()?;
    java_string(env, value)
}

fn string_extra(env: &mut JNIEnv, intent: &JObject, key: &str) -> Result<Option<String>> {
    let key = env.new_string(key)?;
    let value = env
        .call_method(
            intent,
            "getStringExtra",
            "(Ljava/lang/String;)Ljava/lang/String;",
            &[JValue::Object(&key)],
        )?
        .l()?;
    java_string(env, value)
}

fn java_string(env: &mut JNIEnv, value: JObject) -> Result<Option<String>> {
    if value.is_null() {
        return Ok(None);
    }
    let value = JString::from(value);
    let text: String = env.get_string(&value)?.into();
    Ok(Some(text))
}
