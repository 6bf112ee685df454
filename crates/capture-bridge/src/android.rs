//! Android capture notifications through `ScreenshotLifecycleObserver`
//!
//! The Java observer picks between the Android 14+ screen-capture callback
//! and the legacy media-store observer. Class references are resolved in
//! `JNI_OnLoad` because `FindClass` on attached native threads only sees the
//! system class loader.

use std::ffi::c_void;
use std::sync::OnceLock;

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{JNI_VERSION_1_6, jint};
use jni::{JNIEnv, JavaVM};
use observer_protocol::{BridgeConfig, CaptureEvent, ListenerTarget, Platform};
use tracing::{debug, error, info, warn};

use crate::{BridgeError, BridgeResult, CaptureHandler, HandlerSlot, PlatformBridge};

const OBSERVER_CLASS: &str = "com/unicorn/tools/ScreenshotLifecycleObserver";
const UNITY_PLAYER_CLASS: &str = "com/unity3d/player/UnityPlayer";

struct AndroidRuntime {
    vm: JavaVM,
    observer_class: GlobalRef,
    /// Absent outside Unity players; permission calls then report denied
    player_class: Option<GlobalRef>,
}

static RUNTIME: OnceLock<AndroidRuntime> = OnceLock::new();
static NATIVE_HANDLER: HandlerSlot = HandlerSlot::new();

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(vm: JavaVM, _reserved: *mut c_void) -> jint {
    if let Err(e) = init_runtime(vm) {
        // Library still loads; create_bridge() falls back to the no-op bridge
        error!("Failed to resolve {}: {}", OBSERVER_CLASS, e);
    }
    JNI_VERSION_1_6
}

fn init_runtime(vm: JavaVM) -> jni::errors::Result<()> {
    let (observer_class, player_class) = {
        let mut env = vm.get_env()?;

        let observer = match env.find_class(OBSERVER_CLASS) {
            Ok(class) => class,
            Err(e) => {
                clear_exception(&mut env);
                return Err(e);
            }
        };
        let observer_class = env.new_global_ref(observer)?;

        let player_class = match env.find_class(UNITY_PLAYER_CLASS) {
            Ok(class) => Some(env.new_global_ref(class)?),
            Err(_) => {
                clear_exception(&mut env);
                warn!("{} not found, media permission calls disabled", UNITY_PLAYER_CLASS);
                None
            }
        };

        (observer_class, player_class)
    };

    let _ = RUNTIME.set(AndroidRuntime {
        vm,
        observer_class,
        player_class,
    });
    debug!("Android capture runtime initialized");
    Ok(())
}

/// Entry point the Java observer calls after a capture.
///
/// Receives the screenshot path, `"screenshot_detected"` or null.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_unicorn_tools_ScreenshotLifecycleObserver_nativeOnCapture<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    path: JString<'local>,
) {
    let raw: Option<String> = if path.is_null() {
        None
    } else {
        match env.get_string(&path) {
            Ok(value) => Some(value.into()),
            Err(e) => {
                warn!("Unreadable capture path from Java: {}", e);
                clear_exception(&mut env);
                None
            }
        }
    };

    debug!("Android capture notification: {:?}", raw);
    NATIVE_HANDLER.emit(CaptureEvent::from_native(raw.as_deref()));
}

fn clear_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

/// Android bridge implementation
pub struct AndroidBridge {
    runtime: &'static AndroidRuntime,
}

impl AndroidBridge {
    /// Requires `JNI_OnLoad` to have resolved the observer class
    pub fn new() -> BridgeResult<Self> {
        RUNTIME
            .get()
            .map(|runtime| Self { runtime })
            .ok_or(BridgeError::NotInitialized)
    }

    /// Run a JNI call against the observer class on the current thread,
    /// attaching it to the VM if needed. Pending Java exceptions are logged
    /// and cleared.
    fn with_observer<T>(
        &self,
        call: &'static str,
        f: impl FnOnce(&mut JNIEnv, &JClass) -> jni::errors::Result<T>,
    ) -> BridgeResult<T> {
        let mut env = self
            .runtime
            .vm
            .attach_current_thread()
            .map_err(|e| BridgeError::native(call, e))?;
        let class: &JClass = self.runtime.observer_class.as_obj().into();

        f(&mut *env, class).map_err(|e| {
            clear_exception(&mut env);
            BridgeError::native(call, e)
        })
    }

    fn current_activity<'local>(
        &self,
        env: &mut JNIEnv<'local>,
    ) -> jni::errors::Result<JObject<'local>> {
        match &self.runtime.player_class {
            Some(player) => {
                let class: &JClass = player.as_obj().into();
                env.get_static_field(class, "currentActivity", "Landroid/app/Activity;")?
                    .l()
            }
            None => Ok(JObject::null()),
        }
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn start(&self, target: &ListenerTarget, config: &BridgeConfig) -> BridgeResult<()> {
        let detect_screen_capture = config.detect_screen_capture();

        self.with_observer("startListening", |env, class| {
            let target_id = env.new_string(target.target_id())?;
            let callback_name = env.new_string(target.callback_name())?;

            env.call_static_method(
                class,
                "startListening",
                "(Ljava/lang/String;Ljava/lang/String;Z)V",
                &[
                    JValue::Object(&target_id),
                    JValue::Object(&callback_name),
                    JValue::Bool(u8::from(detect_screen_capture)),
                ],
            )?;
            Ok(())
        })?;

        info!(
            "Android screenshot listening started - target: {}, legacy detection: {}",
            target, config.use_legacy_detection
        );
        Ok(())
    }

    fn stop(&self) -> BridgeResult<()> {
        self.with_observer("stopListening", |env, class| {
            env.call_static_method(class, "stopListening", "()V", &[])?;
            Ok(())
        })?;

        info!("Android screenshot listening stopped");
        Ok(())
    }

    fn on_capture_detected(&self, handler: CaptureHandler) {
        NATIVE_HANDLER.set(handler);
    }

    fn has_media_permission(&self) -> bool {
        let result = self.with_observer("hasMediaPermission", |env, class| {
            let activity = self.current_activity(env)?;
            env.call_static_method(
                class,
                "hasMediaPermission",
                "(Landroid/content/Context;)Z",
                &[JValue::Object(&activity)],
            )?
            .z()
        });

        match result {
            Ok(granted) => granted,
            Err(e) => {
                warn!("Media permission check failed: {}", e);
                false
            }
        }
    }

    fn request_media_permission(&self) -> BridgeResult<()> {
        self.with_observer("requestMediaPermission", |env, class| {
            let activity = self.current_activity(env)?;
            env.call_static_method(
                class,
                "requestMediaPermission",
                "(Landroid/app/Activity;)V",
                &[JValue::Object(&activity)],
            )?;
            Ok(())
        })
    }
}
