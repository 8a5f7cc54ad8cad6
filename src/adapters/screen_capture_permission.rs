#[cfg(target_os = "macos")]
pub fn ensure_screen_capture_permission() -> bool {
    const LOG_TAG_PERMISSIONS: &str = "[PERMISSIONS]";
    const SCREEN_CAPTURE_PANE: &str =
        "x-apple.systempreferences:com.apple.preference.security?Privacy_ScreenCapture";

    log::info!("{} Checking screen recording permission", LOG_TAG_PERMISSIONS);

    if call_core_graphics_flag("CGPreflightScreenCaptureAccess").unwrap_or(true) {
        log::info!("{} Screen recording permission granted", LOG_TAG_PERMISSIONS);
        return true;
    }

    log::warn!(
        "{} Screen recording permission not granted, requesting it",
        LOG_TAG_PERMISSIONS
    );
    let _ = call_core_graphics_flag("CGRequestScreenCaptureAccess");

    match std::process::Command::new("open").arg(SCREEN_CAPTURE_PANE).status() {
        Ok(status) if status.success() => {
            log::info!("{} Opened Screen Recording settings", LOG_TAG_PERMISSIONS);
        }
        Ok(status) => {
            log::error!(
                "{} Failed to open system settings: exit code {:?}",
                LOG_TAG_PERMISSIONS,
                status.code()
            );
        }
        Err(error) => {
            log::error!("{} Failed to execute open command: {}", LOG_TAG_PERMISSIONS, error);
        }
    }

    false
}

/// Looks up a `bool (void)` CoreGraphics function at runtime so older
/// systems without it still start.
#[cfg(target_os = "macos")]
fn call_core_graphics_flag(symbol: &str) -> Option<bool> {
    use std::ffi::CString;

    type FlagFn = unsafe extern "C" fn() -> bool;

    let framework_path =
        CString::new("/System/Library/Frameworks/CoreGraphics.framework/CoreGraphics").ok()?;
    let symbol_name = CString::new(symbol).ok()?;

    unsafe {
        let lib = libc::dlopen(framework_path.as_ptr(), libc::RTLD_LAZY);
        if lib.is_null() {
            log::warn!("[PERMISSIONS] Could not load CoreGraphics framework");
            return None;
        }

        let func_ptr = libc::dlsym(lib, symbol_name.as_ptr());
        if func_ptr.is_null() {
            libc::dlclose(lib);
            log::warn!("[PERMISSIONS] Could not find {}", symbol);
            return None;
        }

        let func: FlagFn = std::mem::transmute(func_ptr);
        let value = func();
        libc::dlclose(lib);
        Some(value)
    }
}

#[cfg(not(target_os = "macos"))]
pub fn ensure_screen_capture_permission() -> bool {
    true
}
