use glow::HasContext;

/// Installs a debug message callback that forwards to the `log` facade.
///
/// Silently skipped (with a warning) on drivers without `GL_KHR_debug`.
pub(crate) fn install(gl: &mut glow::Context) {
    if !gl.supports_debug() {
        log::warn!("debug context requested but GL_KHR_debug is unavailable");
        return;
    }

    // SAFETY: called right after the context was made current on this thread.
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|source, kind, id, severity, message| {
            log::log!(
                severity_level(severity),
                "GL debug [source={source:#x} type={kind:#x} id={id}]: {message}"
            );
        });
    }

    log::debug!("GL debug output enabled");
}

pub(crate) fn severity_level(severity: u32) -> log::Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => log::Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        _ => log::Level::Debug,
    }
}
