//! 库加载/卸载钩子
//!
//! 平台在把库映射进进程、以及从进程卸载时分别调用 [`on_library_load`] 和
//! [`on_library_unload`]。两者与 [`init`](crate::init) / [`finalize`](crate::finalize)
//! 共用同一个全局计数器，但不获取静态锁：此时平台保证没有其它线程在执行本库代码，
//! 而且静态锁不一定能在加载钩子里安全地使用。
//!
//! 启用 `load-hooks` feature 时，Linux 把钩子注册到 `.init_array`/`.fini_array`。
//! macOS 的新版链接器不再支持 `__mod_term_func`，因此只注册 `__mod_init_func`
//! 加载钩子，由它通过 `atexit` 安排卸载钩子；dyld 在进程退出或卸载本库时执行它。

use crate::GLOBAL_LIFECYCLE;
use crate::subsystems::RegisteredSubsystems;

/// 库加载时的初始化
///
/// 加载钩子没有调用者可以接收返回值，启动失败只记录日志。
///
/// # Safety
/// 只能在平台保证单线程的上下文中调用（库加载阶段）
pub unsafe fn on_library_load() {
    // SAFETY: 调用者保证此时没有其它线程进入本库
    if let Err(err) = unsafe { GLOBAL_LIFECYCLE.init_unlocked(&RegisteredSubsystems) } {
        log::error!("lifecycle: bring-up on library load failed: {err}");
    }
}

/// 库卸载时的清理
///
/// # Safety
/// 只能在平台保证单线程的上下文中调用（库卸载阶段）
pub unsafe fn on_library_unload() {
    // SAFETY: 调用者保证此时没有其它线程进入本库
    if let Err(err) = unsafe { GLOBAL_LIFECYCLE.finalize_unlocked(&RegisteredSubsystems) } {
        log::error!("lifecycle: teardown on library unload failed: {err}");
    }
}

#[allow(dead_code)]
extern "C" fn load_hook() {
    // SAFETY: 由加载器在库加载阶段调用
    unsafe { on_library_load() };
}

#[allow(dead_code)]
extern "C" fn unload_hook() {
    // SAFETY: 由加载器在库卸载阶段调用
    unsafe { on_library_unload() };
}

/// 用 `atexit` 安排卸载钩子，成功返回 `true`
#[cfg(unix)]
#[allow(dead_code)]
pub(crate) fn schedule_unload_hook() -> bool {
    // SAFETY: unload_hook 是无捕获的 extern "C" 函数，不会 unwind
    unsafe { libc::atexit(unload_hook) == 0 }
}

#[cfg(all(feature = "load-hooks", target_os = "macos", not(test)))]
extern "C" fn load_hook_with_exit_unload() {
    load_hook();
    if !schedule_unload_hook() {
        log::error!("lifecycle: failed to schedule teardown on library unload");
    }
}

/// 库加载时自动初始化 (Linux)
#[cfg(all(feature = "load-hooks", target_os = "linux", not(test)))]
#[unsafe(link_section = ".init_array")]
#[used]
static LOAD_HOOK: extern "C" fn() = load_hook;

/// 库卸载时自动清理 (Linux)
#[cfg(all(feature = "load-hooks", target_os = "linux", not(test)))]
#[unsafe(link_section = ".fini_array")]
#[used]
static UNLOAD_HOOK: extern "C" fn() = unload_hook;

/// 库加载时自动初始化，并安排卸载时清理 (macOS)
#[cfg(all(feature = "load-hooks", target_os = "macos", not(test)))]
#[unsafe(link_section = "__DATA,__mod_init_func")]
#[used]
static LOAD_HOOK: extern "C" fn() = load_hook_with_exit_unload;
