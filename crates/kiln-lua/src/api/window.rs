use kiln_engine::time::delay;
use kiln_engine::window::{AppWindow, WindowConfig};
use mlua::{AnyUserData, Lua, Table, Value};

use super::{created, engine_mut, released, SharedEngine};
use crate::handle::{borrow_resource, live, take_resource};

pub(super) fn register(lua: &Lua, module: &Table, engine: &SharedEngine) -> mlua::Result<()> {
    let shared = engine.clone();
    module.set(
        "create_window",
        lua.create_function(move |_, (title, width, height, icon): (String, i64, i64, String)| {
            let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                log::error!("create_window: invalid size {width}x{height}");
                return Ok(None);
            };
            let result = engine_mut(&shared)?.create_window(WindowConfig::new(title, width, height, icon));
            Ok(created("create_window", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_window",
        lua.create_function(move |_, window: Option<AnyUserData>| {
            match take_resource::<AppWindow>(window)? {
                Some(handle) => released(engine_mut(&shared)?.delete_window(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "window_should_close",
        lua.create_function(move |_, window: Option<AnyUserData>| {
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            Ok(live(&window).and_then(|w| shared.borrow().window_should_close(w)))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "set_window_should_close",
        lua.create_function(move |_, window: Option<AnyUserData>| {
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            if let Some(window) = live(&window) {
                engine_mut(&shared)?.set_window_should_close(window);
            }
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "clear_color",
        lua.create_function(move |lua, (r, g, b): (Value, Value, Value)| {
            let (r, g, b) = (to_number(lua, r)?, to_number(lua, g)?, to_number(lua, b)?);
            engine_mut(&shared)?.clear_color(r, g, b);
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "swap_buffers",
        lua.create_function(move |_, window: Option<AnyUserData>| {
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            if let Some(window) = live(&window) {
                engine_mut(&shared)?.swap_buffers(window);
            }
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "poll_events",
        lua.create_function(move |_, ()| {
            engine_mut(&shared)?.poll_events();
            Ok(())
        })?,
    )?;

    module.set(
        "delay",
        lua.create_function(|_, seconds: f64| {
            delay(seconds);
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "get_key",
        lua.create_function(move |_, (window, code): (Option<AnyUserData>, i64)| {
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            Ok(live(&window).and_then(|w| shared.borrow().get_key(w, code)))
        })?,
    )?;

    Ok(())
}

/// Numbers and numeric strings convert; anything else reads as 0.
fn to_number(lua: &Lua, value: Value) -> mlua::Result<f32> {
    Ok(lua.coerce_number(value)?.unwrap_or(0.0) as f32)
}
