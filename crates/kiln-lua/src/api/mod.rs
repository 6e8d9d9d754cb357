//! The `engine` module: one Lua function per engine operation.
//!
//! Conventions shared by every function:
//! - creation failures log an error and return `nil`; the script keeps going
//! - `nil`, released or stale handles make draws, setters and queries no-ops
//! - deleting a released handle raises a Lua error

mod assets;
mod mesh;
mod procedural;
mod window;

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use kiln_engine::resource::{Handle, Resource};
use kiln_engine::{Engine, EngineError};
use mlua::{Lua, Table};

use crate::handle::LuaResource;
use crate::keys::install_key_globals;

/// The engine as seen by Lua callbacks.
pub type SharedEngine = Rc<RefCell<Engine>>;

/// Registers the `engine` module (in `package.loaded` and as a global) and the
/// key globals. Returns the module table.
pub fn install(lua: &Lua, engine: SharedEngine) -> mlua::Result<Table> {
    let module = lua.create_table()?;
    window::register(lua, &module, &engine)?;
    assets::register(lua, &module, &engine)?;
    mesh::register(lua, &module, &engine)?;
    procedural::register(lua, &module, &engine)?;

    let globals = lua.globals();
    let loaded: Table = globals.get::<Table>("package")?.get("loaded")?;
    loaded.set("engine", module.clone())?;
    globals.set("engine", module.clone())?;

    install_key_globals(lua)?;
    Ok(module)
}

fn engine_mut(engine: &SharedEngine) -> mlua::Result<RefMut<'_, Engine>> {
    engine
        .try_borrow_mut()
        .map_err(|_| mlua::Error::runtime("engine is already in use"))
}

/// Wraps a freshly created handle, or logs the failure and yields `nil`.
fn created<T: Resource>(call: &str, result: Result<Handle<T>, EngineError>) -> Option<LuaResource<T>> {
    match result {
        Ok(handle) => Some(LuaResource::new(handle)),
        Err(err) => {
            log::error!("{call}: {err}");
            None
        }
    }
}

fn released(result: Result<(), EngineError>) -> mlua::Result<()> {
    result.map_err(|err| mlua::Error::runtime(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use kiln_engine::EngineConfig;

    use crate::ScriptRunner;

    const FUNCTIONS: [&str; 27] = [
        "create_window",
        "delete_window",
        "window_should_close",
        "set_window_should_close",
        "clear_color",
        "swap_buffers",
        "poll_events",
        "delay",
        "get_key",
        "create_framebuffer",
        "delete_framebuffer",
        "create_shader",
        "delete_shader",
        "load_font",
        "delete_font",
        "create_text",
        "load_texture",
        "delete_texture",
        "create_mesh",
        "delete_mesh",
        "draw",
        "set_position",
        "set_scale",
        "set_rotate",
        "create_noise",
        "get_noise",
        "delete_noise",
    ];

    fn runner() -> ScriptRunner {
        ScriptRunner::new(EngineConfig::default()).unwrap()
    }

    fn exec(runner: &ScriptRunner, source: &str) {
        runner.load_source(source, "=test").unwrap();
    }

    // ── registration ──────────────────────────────────────────────────────

    #[test]
    fn module_is_global_and_requirable() {
        let runner = runner();
        exec(&runner, "assert(require('engine') == engine)");

        for name in FUNCTIONS {
            let is_fn: bool = runner
                .lua()
                .load(format!("return type(engine.{name}) == 'function'"))
                .eval()
                .unwrap();
            assert!(is_fn, "engine.{name} missing");
        }
    }

    #[test]
    fn key_globals_are_seeded() {
        let runner = runner();
        exec(&runner, "assert(KEY_A == 65 and KEY_Z == 90 and KEY_ESC == 256)");
    }

    // ── drawing without resources ─────────────────────────────────────────

    #[test]
    fn draw_with_nil_handles_is_skipped() {
        let runner = runner();
        exec(&runner, "engine.draw(nil, nil, nil, nil, 0, 0, 1, 1)");

        let stats = runner.engine().borrow().stats();
        assert_eq!(stats.draws_submitted, 0);
        assert_eq!(stats.draws_skipped, 1);
    }

    #[test]
    fn draw_still_checks_region_numbers() {
        let runner = runner();
        let result = runner.load_source("engine.draw(nil, nil, nil, nil, 'u')", "=test");
        assert!(result.is_err());
    }

    #[test]
    fn clear_without_window_does_nothing() {
        let runner = runner();
        exec(&runner, "engine.clear_color(0.5, 0.5)");
        exec(&runner, "engine.clear_color()");
        exec(&runner, "engine.clear_color('0.5', 'red', {})");
        assert_eq!(runner.engine().borrow().stats().clears, 0);
    }

    #[test]
    fn window_queries_on_nil_return_nil() {
        let runner = runner();
        exec(
            &runner,
            r#"
            assert(engine.window_should_close(nil) == nil)
            assert(engine.get_key(nil, KEY_A) == nil)
            engine.set_window_should_close(nil)
            engine.swap_buffers(nil)
            engine.poll_events()
            "#,
        );
    }

    // ── creation failures ─────────────────────────────────────────────────

    #[test]
    fn gpu_resources_without_a_window_are_nil() {
        let runner = runner();
        exec(
            &runner,
            r#"
            assert(engine.create_mesh() == nil)
            assert(engine.create_shader('a.wgsl', 'b.wgsl') == nil)
            assert(engine.load_texture('missing.png') == nil)
            assert(engine.create_framebuffer(nil) == nil)
            "#,
        );
        assert_eq!(runner.engine().borrow().window_count(), 0);
    }

    #[test]
    fn invalid_window_sizes_are_nil() {
        let runner = runner();
        exec(
            &runner,
            r#"
            assert(engine.create_window('t', -1, 10, '') == nil)
            assert(engine.create_window('t', 10, 0, '') == nil)
            "#,
        );
        assert!(!runner.engine().borrow().has_device());
    }

    #[test]
    fn unreadable_font_is_nil() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let runner = runner();
        runner.lua().globals().set("path", path.display().to_string()).unwrap();
        exec(&runner, "assert(engine.load_font(path) == nil)");
        exec(&runner, "assert(engine.load_font('does/not/exist.ttf') == nil)");
    }

    // ── lifetimes ─────────────────────────────────────────────────────────

    #[test]
    fn noise_round_trip() {
        let runner = runner();
        exec(
            &runner,
            r#"
            local n = engine.create_noise(1337)
            local a = engine.get_noise(n, 10, 20)
            assert(type(a) == 'number' and a >= -1 and a <= 1)
            assert(a == engine.get_noise(n, 10, 20))
            engine.delete_noise(n)
            "#,
        );
    }

    #[test]
    fn double_delete_raises() {
        let runner = runner();
        exec(
            &runner,
            r#"
            local n = engine.create_noise(1)
            local alias = n
            engine.delete_noise(n)
            local ok, err = pcall(engine.delete_noise, alias)
            assert(not ok)
            assert(tostring(err):find('released'))
            "#,
        );
    }

    #[test]
    fn released_handles_read_as_nil() {
        let runner = runner();
        exec(
            &runner,
            r#"
            local n = engine.create_noise(1)
            engine.delete_noise(n)
            assert(engine.get_noise(n, 0, 0) == nil)
            "#,
        );
    }

    #[test]
    fn nil_delete_is_a_no_op() {
        let runner = runner();
        exec(
            &runner,
            r#"
            engine.delete_noise(nil)
            engine.delete_mesh(nil)
            engine.delete_texture(nil)
            engine.delete_font(nil)
            engine.delete_shader(nil)
            engine.delete_framebuffer(nil)
            engine.delete_window(nil)
            "#,
        );
    }

    #[test]
    fn wrong_handle_kind_raises() {
        let runner = runner();
        exec(
            &runner,
            r#"
            local n = engine.create_noise(1)
            assert(not pcall(engine.delete_mesh, n))
            assert(not pcall(engine.set_position, n, 0, 0, 0))
            engine.delete_noise(n)
            "#,
        );
    }

    // ── timing ────────────────────────────────────────────────────────────

    #[test]
    fn delay_blocks() {
        let runner = runner();
        let start = Instant::now();
        exec(&runner, "assert(engine.delay(0.05) == nil)");
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
