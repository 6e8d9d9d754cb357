use kiln_engine::input::Key;
use mlua::Lua;

/// Seeds `KEY_A`..`KEY_Z`, `KEY_ESC` and the extra key globals with their codes.
pub fn install_key_globals(lua: &Lua) -> mlua::Result<()> {
    let globals = lua.globals();
    for key in Key::ALL {
        globals.set(key.global_name(), key.code())?;
    }
    Ok(())
}
