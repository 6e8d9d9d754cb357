use kiln_engine::procedural::NoiseGenerator;
use mlua::{AnyUserData, Lua, Table};

use super::{engine_mut, released, SharedEngine};
use crate::handle::{borrow_resource, live, take_resource, LuaResource};

pub(super) fn register(lua: &Lua, module: &Table, engine: &SharedEngine) -> mlua::Result<()> {
    let shared = engine.clone();
    module.set(
        "create_noise",
        lua.create_function(move |_, seed: i64| Ok(LuaResource::new(engine_mut(&shared)?.create_noise(seed))))?,
    )?;

    let shared = engine.clone();
    module.set(
        "get_noise",
        lua.create_function(move |_, (noise, x, y): (Option<AnyUserData>, i64, i64)| {
            let noise = borrow_resource::<NoiseGenerator>(noise.as_ref())?;
            Ok(live(&noise).and_then(|n| shared.borrow().get_noise(n, x, y)))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_noise",
        lua.create_function(move |_, noise: Option<AnyUserData>| {
            match take_resource::<NoiseGenerator>(noise)? {
                Some(handle) => released(engine_mut(&shared)?.delete_noise(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    Ok(())
}
