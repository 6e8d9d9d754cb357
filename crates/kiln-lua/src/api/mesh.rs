use kiln_engine::mesh::Mesh;
use kiln_engine::render::TexRegion;
use kiln_engine::shader::ShaderProgram;
use kiln_engine::texture::Texture;
use kiln_engine::window::AppWindow;
use mlua::{AnyUserData, Lua, Table};

use super::{created, engine_mut, released, SharedEngine};
use crate::handle::{borrow_resource, live, take_resource};

type DrawArgs = (
    Option<AnyUserData>,
    Option<AnyUserData>,
    Option<AnyUserData>,
    Option<AnyUserData>,
    f32,
    f32,
    f32,
    f32,
);

pub(super) fn register(lua: &Lua, module: &Table, engine: &SharedEngine) -> mlua::Result<()> {
    let shared = engine.clone();
    module.set(
        "create_mesh",
        lua.create_function(move |_, ()| {
            let result = engine_mut(&shared)?.create_mesh();
            Ok(created("create_mesh", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_mesh",
        lua.create_function(move |_, mesh: Option<AnyUserData>| {
            match take_resource::<Mesh>(mesh)? {
                Some(handle) => released(engine_mut(&shared)?.delete_mesh(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "draw",
        lua.create_function(move |_, (mesh, window, shader, texture, u, v, du, dv): DrawArgs| {
            let mesh = borrow_resource::<Mesh>(mesh.as_ref())?;
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            let shader = borrow_resource::<ShaderProgram>(shader.as_ref())?;
            let texture = borrow_resource::<Texture>(texture.as_ref())?;

            engine_mut(&shared)?.draw(
                live(&mesh),
                live(&window),
                live(&shader),
                live(&texture),
                TexRegion::new(u, v, du, dv),
            );
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "set_position",
        lua.create_function(move |_, (mesh, x, y, z): (Option<AnyUserData>, f32, f32, f32)| {
            let mesh = borrow_resource::<Mesh>(mesh.as_ref())?;
            if let Some(mesh) = live(&mesh) {
                engine_mut(&shared)?.set_position(mesh, x, y, z);
            }
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "set_scale",
        lua.create_function(move |_, (mesh, w, h): (Option<AnyUserData>, f32, f32)| {
            let mesh = borrow_resource::<Mesh>(mesh.as_ref())?;
            if let Some(mesh) = live(&mesh) {
                engine_mut(&shared)?.set_scale(mesh, w, h);
            }
            Ok(())
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "set_rotate",
        lua.create_function(move |_, (mesh, degrees): (Option<AnyUserData>, f32)| {
            let mesh = borrow_resource::<Mesh>(mesh.as_ref())?;
            if let Some(mesh) = live(&mesh) {
                engine_mut(&shared)?.set_rotation(mesh, degrees);
            }
            Ok(())
        })?,
    )?;

    Ok(())
}
