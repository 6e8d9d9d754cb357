use std::path::Path;

use kiln_engine::render::Framebuffer;
use kiln_engine::shader::ShaderProgram;
use kiln_engine::text::Font;
use kiln_engine::texture::Texture;
use kiln_engine::window::AppWindow;
use mlua::{AnyUserData, Lua, Table};

use super::{created, engine_mut, released, SharedEngine};
use crate::handle::{borrow_resource, live, take_resource};

pub(super) fn register(lua: &Lua, module: &Table, engine: &SharedEngine) -> mlua::Result<()> {
    // framebuffers

    let shared = engine.clone();
    module.set(
        "create_framebuffer",
        lua.create_function(move |_, window: Option<AnyUserData>| {
            let window = borrow_resource::<AppWindow>(window.as_ref())?;
            let Some(window) = live(&window) else {
                log::error!("create_framebuffer: no live window");
                return Ok(None);
            };
            let result = engine_mut(&shared)?.create_framebuffer(window);
            Ok(created("create_framebuffer", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_framebuffer",
        lua.create_function(move |_, framebuffer: Option<AnyUserData>| {
            match take_resource::<Framebuffer>(framebuffer)? {
                Some(handle) => released(engine_mut(&shared)?.delete_framebuffer(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    // shaders

    let shared = engine.clone();
    module.set(
        "create_shader",
        lua.create_function(move |_, (vertex, fragment): (String, String)| {
            let result = engine_mut(&shared)?.create_shader(Path::new(&vertex), Path::new(&fragment));
            Ok(created("create_shader", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_shader",
        lua.create_function(move |_, shader: Option<AnyUserData>| {
            match take_resource::<ShaderProgram>(shader)? {
                Some(handle) => released(engine_mut(&shared)?.delete_shader(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    // fonts and text

    let shared = engine.clone();
    module.set(
        "load_font",
        lua.create_function(move |_, path: String| {
            let result = engine_mut(&shared)?.load_font(Path::new(&path));
            Ok(created("load_font", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_font",
        lua.create_function(move |_, font: Option<AnyUserData>| {
            match take_resource::<Font>(font)? {
                Some(handle) => released(engine_mut(&shared)?.delete_font(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "create_text",
        lua.create_function(move |_, (font, word): (Option<AnyUserData>, String)| {
            let font = borrow_resource::<Font>(font.as_ref())?;
            let Some(font) = live(&font) else {
                log::error!("create_text: no live font");
                return Ok(None);
            };
            let result = engine_mut(&shared)?.create_text(font, &word);
            Ok(created("create_text", result))
        })?,
    )?;

    // textures

    let shared = engine.clone();
    module.set(
        "load_texture",
        lua.create_function(move |_, path: String| {
            let result = engine_mut(&shared)?.load_texture(Path::new(&path));
            Ok(created("load_texture", result))
        })?,
    )?;

    let shared = engine.clone();
    module.set(
        "delete_texture",
        lua.create_function(move |_, texture: Option<AnyUserData>| {
            match take_resource::<Texture>(texture)? {
                Some(handle) => released(engine_mut(&shared)?.delete_texture(handle)),
                None => Ok(()),
            }
        })?,
    )?;

    Ok(())
}
