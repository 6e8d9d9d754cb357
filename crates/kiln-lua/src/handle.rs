use kiln_engine::resource::{Handle, Resource};
use mlua::{AnyUserData, UserData, UserDataMethods, UserDataRef};

/// Script-side wrapper around an engine handle.
///
/// Lua values alias freely, so the handle lives in an `Option`: deleting the
/// resource takes it out and every alias observes the released state.
pub struct LuaResource<T> {
    handle: Option<Handle<T>>,
}

impl<T: Resource> LuaResource<T> {
    pub fn new(handle: Handle<T>) -> Self {
        Self { handle: Some(handle) }
    }

    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    /// The live handle, or `None` (with a warning) once released.
    pub fn live(&self) -> Option<&Handle<T>> {
        if self.handle.is_none() {
            log::warn!("use of released {} handle", T::KIND);
        }
        self.handle.as_ref()
    }

    fn take(&mut self) -> Option<Handle<T>> {
        self.handle.take()
    }
}

impl<T: Resource> UserData for LuaResource<T> {
    fn add_methods<M: UserDataMethods<Self>>(methods: &mut M) {
        methods.add_meta_method("__tostring", |_, this, ()| {
            Ok(match &this.handle {
                Some(handle) => format!("{handle:?}"),
                None => format!("{}(released)", T::KIND),
            })
        });
    }
}

/// Borrows a resource argument. `nil` is `None`; a value of another type is a
/// Lua error, as `luaL_checkudata` would raise.
pub(crate) fn borrow_resource<T: Resource>(
    value: Option<&AnyUserData>,
) -> mlua::Result<Option<UserDataRef<LuaResource<T>>>> {
    value.map(|ud| ud.borrow::<LuaResource<T>>()).transpose()
}

/// Takes the handle out of a resource argument for deletion.
///
/// `nil` is a no-op. Deleting an already released resource raises.
pub(crate) fn take_resource<T: Resource>(value: Option<AnyUserData>) -> mlua::Result<Option<Handle<T>>> {
    let Some(ud) = value else {
        return Ok(None);
    };
    let mut resource = ud.borrow_mut::<LuaResource<T>>()?;
    match resource.take() {
        Some(handle) => Ok(Some(handle)),
        None => Err(mlua::Error::runtime(format!("{} was already released", T::KIND))),
    }
}

/// Live handle of an optional borrowed argument.
pub(crate) fn live<T: Resource>(resource: &Option<UserDataRef<LuaResource<T>>>) -> Option<&Handle<T>> {
    resource.as_ref().and_then(|r| r.live())
}
