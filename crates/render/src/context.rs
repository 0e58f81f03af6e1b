use std::rc::Rc;

use crate::device::CommandList;
use crate::shader::Shader;

/// Identity of a shared shader, used to skip redundant rebinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderId(usize);

impl ShaderId {
    pub fn of<S>(shader: &Rc<S>) -> Self {
        ShaderId(Rc::as_ptr(shader) as *const () as usize)
    }
}

/// Wraps a command list for the duration of one frame (or render pass) and
/// tracks which shader is currently bound on it.
///
/// Every mesh drawn through the same context shares the marker, so a run of
/// meshes with the same shader only binds it once. Anything that binds
/// pipeline state directly on the underlying list must call
/// [`RenderContext::invalidate`] afterwards, otherwise the next mesh may skip a
/// rebind it needs.
///
/// A shader's identity is only meaningful while it is alive. Meshes borrowed
/// for the lifetime of the command list keep their shaders alive, so the
/// marker can never refer to a shader that has been freed and reallocated.
pub struct RenderContext<'l, L> {
    list: &'l mut L,
    current_shader: Option<ShaderId>,
}

impl<'l, L> RenderContext<'l, L> {
    pub fn new(list: &'l mut L) -> Self {
        Self {
            list,
            current_shader: None,
        }
    }

    pub fn list(&mut self) -> &mut L {
        &mut *self.list
    }

    pub fn current_shader(&self) -> Option<ShaderId> {
        self.current_shader
    }

    /// Forgets the currently bound shader so the next draw binds its own.
    pub fn invalidate(&mut self) {
        self.current_shader = None;
    }

    /// Binds `shader` unless it is already the current one. Returns whether
    /// the shader was bound.
    pub fn bind_shader<'a, S>(&mut self, shader: &'a Rc<S>) -> bool
    where
        L: CommandList<'a>,
        S: Shader<'a, L>,
    {
        let id = ShaderId::of(shader);
        if self.current_shader == Some(id) {
            log::trace!("shader {:?} already bound", id);
            return false;
        }
        shader.begin(&mut *self.list);
        self.current_shader = Some(id);
        true
    }
}
