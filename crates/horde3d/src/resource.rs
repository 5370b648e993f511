//! Resource management

use std::os::raw::{c_char, c_int, c_void};
use std::ptr::NonNull;

use bytemuck::{NoUninit, Pod};
use log::debug;

use crate::engine::Engine;
use crate::error::{HordeError, Result};
use crate::ffi::{c_len, c_string, copy_engine_string};
use crate::handle::Resource;
use crate::types::{ResourceAccessor, ResourceFlags, ResourceType, TextureFormat};

/// Pixel data read back from a pipeline render target
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetData {
    pub width: u32,
    pub height: u32,
    /// Components per pixel (4 for color, 1 for depth)
    pub components: u32,
    pub data: Vec<f32>,
}

/// A mapped resource stream; unmapped on drop
///
/// Only one stream can be mapped at a time. Mapping takes the engine by
/// `&mut`, so the engine stays borrowed until the guard is dropped.
pub struct MappedStream<'e> {
    engine: &'e Engine,
    resource: Resource,
    ptr: NonNull<c_void>,
    readable: bool,
    writable: bool,
}

impl MappedStream<'_> {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    pub fn is_readable(&self) -> bool {
        self.readable
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Copies `count` elements out of the stream
    ///
    /// # Safety
    /// The stream must hold at least `count` values of `T`.
    pub unsafe fn read<T: Pod>(&self, count: usize) -> Result<Vec<T>> {
        if !self.readable {
            return Err(HordeError::Rejected {
                call: "read from write-only stream",
            });
        }
        let mut out = vec![T::zeroed(); count];
        let dst: &mut [u8] = bytemuck::cast_slice_mut(&mut out);
        std::ptr::copy_nonoverlapping(self.ptr.as_ptr().cast::<u8>(), dst.as_mut_ptr(), dst.len());
        Ok(out)
    }

    /// Copies `data` to the start of the stream
    ///
    /// # Safety
    /// The stream must have room for `data.len()` values of `T`.
    pub unsafe fn write<T: NoUninit>(&mut self, data: &[T]) -> Result<()> {
        if !self.writable {
            return Err(HordeError::Rejected {
                call: "write to read-only stream",
            });
        }
        let bytes: &[u8] = bytemuck::cast_slice(data);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), self.ptr.as_ptr().cast::<u8>(), bytes.len());
        Ok(())
    }
}

impl Drop for MappedStream<'_> {
    fn drop(&mut self) {
        unsafe { (self.engine.api.unmap_res_stream)(self.resource.raw()) }
    }
}

impl Engine {
    /// Type of a resource; `Undefined` for invalid handles
    pub fn resource_type(&self, res: Resource) -> ResourceType {
        let raw = unsafe { (self.api.get_res_type)(res.raw()) };
        ResourceType::from_raw(raw).unwrap_or(ResourceType::Undefined)
    }

    pub fn resource_name(&self, res: Resource) -> String {
        unsafe { copy_engine_string((self.api.get_res_name)(res.raw())) }
    }

    /// Next resource of `res_type` after `start` (`Resource::NONE` for the first)
    pub fn next_resource(&self, res_type: ResourceType, start: Resource) -> Option<Resource> {
        Resource::checked(unsafe { (self.api.get_next_resource)(res_type.raw(), start.raw()) })
    }

    /// Every resource of `res_type` (`Undefined` for all types)
    pub fn resources(&self, res_type: ResourceType) -> Vec<Resource> {
        let mut found = Vec::new();
        let mut current = Resource::NONE;
        while let Some(next) = self.next_resource(res_type, current) {
            if found.contains(&next) {
                break;
            }
            found.push(next);
            current = next;
        }
        found
    }

    pub fn find_resource(&self, res_type: ResourceType, name: &str) -> Result<Option<Resource>> {
        let name = c_string(name)?;
        Ok(Resource::checked(unsafe {
            (self.api.find_resource)(res_type.raw(), name.as_ptr())
        }))
    }

    /// Adds a resource, or returns the existing one with the same type and name
    /// after bumping its reference count
    pub fn add_resource(
        &self,
        res_type: ResourceType,
        name: &str,
        flags: ResourceFlags,
    ) -> Result<Resource> {
        let c_name = c_string(name)?;
        let res = unsafe { (self.api.add_resource)(res_type.raw(), c_name.as_ptr(), flags.bits()) };
        debug!("Added {:?} resource {:?} -> {}", res_type, name, res);
        Resource::checked(res).ok_or(HordeError::Rejected { call: "h3dAddResource" })
    }

    /// Duplicates a resource; an empty name lets the engine generate one
    pub fn clone_resource(&self, source: Resource, name: &str) -> Result<Resource> {
        let name = c_string(name)?;
        Resource::checked(unsafe { (self.api.clone_resource)(source.raw(), name.as_ptr()) })
            .ok_or(HordeError::Rejected { call: "h3dCloneResource" })
    }

    /// Drops one user reference; returns the remaining reference count
    pub fn remove_resource(&self, res: Resource) -> Result<u32> {
        let remaining = unsafe { (self.api.remove_resource)(res.raw()) };
        u32::try_from(remaining).map_err(|_| HordeError::Rejected { call: "h3dRemoveResource" })
    }

    pub fn is_resource_loaded(&self, res: Resource) -> bool {
        unsafe { (self.api.is_res_loaded)(res.raw()) }
    }

    /// Loads a resource from memory
    pub fn load_resource(&self, res: Resource, data: &[u8]) -> Result<()> {
        let size = c_len(data.len())?;
        let ok = unsafe { (self.api.load_resource)(res.raw(), data.as_ptr().cast::<c_char>(), size) };
        if ok {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dLoadResource" })
        }
    }

    /// Marks a resource as loaded with default content (data unavailable)
    pub fn load_resource_placeholder(&self, res: Resource) -> Result<()> {
        if unsafe { (self.api.load_resource)(res.raw(), std::ptr::null(), 0) } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dLoadResource" })
        }
    }

    pub fn unload_resource(&self, res: Resource) {
        unsafe { (self.api.unload_resource)(res.raw()) }
    }

    pub fn resource_elem_count(&self, res: Resource, elem: impl ResourceAccessor) -> usize {
        let count = unsafe { (self.api.get_res_elem_count)(res.raw(), elem.raw()) };
        usize::try_from(count).unwrap_or(0)
    }

    /// Index of the first element whose string parameter equals `value`
    pub fn find_resource_elem(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        param: impl ResourceAccessor,
        value: &str,
    ) -> Result<Option<usize>> {
        let value = c_string(value)?;
        let index =
            unsafe { (self.api.find_res_elem)(res.raw(), elem.raw(), param.raw(), value.as_ptr()) };
        Ok(usize::try_from(index).ok())
    }

    pub fn resource_param_i(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
    ) -> Result<i32> {
        let elem_idx = c_len(elem_idx)?;
        Ok(unsafe { (self.api.get_res_param_i)(res.raw(), elem.raw(), elem_idx, param.raw()) })
    }

    pub fn set_resource_param_i(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
        value: i32,
    ) -> Result<()> {
        let elem_idx = c_len(elem_idx)?;
        unsafe { (self.api.set_res_param_i)(res.raw(), elem.raw(), elem_idx, param.raw(), value) };
        Ok(())
    }

    pub fn resource_param_f(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
        comp_idx: usize,
    ) -> Result<f32> {
        let (elem_idx, comp_idx) = (c_len(elem_idx)?, c_len(comp_idx)?);
        Ok(unsafe {
            (self.api.get_res_param_f)(res.raw(), elem.raw(), elem_idx, param.raw(), comp_idx)
        })
    }

    pub fn set_resource_param_f(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
        comp_idx: usize,
        value: f32,
    ) -> Result<()> {
        let (elem_idx, comp_idx) = (c_len(elem_idx)?, c_len(comp_idx)?);
        unsafe {
            (self.api.set_res_param_f)(res.raw(), elem.raw(), elem_idx, param.raw(), comp_idx, value)
        };
        Ok(())
    }

    pub fn resource_param_str(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
    ) -> Result<String> {
        let elem_idx = c_len(elem_idx)?;
        Ok(unsafe {
            copy_engine_string((self.api.get_res_param_str)(
                res.raw(),
                elem.raw(),
                elem_idx,
                param.raw(),
            ))
        })
    }

    pub fn set_resource_param_str(
        &self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        param: impl ResourceAccessor,
        value: &str,
    ) -> Result<()> {
        let elem_idx = c_len(elem_idx)?;
        let value = c_string(value)?;
        unsafe {
            (self.api.set_res_param_str)(res.raw(), elem.raw(), elem_idx, param.raw(), value.as_ptr())
        };
        Ok(())
    }

    /// Maps a resource stream for direct access
    pub fn map_resource_stream(
        &mut self,
        res: Resource,
        elem: impl ResourceAccessor,
        elem_idx: usize,
        stream: impl ResourceAccessor,
        read: bool,
        write: bool,
    ) -> Result<MappedStream<'_>> {
        let elem_idx = c_len(elem_idx)?;
        let ptr = unsafe {
            (self.api.map_res_stream)(res.raw(), elem.raw(), elem_idx, stream.raw(), read, write)
        };
        let ptr = NonNull::new(ptr).ok_or(HordeError::Rejected { call: "h3dMapResStream" })?;
        Ok(MappedStream {
            engine: self,
            resource: res,
            ptr,
            readable: read,
            writable: write,
        })
    }

    /// Resource at `index` of the unloaded list
    pub fn query_unloaded_resource(&self, index: usize) -> Option<Resource> {
        let index = c_int::try_from(index).ok()?;
        Resource::checked(unsafe { (self.api.query_unloaded_resource)(index) })
    }

    /// Every resource still waiting for data
    pub fn unloaded_resources(&self) -> Vec<Resource> {
        (0..)
            .map_while(|index| self.query_unloaded_resource(index))
            .collect()
    }

    /// Frees resources with no remaining references
    pub fn release_unused_resources(&self) {
        unsafe { (self.api.release_unused_resources)() }
    }

    pub fn create_texture(
        &self,
        name: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
        flags: ResourceFlags,
    ) -> Result<Resource> {
        let c_name = c_string(name)?;
        let (width, height) = (c_len(width as usize)?, c_len(height as usize)?);
        Resource::checked(unsafe {
            (self.api.create_texture)(c_name.as_ptr(), width, height, format.raw(), flags.bits())
        })
        .ok_or(HordeError::Rejected { call: "h3dCreateTexture" })
    }

    /// Code prepended to every shader compiled after the call
    pub fn set_shader_preambles(&self, vertex: &str, fragment: &str) -> Result<()> {
        let (vertex, fragment) = (c_string(vertex)?, c_string(fragment)?);
        unsafe { (self.api.set_shader_preambles)(vertex.as_ptr(), fragment.as_ptr()) };
        Ok(())
    }

    pub fn set_material_uniform(&self, material: Resource, name: &str, value: [f32; 4]) -> Result<()> {
        let name = c_string(name)?;
        let [a, b, c, d] = value;
        if unsafe { (self.api.set_material_uniform)(material.raw(), name.as_ptr(), a, b, c, d) } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dSetMaterialUniform" })
        }
    }

    /// Resizes render targets flagged as relative to the window size
    pub fn resize_pipeline_buffers(&self, pipeline: Resource, width: u32, height: u32) -> Result<()> {
        let (width, height) = (c_len(width as usize)?, c_len(height as usize)?);
        unsafe { (self.api.resize_pipeline_buffers)(pipeline.raw(), width, height) };
        Ok(())
    }

    /// Reads back a render target buffer
    ///
    /// `pipeline` of `Resource::NONE` reads the main framebuffer; pass
    /// [`horde3d_sys::constants::DEPTH_BUFFER_INDEX`] as `buf_index` for depth.
    pub fn render_target_data(
        &self,
        pipeline: Resource,
        target: &str,
        buf_index: i32,
    ) -> Result<RenderTargetData> {
        let target = c_string(target)?;
        let (mut width, mut height, mut components): (c_int, c_int, c_int) = (0, 0, 0);
        let ok = unsafe {
            (self.api.get_render_target_data)(
                pipeline.raw(),
                target.as_ptr(),
                buf_index,
                &mut width,
                &mut height,
                &mut components,
                std::ptr::null_mut(),
                0,
            )
        };
        let dims = (
            u32::try_from(width),
            u32::try_from(height),
            u32::try_from(components),
        );
        let (width, height, components) = match (ok, dims) {
            (true, (Ok(w), Ok(h), Ok(c))) => (w, h, c),
            _ => return Err(HordeError::Rejected { call: "h3dGetRenderTargetData" }),
        };

        let len = width as usize * height as usize * components as usize;
        let mut data = vec![0.0f32; len];
        let byte_size = c_len(len * std::mem::size_of::<f32>())?;
        let ok = unsafe {
            (self.api.get_render_target_data)(
                pipeline.raw(),
                target.as_ptr(),
                buf_index,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                data.as_mut_ptr().cast::<c_void>(),
                byte_size,
            )
        };
        if !ok {
            return Err(HordeError::Rejected { call: "h3dGetRenderTargetData" });
        }
        Ok(RenderTargetData {
            width,
            height,
            components,
            data,
        })
    }
}
