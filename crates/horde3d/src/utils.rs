//! Functions backed by the Horde3DUtils library
//!
//! All of these return [`HordeError::UtilsUnavailable`] when the engine was
//! loaded without the utility library.

use std::os::raw::{c_char, c_int, c_short};

use log::{debug, warn};

use crate::engine::Engine;
use crate::error::{GeometryError, HordeError, Result};
use crate::ffi::{c_len, c_string};
use crate::handle::{Node, Resource};

/// Vertex and index streams for a procedural geometry resource
///
/// Normals, tangents and bitangents are three shorts per vertex, each
/// component scaled to [-32767, 32767]. Texture coordinates are two floats
/// per vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryData<'a> {
    /// Three floats per vertex
    pub positions: &'a [f32],
    /// Three indices per triangle
    pub indices: &'a [u32],
    pub normals: Option<&'a [i16]>,
    pub tangents: Option<&'a [i16]>,
    pub bitangents: Option<&'a [i16]>,
    pub tex_coords0: Option<&'a [f32]>,
    pub tex_coords1: Option<&'a [f32]>,
}

impl GeometryData<'_> {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Checks stream lengths and index ranges
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.positions.is_empty() {
            return Err(GeometryError::Empty);
        }
        if self.positions.len() % 3 != 0 {
            return Err(GeometryError::PositionStride(self.positions.len()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IndexCount(self.indices.len()));
        }
        let vertices = self.vertex_count();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertices)
        {
            return Err(GeometryError::IndexOutOfRange {
                position,
                index,
                vertices,
            });
        }

        let check = |stream: &'static str, len: Option<usize>, per_vertex: usize| match len {
            Some(actual) if actual != vertices * per_vertex => Err(GeometryError::StreamLength {
                stream,
                expected: vertices * per_vertex,
                actual,
            }),
            _ => Ok(()),
        };
        check("normals", self.normals.map(<[i16]>::len), 3)?;
        check("tangents", self.tangents.map(<[i16]>::len), 3)?;
        check("bitangents", self.bitangents.map(<[i16]>::len), 3)?;
        check("tex_coords0", self.tex_coords0.map(<[f32]>::len), 2)?;
        check("tex_coords1", self.tex_coords1.map(<[f32]>::len), 2)?;
        Ok(())
    }
}

/// World space ray through a point of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PickRay {
    pub origin: [f32; 3],
    pub direction: [f32; 3],
}

fn opt_ptr<T>(data: Option<&[T]>) -> *const T {
    data.map_or(std::ptr::null(), <[T]>::as_ptr)
}

impl Engine {
    /// Writes the message queue to `Horde3D_Log.html`
    pub fn dump_messages(&self) -> Result<()> {
        let utils = self.utils()?;
        if unsafe { (utils.dump_messages)() } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dutDumpMessages" })
        }
    }

    /// Loads every unloaded resource from `content_dir`
    ///
    /// `content_dir` may list several directories separated by `|`. Returns
    /// `Ok(false)` when at least one resource could not be found; those
    /// resources are loaded with default content.
    pub fn load_resources_from_disk(&self, content_dir: &str) -> Result<bool> {
        let utils = self.utils()?;
        let dir = c_string(content_dir)?;
        let complete = unsafe { (utils.load_resources_from_disk)(dir.as_ptr()) };
        if !complete {
            warn!("Some resources could not be loaded from {:?}", content_dir);
        }
        Ok(complete)
    }

    /// Creates a geometry resource from validated vertex streams
    pub fn create_geometry(&self, name: &str, geometry: &GeometryData<'_>) -> Result<Resource> {
        let utils = self.utils()?;
        geometry.validate()?;
        let c_name = c_string(name)?;
        let vertices = c_len(geometry.vertex_count())?;
        let indices = c_len(geometry.indices.len())?;
        let res = unsafe {
            (utils.create_geometry_res)(
                c_name.as_ptr(),
                vertices,
                indices,
                geometry.positions.as_ptr(),
                geometry.indices.as_ptr(),
                opt_ptr(geometry.normals).cast::<c_short>(),
                opt_ptr(geometry.tangents).cast::<c_short>(),
                opt_ptr(geometry.bitangents).cast::<c_short>(),
                opt_ptr(geometry.tex_coords0),
                opt_ptr(geometry.tex_coords1),
            )
        };
        debug!("Created geometry {:?} ({} vertices) -> {}", name, vertices, res);
        Resource::checked(res).ok_or(HordeError::Rejected { call: "h3dutCreateGeometryRes" })
    }

    /// Encodes pixels as a TGA image
    ///
    /// `pixels` holds `width * height` pixels of `bpp` bits (24 or 32),
    /// bottom row first. The buffer allocated by the library is freed before
    /// returning.
    pub fn create_tga_image(&self, pixels: &[u8], width: u32, height: u32, bpp: u32) -> Result<Vec<u8>> {
        let utils = self.utils()?;
        let expected = width as usize * height as usize * (bpp as usize / 8);
        if bpp % 8 != 0 || pixels.len() != expected {
            return Err(HordeError::ImageSize {
                expected,
                actual: pixels.len(),
            });
        }
        let (c_width, c_height, c_bpp) = (
            c_len(width as usize)?,
            c_len(height as usize)?,
            c_len(bpp as usize)?,
        );

        let mut out_data: *mut c_char = std::ptr::null_mut();
        let mut out_size: c_int = 0;
        let ok = unsafe {
            (utils.create_tga_image)(
                pixels.as_ptr(),
                c_width,
                c_height,
                c_bpp,
                &mut out_data,
                &mut out_size,
            )
        };
        if !ok || out_data.is_null() {
            return Err(HordeError::Rejected { call: "h3dutCreateTGAImage" });
        }
        let image = unsafe {
            std::slice::from_raw_parts(out_data.cast::<u8>(), usize::try_from(out_size).unwrap_or(0))
                .to_vec()
        };
        unsafe { (utils.free_mem)(&mut out_data) };
        Ok(image)
    }

    /// Saves the framebuffer as a TGA file
    pub fn screenshot(&self, filename: &str) -> Result<()> {
        let utils = self.utils()?;
        let filename = c_string(filename)?;
        if unsafe { (utils.screenshot)(filename.as_ptr()) } {
            Ok(())
        } else {
            Err(HordeError::Rejected { call: "h3dutScreenshot" })
        }
    }

    /// Ray through normalized window coordinates (origin bottom left)
    pub fn pick_ray(&self, camera: Node, nwx: f32, nwy: f32) -> Result<PickRay> {
        let utils = self.utils()?;
        let mut ray = PickRay::default();
        let [ox, oy, oz] = &mut ray.origin;
        let [dx, dy, dz] = &mut ray.direction;
        unsafe { (utils.pick_ray)(camera.raw(), nwx, nwy, ox, oy, oz, dx, dy, dz) };
        Ok(ray)
    }

    /// Nearest node under normalized window coordinates
    pub fn pick_node(&self, camera: Node, nwx: f32, nwy: f32) -> Result<Option<Node>> {
        let utils = self.utils()?;
        Ok(Node::checked(unsafe { (utils.pick_node)(camera.raw(), nwx, nwy) }))
    }

    /// Queues a text overlay using a font material
    pub fn show_text(
        &self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: [f32; 3],
        font: Resource,
    ) -> Result<()> {
        let utils = self.utils()?;
        let text = c_string(text)?;
        let [r, g, b] = color;
        unsafe { (utils.show_text)(text.as_ptr(), x, y, size, r, g, b, font.raw()) };
        Ok(())
    }

    /// Draws the frame statistics panel; `mode` 0 hides it
    pub fn show_frame_stats(&self, font: Resource, panel: Resource, mode: u32) -> Result<()> {
        let utils = self.utils()?;
        let mode = c_len(mode as usize)?;
        unsafe { (utils.show_frame_stats)(font.raw(), panel.raw(), mode) };
        Ok(())
    }
}
