//! Wavefront OBJ export for offline inspection of built meshes

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::MeshData;
use crate::core::Result;

impl MeshData {
    /// Write positions and faces as OBJ text (face indices are 1-based)
    pub fn write_obj<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "# marching-terrain OBJ export")?;
        writeln!(w, "# Vertices: {}", self.vertex_count())?;
        writeln!(w, "# Triangles: {}", self.triangle_count())?;

        for v in &self.vertices {
            writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for tri in self.triangles.chunks_exact(3) {
            writeln!(w, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
        }
        w.flush()
    }

    /// Write the mesh to an OBJ file, creating parent directories as needed
    pub fn save_obj(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_obj(BufWriter::new(file))?;
        log::debug!("Wrote {} triangles to {}", self.triangle_count(), path.display());
        Ok(())
    }
}
