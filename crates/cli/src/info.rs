use std::fmt;

use anyhow::Context;
use trellis_mesh::{Bounds, Colour};
use trellis_obj::ObjModel;

use crate::args;

pub struct Summary {
    pub positions: usize,
    pub tex_coords: usize,
    pub normals: usize,
    pub faces: usize,
    pub vertices: usize,
    pub indices: usize,
    pub bounds: Option<Bounds>,
}

impl Summary {
    pub fn of(model: &ObjModel) -> anyhow::Result<Self> {
        let data = model.resolve(Colour::WHITE)?;
        Ok(Self {
            positions: model.positions.len(),
            tex_coords: model.tex_coords.len(),
            normals: model.normals.len(),
            faces: model.face_count(),
            vertices: data.vertex_count(),
            indices: data.index_count(),
            bounds: data.bounds(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "positions:  {}", self.positions)?;
        writeln!(f, "texcoords:  {}", self.tex_coords)?;
        writeln!(f, "normals:    {}", self.normals)?;
        writeln!(f, "faces:      {}", self.faces)?;
        writeln!(f, "vertices:   {}", self.vertices)?;
        write!(f, "indices:    {}", self.indices)?;
        if let Some(b) = &self.bounds {
            write!(
                f,
                "\nbounds:     ({}, {}, {}) - ({}, {}, {})",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            )?;
        }
        Ok(())
    }
}

pub fn info_command(args: args::InfoArgs) -> anyhow::Result<()> {
    let model = trellis_obj::read_obj(&args.obj_path)
        .with_context(|| format!("failed to read {}", args.obj_path))?;
    let summary =
        Summary::of(&model).with_context(|| format!("invalid model {}", args.obj_path))?;
    println!("{}", summary);
    Ok(())
}

pub fn check_command(args: args::CheckArgs) -> anyhow::Result<()> {
    for path in &args.obj_paths {
        let faces = trellis_obj::read_obj(path)
            .and_then(|model| model.resolve(Colour::WHITE).map(|_| model.face_count()))
            .with_context(|| format!("{} is not a valid model", path))?;
        log::info!("{}: {} faces", path, faces);
    }
    println!("{} file(s) ok", args.obj_paths.len());
    Ok(())
}
