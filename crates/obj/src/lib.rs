//! Reader for triangulated Wavefront-style `.obj` model files.
//!
//! Only the subset needed to rebuild an indexed triangle list is understood:
//! `v`, `vt`, `vn` and `f` lines, with every face written as exactly three
//! `position/texcoord/normal` tuples. Models must therefore be triangulated on
//! export.
use std::io::{BufRead, BufReader};
use std::path::Path;

use trellis_mesh::{Colour, MeshData};

mod error;
mod model;
mod record;

pub use error::*;
pub use model::*;
pub use record::*;

pub fn read_obj<P: AsRef<Path>>(p: P) -> Result<ObjModel, ObjError> {
    let f = std::fs::File::open(p)?;
    BufReader::new(f).read_obj()
}

pub fn parse_obj(data: &[u8]) -> Result<ObjModel, ObjError> {
    let mut data = data;
    data.read_obj()
}

/// Reads the model at `p` and expands it into uploadable mesh data, applying
/// `colour` to every vertex.
pub fn load_mesh<P: AsRef<Path>>(p: P, colour: Colour) -> Result<MeshData, ObjError> {
    read_obj(p)?.resolve(colour)
}

pub trait ObjReader: BufRead + Sized {
    fn read_obj(&mut self) -> Result<ObjModel, ObjError> {
        ObjModel::from_records(self.records())
    }

    fn records(&mut self) -> Records<&mut Self> {
        Records::new(self)
    }
}

impl<T: BufRead> ObjReader for T {}
