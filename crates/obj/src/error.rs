use std::fmt;

/// Which of the three per-vertex streams a face index points into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stream {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stream::Position => "position",
            Stream::TexCoord => "texture coordinate",
            Stream::Normal => "normal",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ObjError {
    #[error("failed to read model file")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    /// Indices are 1-based, so an index of 0 is always out of range.
    #[error("face {face} references {stream} {index}, but only {len} are defined")]
    IndexOutOfRange {
        face: usize,
        stream: Stream,
        index: u32,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected} components, found {found}")]
    MissingComponent { expected: usize, found: usize },

    #[error("invalid number `{0}`")]
    InvalidFloat(String),

    #[error("faces must be triangles, found {0} vertices")]
    FaceArity(usize),

    #[error("line is not valid UTF-8 after byte {offset}")]
    InvalidText { offset: usize },

    #[error("invalid face vertex `{0}`, expected `position/texcoord/normal`")]
    FaceVertex(String),
}
