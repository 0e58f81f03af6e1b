use std::io::BufRead;
use std::str::SplitWhitespace;

use trellis_mesh::{Vector2, Vector3};

use crate::error::{ObjError, ParseErrorKind};

/// One corner of a face: 1-based indices into the position, texture
/// coordinate and normal streams, exactly as written in the file.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: u32,
    pub tex_coord: u32,
    pub normal: u32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: [FaceVertex; 3],
}

/// A single meaningful line of a model file.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Record {
    /// `v x y z`
    Position(Vector3),
    /// `vt u v`, with `u` already negated.
    TexCoord(Vector2),
    /// `vn x y z`
    Normal(Vector3),
    /// `f p/t/n p/t/n p/t/n`
    Face(Face),
}

/// Streams the records of a model file, one line at a time.
///
/// Lines are classified by their first token. Anything that is not a
/// position, texture coordinate, normal or face (comments, groups, materials,
/// blank lines, ...) is skipped without being decoded, so it may hold any
/// bytes at all.
pub struct Records<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// The 1-based number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record, ObjError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line += 1,
                Err(e) => {
                    self.line += 1;
                    return Some(Err(e.into()));
                }
            }
            match parse_line(&self.buf) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(kind) => {
                    return Some(Err(ObjError::Parse {
                        line: self.line,
                        kind,
                    }))
                }
            }
        }
    }
}

fn parse_line(bytes: &[u8]) -> Result<Option<Record>, ParseErrorKind> {
    let mut tokens = bytes
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty());
    match tokens.next() {
        Some(b"v" | b"vt" | b"vn" | b"f") => {}
        Some(tag) => {
            log::trace!("skipping `{}` line", String::from_utf8_lossy(tag));
            return Ok(None);
        }
        None => return Ok(None),
    }
    let text = std::str::from_utf8(bytes).map_err(|e| ParseErrorKind::InvalidText {
        offset: e.valid_up_to(),
    })?;
    parse_text(text)
}

fn parse_text(text: &str) -> Result<Option<Record>, ParseErrorKind> {
    let mut fields = text.split_whitespace();
    let record = match fields.next() {
        Some("v") => {
            let [x, y, z] = parse_floats::<3>(&mut fields)?;
            Record::Position(Vector3::new(x, y, z))
        }
        Some("vt") => {
            // The U axis of this format runs opposite to ours.
            let [u, v] = parse_floats::<2>(&mut fields)?;
            Record::TexCoord(Vector2::new(-u, v))
        }
        Some("vn") => {
            let [x, y, z] = parse_floats::<3>(&mut fields)?;
            Record::Normal(Vector3::new(x, y, z))
        }
        Some("f") => Record::Face(parse_face(fields)?),
        Some(tag) => {
            log::trace!("skipping `{}` line", tag);
            return Ok(None);
        }
        None => return Ok(None),
    };
    Ok(Some(record))
}

// Reads the first N floats from `fields`. Any trailing components (such as
// the optional `w` of a position) are left unread.
fn parse_floats<const N: usize>(
    fields: &mut SplitWhitespace<'_>,
) -> Result<[f32; N], ParseErrorKind> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let field = fields.next().ok_or(ParseErrorKind::MissingComponent {
            expected: N,
            found: i,
        })?;
        *slot = field
            .parse()
            .map_err(|_| ParseErrorKind::InvalidFloat(field.to_owned()))?;
    }
    Ok(out)
}

fn parse_face(fields: SplitWhitespace<'_>) -> Result<Face, ParseErrorKind> {
    let tuples: Vec<&str> = fields.collect();
    if tuples.len() != 3 {
        return Err(ParseErrorKind::FaceArity(tuples.len()));
    }
    let mut face = Face::default();
    for (corner, tuple) in face.vertices.iter_mut().zip(tuples) {
        *corner = parse_face_vertex(tuple)?;
    }
    Ok(face)
}

fn parse_face_vertex(tuple: &str) -> Result<FaceVertex, ParseErrorKind> {
    let parts: Vec<&str> = tuple.split('/').collect();
    if let [p, t, n] = parts.as_slice() {
        if let (Ok(position), Ok(tex_coord), Ok(normal)) = (
            p.parse::<u32>(),
            t.parse::<u32>(),
            n.parse::<u32>(),
        ) {
            return Ok(FaceVertex {
                position,
                tex_coord,
                normal,
            });
        }
    }
    Err(ParseErrorKind::FaceVertex(tuple.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(text: &str) -> Vec<Result<Record, ObjError>> {
        Records::new(text.as_bytes()).collect()
    }

    fn byte_records(bytes: &[u8]) -> Vec<Result<Record, ObjError>> {
        Records::new(bytes).collect()
    }

    fn parse_error(text: &str) -> (usize, ParseErrorKind) {
        match records(text).pop() {
            Some(Err(ObjError::Parse { line, kind })) => (line, kind),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn classifies_lines() {
        let parsed: Vec<Record> = records("v 1 2 3\nvt 0.25 0.5\nvn 0 1 0\nf 1/1/1 1/1/1 1/1/1\n")
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            vec![
                Record::Position(Vector3::new(1.0, 2.0, 3.0)),
                Record::TexCoord(Vector2::new(-0.25, 0.5)),
                Record::Normal(Vector3::new(0.0, 1.0, 0.0)),
                Record::Face(Face {
                    vertices: [FaceVertex {
                        position: 1,
                        tex_coord: 1,
                        normal: 1
                    }; 3]
                }),
            ],
            parsed
        );
    }

    #[test]
    fn skips_unrecognized_lines() {
        let text = "# comment\n\no cube\ng group\nusemtl red\ns off\nvp 0.1 0.2\nv 1 1 1\n";
        let parsed = records(text);
        assert_eq!(1, parsed.len());
        assert!(matches!(parsed[0], Ok(Record::Position(_))));
    }

    #[test]
    fn ignores_trailing_components() {
        let parsed = records("v 1 2 3 1.0\nvt 0.5 0.5 0.0\n");
        assert!(matches!(parsed[0], Ok(Record::Position(p)) if p == Vector3::new(1.0, 2.0, 3.0)));
        assert!(matches!(parsed[1], Ok(Record::TexCoord(t)) if t == Vector2::new(-0.5, 0.5)));
    }

    #[test]
    fn handles_crlf_and_tabs() {
        let parsed = records("v\t1\t2\t3\r\nvn 0 0 1\r\n");
        assert_eq!(2, parsed.len());
        assert!(parsed.iter().all(Result::is_ok));
    }

    #[test]
    fn negates_u() {
        let parsed = records("vt 0.75 0.125\nvt -0.5 1\n");
        assert!(matches!(parsed[0], Ok(Record::TexCoord(t)) if t.x == -0.75 && t.y == 0.125));
        assert!(matches!(parsed[1], Ok(Record::TexCoord(t)) if t.x == 0.5 && t.y == 1.0));
    }

    #[test]
    fn reports_line_of_missing_component() {
        assert_eq!(
            (
                2,
                ParseErrorKind::MissingComponent {
                    expected: 3,
                    found: 2
                }
            ),
            parse_error("v 0 0 0\nvn 0 1\n")
        );
    }

    #[test]
    fn rejects_invalid_float() {
        assert_eq!(
            (1, ParseErrorKind::InvalidFloat("abc".to_owned())),
            parse_error("v 1 abc 3\n")
        );
    }

    #[test]
    fn rejects_quads() {
        assert_eq!(
            (1, ParseErrorKind::FaceArity(4)),
            parse_error("f 1/1/1 2/2/2 3/3/3 4/4/4\n")
        );
    }

    #[test]
    fn rejects_degenerate_faces() {
        assert_eq!(
            (1, ParseErrorKind::FaceArity(2)),
            parse_error("f 1/1/1 2/2/2\n")
        );
    }

    #[test]
    fn rejects_incomplete_face_vertices() {
        assert_eq!(
            (1, ParseErrorKind::FaceVertex("2//2".to_owned())),
            parse_error("f 1/1/1 2//2 3/3/3\n")
        );
        assert_eq!(
            (1, ParseErrorKind::FaceVertex("3".to_owned())),
            parse_error("f 1/1/1 2/2/2 3\n")
        );
        assert_eq!(
            (1, ParseErrorKind::FaceVertex("1/1/1/1".to_owned())),
            parse_error("f 1/1/1/1 2/2/2 3/3/3\n")
        );
    }

    #[test]
    fn rejects_negative_indices() {
        assert_eq!(
            (1, ParseErrorKind::FaceVertex("-1/-1/-1".to_owned())),
            parse_error("f -1/-1/-1 2/2/2 3/3/3\n")
        );
    }

    #[test]
    fn skips_undecodable_comments() {
        let parsed = byte_records(b"# exported by Caf\xe9 Modeller \xa9 2015\nv 1 2 3\ng \xff\xfe\n");
        assert_eq!(1, parsed.len());
        assert!(matches!(parsed[0], Ok(Record::Position(p)) if p == Vector3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn reports_line_of_undecodable_record() {
        match byte_records(b"v 0 0 0\nvn 0 0 1\nv 1 \xe9 0\n").pop() {
            Some(Err(ObjError::Parse { line, kind })) => {
                assert_eq!(3, line);
                assert_eq!(ParseErrorKind::InvalidText { offset: 4 }, kind);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn last_line_without_newline() {
        let parsed = records("v 0 0 0\nvn 0 0 1");
        assert_eq!(2, parsed.len());
        assert!(matches!(parsed[1], Ok(Record::Normal(_))));
    }

    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn read_error_advances_line() {
        let mut records = Records::new(std::io::BufReader::new(FailingReader));
        assert!(matches!(records.next(), Some(Err(ObjError::Io(_)))));
        assert_eq!(1, records.line());
    }
}
