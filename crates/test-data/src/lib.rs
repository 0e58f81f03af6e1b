pub struct TestModel {
    pub bytes: &'static [u8],
    /// Location of the same model on disk, for loaders that take a path.
    pub path: &'static str,
    pub face_count: usize,
}

/// One triangle with three distinct positions, texture coordinates and normals.
pub const OBJ_TRIANGLE: TestModel = TestModel {
    bytes: include_bytes!("../../../res/triangle/triangle.obj"),
    path: concat!(env!("CARGO_MANIFEST_DIR"), "/../../res/triangle/triangle.obj"),
    face_count: 1,
};

/// A 2x2x2 cube centred on the origin (2 triangles per face x 6 faces).
pub const OBJ_CUBE: TestModel = TestModel {
    bytes: include_bytes!("../../../res/cube/cube.obj"),
    path: concat!(env!("CARGO_MANIFEST_DIR"), "/../../res/cube/cube.obj"),
    face_count: 12,
};

/// A quad face; rejected by the loader because it is not a triangle.
pub const OBJ_QUAD: TestModel = TestModel {
    bytes: include_bytes!("../../../res/quad/quad.obj"),
    path: concat!(env!("CARGO_MANIFEST_DIR"), "/../../res/quad/quad.obj"),
    face_count: 1,
};
