//! Binary glTF export of drawn segment meshes

use crate::viewport::mesh::MeshData;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Per-mesh layout inside the BIN chunk
struct MeshMeta<'a> {
    name: &'a str,
    vertex_count: usize,
    index_count: usize,
    /// (offset, length) of positions, normals, colors, indices
    views: [(usize, usize); 4],
    pos_min: [f32; 3],
    pos_max: [f32; 3],
}

/// Build a complete GLB (binary glTF) file from named meshes.
///
/// Each non-empty mesh becomes one node, in the order given. Vertex colours
/// are exported as `COLOR_0`.
pub fn build_glb(meshes: &[(String, &MeshData)]) -> Result<Vec<u8>, String> {
    let mut bin_data: Vec<u8> = Vec::new();
    let mut metas: Vec<MeshMeta> = Vec::new();

    for (name, mesh) in meshes {
        let vertex_count = mesh.vertex_count();
        if vertex_count == 0 || mesh.indices.is_empty() {
            continue;
        }
        metas.push(write_mesh(&mut bin_data, name, mesh));
    }

    if metas.is_empty() {
        return Err("Nothing to export: no drawn geometry".to_string());
    }

    let gltf_json = gltf_document(&metas, bin_data.len());
    let mut json_bytes = serde_json::to_vec(&gltf_json).map_err(|e| e.to_string())?;

    // GLB chunks are 4-byte aligned; JSON pads with spaces
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    Ok(assemble(&json_bytes, &bin_data))
}

fn write_mesh<'a>(bin_data: &mut Vec<u8>, name: &'a str, mesh: &MeshData) -> MeshMeta<'a> {
    let vertex_count = mesh.vertex_count();
    let mut positions: Vec<f32> = Vec::with_capacity(vertex_count * 3);
    let mut normals: Vec<f32> = Vec::with_capacity(vertex_count * 3);
    let mut colors: Vec<f32> = Vec::with_capacity(vertex_count * 3);
    let mut pos_min = [f32::MAX; 3];
    let mut pos_max = [f32::MIN; 3];

    // Format: [px, py, pz, nx, ny, nz, r, g, b] × vertex_count
    for v in mesh.vertices.chunks_exact(9) {
        positions.extend_from_slice(&v[0..3]);
        normals.extend_from_slice(&v[3..6]);
        colors.extend_from_slice(&v[6..9]);
        for k in 0..3 {
            pos_min[k] = pos_min[k].min(v[k]);
            pos_max[k] = pos_max[k].max(v[k]);
        }
    }

    let views = [
        push_bytes(bin_data, &floats_to_bytes(&positions)),
        push_bytes(bin_data, &floats_to_bytes(&normals)),
        push_bytes(bin_data, &floats_to_bytes(&colors)),
        push_bytes(bin_data, &u32s_to_bytes(&mesh.indices)),
    ];

    MeshMeta {
        name,
        vertex_count,
        index_count: mesh.indices.len(),
        views,
        pos_min,
        pos_max,
    }
}

/// Append `bytes` padded to 4-byte alignment, returning (offset, unpadded length)
fn push_bytes(bin_data: &mut Vec<u8>, bytes: &[u8]) -> (usize, usize) {
    let offset = bin_data.len();
    bin_data.extend_from_slice(bytes);
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }
    (offset, bytes.len())
}

fn gltf_document(metas: &[MeshMeta], bin_length: usize) -> serde_json::Value {
    // 4 bufferViews and 4 accessors per mesh: positions, normals, colors, indices
    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut nodes = Vec::new();

    for (i, meta) in metas.iter().enumerate() {
        let base = i * 4;

        for (k, (offset, length)) in meta.views.iter().enumerate() {
            let target = if k == 3 { ELEMENT_ARRAY_BUFFER } else { ARRAY_BUFFER };
            buffer_views.push(serde_json::json!({
                "buffer": 0,
                "byteOffset": offset,
                "byteLength": length,
                "target": target
            }));
        }

        accessors.push(serde_json::json!({
            "bufferView": base,
            "byteOffset": 0,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3",
            "min": meta.pos_min,
            "max": meta.pos_max
        }));
        for view in [base + 1, base + 2] {
            accessors.push(serde_json::json!({
                "bufferView": view,
                "byteOffset": 0,
                "componentType": FLOAT,
                "count": meta.vertex_count,
                "type": "VEC3"
            }));
        }
        accessors.push(serde_json::json!({
            "bufferView": base + 3,
            "byteOffset": 0,
            "componentType": UNSIGNED_INT,
            "count": meta.index_count,
            "type": "SCALAR"
        }));

        gltf_meshes.push(serde_json::json!({
            "name": meta.name,
            "primitives": [{
                "attributes": {
                    "POSITION": base,
                    "NORMAL": base + 1,
                    "COLOR_0": base + 2
                },
                "indices": base + 3,
                "material": 0
            }]
        }));

        nodes.push(serde_json::json!({
            "name": meta.name,
            "mesh": i
        }));
    }

    let node_indices: Vec<usize> = (0..metas.len()).collect();

    serde_json::json!({
        "asset": {
            "version": "2.0",
            "generator": concat!("dog-viewer v", env!("CARGO_PKG_VERSION"))
        },
        "scene": 0,
        "scenes": [{
            "name": "Dog",
            "nodes": node_indices
        }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{
            "byteLength": bin_length
        }],
        "materials": [{
            "name": "Default",
            "pbrMetallicRoughness": {
                "baseColorFactor": [1.0, 1.0, 1.0, 1.0],
                "metallicFactor": 0.0,
                "roughnessFactor": 0.8
            }
        }]
    })
}

fn assemble(json_bytes: &[u8], bin_data: &[u8]) -> Vec<u8> {
    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;

    let total_length: u32 = 12 // header
        + 8 + json_chunk_length  // JSON chunk header + data
        + 8 + bin_chunk_length; // BIN chunk header + data

    let mut glb = Vec::with_capacity(total_length as usize);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(json_bytes);

    // BIN chunk
    glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
    glb.extend_from_slice(bin_data);

    glb
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    data.iter().flat_map(|v| v.to_le_bytes()).collect()
}
