pub mod http_face_mesh_extractor;
