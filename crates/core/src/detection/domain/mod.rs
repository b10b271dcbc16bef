pub mod face_mesh_extractor;
pub mod landmark_payload;
