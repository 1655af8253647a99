/// CivitAI-assigned model identifier.
///
/// Opaque and stable; doubles as the de-duplication key for scans.
pub type ModelId = i64;
