use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("WriteFailed: {0}")]
    WriteFailed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitPaths {
    pub json_path: String,
    pub sha256: String,
}

/// Atomically write `<stem>.json` into outdir (temp file, then rename).
pub fn emit_record<T: Serialize>(record: &T, outdir: &str, stem: &str) -> Result<EmitPaths, EmitError> {
    std::fs::create_dir_all(outdir).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    let json_path = Path::new(outdir).join(format!("{}.json", stem));
    let tmp = json_path.with_extension(format!("json.tmp.{}", std::process::id()));

    let bytes = serde_json::to_vec_pretty(record).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    std::fs::write(&tmp, &bytes).map_err(|e| EmitError::WriteFailed(e.to_string()))?;
    std::fs::rename(&tmp, &json_path).map_err(|e| EmitError::WriteFailed(e.to_string()))?;

    Ok(EmitPaths { json_path: json_path.to_string_lossy().to_string(), sha256: sha256_hex(&bytes) })
}

// Utility to compute sha256 hex
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let out = hasher.finalize();
    out.iter().map(|b| format!("{:02x}", b)).collect()
}
