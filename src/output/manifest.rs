use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{error::Result, types::Level};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHash {
    pub sha256: String,
}

/// Summary written next to the level files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub crs: String,
    pub levels: Vec<String>,
    pub counts: BTreeMap<String, usize>,
    pub files: BTreeMap<String, FileHash>,
}

impl Manifest {
    /// Hash each level file under `root`; `counts` are feature counts per level.
    pub fn new(root: &Path, counts: &BTreeMap<Level, usize>) -> Result<Self> {
        let files = counts.keys()
            .map(|level| {
                let name = level.file_name();
                Ok((name.to_string(), FileHash { sha256: sha256_file(&root.join(name))? }))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self {
            version: "1".into(),
            crs: "EPSG:4326".into(),
            levels: Level::order().iter().map(|l| l.to_str().into()).collect(),
            counts: counts.iter().map(|(l, n)| (l.to_str().to_string(), *n)).collect(),
            files,
        })
    }
}

/// Streamed SHA-256 of a file, hex encoded.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 1 << 16];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn manifest_lists_each_level_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = BTreeMap::new();
        for (level, n) in [(Level::Country, 1), (Level::Province, 2)] {
            std::fs::write(dir.path().join(level.file_name()), "{}").unwrap();
            counts.insert(level, n);
        }

        let manifest = Manifest::new(dir.path(), &counts).unwrap();
        assert_eq!(manifest.counts["province"], 2);
        assert_eq!(manifest.files.len(), 2);
        assert!(manifest.files.contains_key("cn_border.json"));
        assert_eq!(manifest.files["cn_border.json"].sha256.len(), 64);
    }

    #[test]
    fn missing_level_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let counts = BTreeMap::from([(Level::City, 3)]);
        assert!(Manifest::new(dir.path(), &counts).is_err());
    }
}
