use crate::{DocumentStore, SearchBundle, SearchIndex};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.bin") }
    pub fn store(&self) -> PathBuf { self.root.join("store.json") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_index(paths: &IndexPaths, index: &SearchIndex) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.index())?;
    let bytes = bincode::serialize(index)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<SearchIndex> {
    let path = paths.index();
    let mut f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let index = bincode::deserialize(&buf).with_context(|| format!("decoding {}", path.display()))?;
    Ok(index)
}

pub fn save_store(paths: &IndexPaths, store: &DocumentStore) -> Result<()> {
    create_dir_all(&paths.root)?;
    let f = BufWriter::new(File::create(paths.store())?);
    serde_json::to_writer(f, store)?;
    Ok(())
}

pub fn load_store(paths: &IndexPaths) -> Result<DocumentStore> {
    let path = paths.store();
    let f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let store = serde_json::from_reader(BufReader::new(f)).with_context(|| format!("decoding {}", path.display()))?;
    Ok(store)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Write the index, store and meta file for one build.
pub fn save_bundle(paths: &IndexPaths, bundle: &SearchBundle, created_at: String) -> Result<()> {
    save_index(paths, bundle.index())?;
    save_store(paths, bundle.store())?;
    let meta = MetaFile { num_docs: bundle.store().len() as u32, created_at, version: FORMAT_VERSION };
    save_meta(paths, &meta)
}

/// Load and validate the index together with its store. Either both are
/// returned or neither.
pub fn load_bundle(paths: &IndexPaths) -> Result<SearchBundle> {
    let meta = load_meta(paths)?;
    anyhow::ensure!(
        meta.version == FORMAT_VERSION,
        "index format version {} is not supported (expected {FORMAT_VERSION})",
        meta.version
    );
    let index = load_index(paths)?;
    let store = load_store(paths)?;
    anyhow::ensure!(
        meta.num_docs as usize == store.len(),
        "meta.json records {} documents but store holds {}",
        meta.num_docs,
        store.len()
    );
    let bundle = SearchBundle::new(index, store)?;
    tracing::info!(num_docs = meta.num_docs, created_at = %meta.created_at, "loaded search bundle");
    Ok(bundle)
}
